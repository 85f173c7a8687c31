//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store's read, write and sweep guarantees.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use crate::cache::CacheStore;

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(60);

// == Strategies ==
/// Generates request-path keys
fn key_strategy() -> impl Strategy<Value = String> {
    "/[a-z0-9_/.]{0,32}".prop_map(|s| s)
}

fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

fn content_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("application/json".to_string()),
        Just("text/html; charset=utf-8".to_string()),
        Just("image/png".to_string()),
        Just(String::new()),
    ]
}

/// Builds a runtime whose clock only moves when the test advances it.
fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Keys never written always miss
    #[test]
    fn prop_unwritten_keys_miss(
        written in prop::collection::vec(key_strategy(), 0..20),
        probe in key_strategy()
    ) {
        prop_assume!(!written.contains(&probe));

        let rt = paused_runtime();
        rt.block_on(async {
            let store = CacheStore::new(TEST_TTL);
            for key in written {
                store.set(key, Bytes::from_static(b"x"), String::new()).await;
            }
            prop_assert!(store.get(&probe).await.is_none());
            Ok(())
        })?;
    }

    // A set is immediately readable with the exact payload and content type
    #[test]
    fn prop_set_then_get(
        key in key_strategy(),
        payload in payload_strategy(),
        content_type in content_type_strategy()
    ) {
        let rt = paused_runtime();
        rt.block_on(async {
            let store = CacheStore::new(TEST_TTL);
            store.set(key.clone(), Bytes::from(payload.clone()), content_type.clone()).await;

            let entry = store.get(&key).await;
            prop_assert!(entry.is_some(), "Entry should be readable after set");
            let entry = entry.unwrap();
            prop_assert_eq!(entry.payload.as_ref(), payload.as_slice());
            prop_assert_eq!(entry.content_type, content_type);
            Ok(())
        })?;
    }

    // Once the TTL has elapsed a get misses whether or not a sweep ran
    #[test]
    fn prop_expired_after_ttl(
        key in key_strategy(),
        extra_secs in 0u64..600,
        swept in any::<bool>()
    ) {
        let rt = paused_runtime();
        rt.block_on(async {
            let store = CacheStore::new(TEST_TTL);
            store.set(key.clone(), Bytes::from_static(b"v"), String::new()).await;

            tokio::time::advance(TEST_TTL + Duration::from_secs(extra_secs)).await;
            if swept {
                store.sweep().await;
            }
            prop_assert!(store.get(&key).await.is_none());
            Ok(())
        })?;
    }

    // A sweep at T removes exactly the entries with expires_at <= T
    #[test]
    fn prop_sweep_partitions_by_expiry(
        writes in prop::collection::vec((key_strategy(), 0u64..120), 1..30),
        sweep_after in 0u64..180
    ) {
        let rt = paused_runtime();
        rt.block_on(async {
            let store = CacheStore::new(TEST_TTL);

            // Writes happen at increasing offsets; later writes of a key win
            let mut written_at = std::collections::HashMap::new();
            let mut elapsed = 0u64;
            for (key, offset) in writes {
                if offset > elapsed {
                    tokio::time::advance(Duration::from_secs(offset - elapsed)).await;
                    elapsed = offset;
                }
                store.set(key.clone(), Bytes::from_static(b"v"), String::new()).await;
                written_at.insert(key, elapsed);
            }

            let sweep_time = elapsed.max(sweep_after);
            tokio::time::advance(Duration::from_secs(sweep_time - elapsed)).await;

            let before = store.stats().await;
            prop_assert_eq!(before.active_entries + before.expired_entries, before.total_entries);
            prop_assert_eq!(before.total_entries, written_at.len());

            store.sweep().await;

            let survivors: HashSet<String> = written_at
                .iter()
                .filter(|(_, at)| **at + TEST_TTL.as_secs() > sweep_time)
                .map(|(key, _)| key.clone())
                .collect();

            prop_assert_eq!(store.len().await, survivors.len());
            for key in written_at.keys() {
                let present = store.peek(key).await.is_some();
                prop_assert_eq!(present, survivors.contains(key), "key {}", key);
            }
            Ok(())
        })?;
    }
}

// == Property Test for Concurrent Operation Correctness ==
// Readers must see a payload and content type written by the same set call

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_no_torn_reads(
        writers in 2usize..16,
        readers in 2usize..16,
        rounds in 1usize..20
    ) {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .enable_all()
            .build()
            .unwrap();

        rt.block_on(async {
            let store = Arc::new(CacheStore::new(TEST_TTL));
            let mut handles = vec![];

            for writer in 0..writers {
                let store = Arc::clone(&store);
                handles.push(tokio::spawn(async move {
                    for round in 0..rounds {
                        let tag = format!("w{}-r{}", writer, round);
                        store
                            .set(
                                "/shared".to_string(),
                                Bytes::from(tag.clone().into_bytes()),
                                format!("application/x-{}", tag),
                            )
                            .await;
                        tokio::task::yield_now().await;
                    }
                    Ok::<_, String>(())
                }));
            }

            for _ in 0..readers {
                let store = Arc::clone(&store);
                handles.push(tokio::spawn(async move {
                    for _ in 0..rounds {
                        if let Some(entry) = store.get("/shared").await {
                            let tag = String::from_utf8(entry.payload.to_vec())
                                .map_err(|e| e.to_string())?;
                            let expected = format!("application/x-{}", tag);
                            if entry.content_type != expected {
                                return Err(format!(
                                    "Torn read: payload {} with content type {}",
                                    tag, entry.content_type
                                ));
                            }
                        }
                        tokio::task::yield_now().await;
                    }
                    Ok(())
                }));
            }

            for handle in handles {
                let result = handle.await.expect("Task should not panic");
                prop_assert!(result.is_ok(), "Concurrent operation failed: {:?}", result);
            }

            prop_assert_eq!(store.len().await, 1);
            Ok(())
        })?;
    }
}
