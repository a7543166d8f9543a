use std::time::Duration;

use jiff::Timestamp;
use tinylink_core::{ExpiryPolicy, LongUrl, Mapping, ShortId};
use tinylink_storage::{MappingStore, PutMode, ReadMappingStore, RedisMappingStore, StorageError};
use tinylink_test_infra::redis::RedisServer;

struct Fixture {
    _redis: RedisServer,
    store: RedisMappingStore,
}

impl Fixture {
    async fn start() -> Self {
        let redis = RedisServer::start().await.expect("start redis");
        let store = RedisMappingStore::new(redis.connection());

        Self {
            _redis: redis,
            store,
        }
    }
}

fn id(value: &str) -> ShortId {
    ShortId::new_unchecked(value)
}

fn mapping_with_ttl(code: &str, url: &str, ttl: Duration) -> Mapping {
    Mapping::new(
        id(code),
        LongUrl::parse(url).unwrap(),
        "https://short.witek.com.br/t/",
        Timestamp::now(),
        &ExpiryPolicy::new(ttl).unwrap(),
    )
    .unwrap()
}

fn mapping(code: &str, url: &str) -> Mapping {
    mapping_with_ttl(code, url, Duration::from_secs(3600))
}

#[tokio::test]
async fn put_and_get() {
    let fixture = Fixture::start().await;
    let stored = mapping("abc123", "https://witek.com.br");

    fixture
        .store
        .put(stored.clone(), PutMode::IfAbsent)
        .await
        .unwrap();

    let got = fixture.store.get(&id("abc123")).await.unwrap().unwrap();
    assert_eq!(got, stored);
}

#[tokio::test]
async fn get_missing_returns_none() {
    let fixture = Fixture::start().await;

    assert!(fixture.store.get(&id("missing")).await.unwrap().is_none());
}

#[tokio::test]
async fn put_if_absent_conflicts() {
    let fixture = Fixture::start().await;

    fixture
        .store
        .put(mapping("abc123", "https://one.example"), PutMode::IfAbsent)
        .await
        .unwrap();

    let err = fixture
        .store
        .put(mapping("abc123", "https://two.example"), PutMode::IfAbsent)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict(_)));

    fixture
        .store
        .put(mapping("abc123", "https://two.example"), PutMode::Overwrite)
        .await
        .unwrap();
    let got = fixture.store.get(&id("abc123")).await.unwrap().unwrap();
    assert_eq!(got.long_url(), "https://two.example");
}

#[tokio::test]
async fn key_expires_natively() {
    let fixture = Fixture::start().await;

    fixture
        .store
        .put(
            mapping_with_ttl("short-lived", "https://example.com", Duration::from_secs(1)),
            PutMode::IfAbsent,
        )
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(2500)).await;

    assert!(fixture.store.get(&id("short-lived")).await.unwrap().is_none());
    assert_eq!(fixture.store.purge_expired().await.unwrap(), 0);
}

#[tokio::test]
async fn delete_removes_key() {
    let fixture = Fixture::start().await;

    fixture
        .store
        .put(mapping("abc123", "https://example.com"), PutMode::IfAbsent)
        .await
        .unwrap();

    assert!(fixture.store.delete(&id("abc123")).await.unwrap());
    assert!(!fixture.store.delete(&id("abc123")).await.unwrap());
    assert!(fixture.store.get(&id("abc123")).await.unwrap().is_none());
}

#[tokio::test]
async fn concurrent_if_absent_writes_have_one_winner() {
    let fixture = Fixture::start().await;

    let writes: Vec<_> = (0..16)
        .map(|i| {
            let store = fixture.store.clone();
            tokio::spawn(async move {
                store
                    .put(
                        mapping("contested", &format!("https://example.com/{i}")),
                        PutMode::IfAbsent,
                    )
                    .await
            })
        })
        .collect();

    let mut winners = 0;
    for write in writes {
        match write.await.unwrap() {
            Ok(()) => winners += 1,
            Err(StorageError::Conflict(_)) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!(winners, 1);
}
