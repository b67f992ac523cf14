//! Runs against a disposable MySQL container; needs a Docker daemon.
//!
//! `cargo test -p short-storage -- --ignored` to run.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{alias, google};
use short_storage::{LinkStore, MySqlLinkStore, ReadLinkStore, StoreConfig, StoreError};
use short_test_infra::mysql::{MySqlServer, MysqlConfig};

struct Fixture {
    _mysql: MySqlServer,
    store: MySqlLinkStore,
}

impl Fixture {
    async fn start() -> Self {
        let mysql = MySqlServer::new(MysqlConfig::builder().build())
            .await
            .expect("start mysql");
        let url = mysql.database_url().await.expect("mysql url");
        let store = connect_with_retry(&url).await;

        store.init_schema().await.expect("create schema");

        Self {
            _mysql: mysql,
            store,
        }
    }
}

async fn connect_with_retry(url: &str) -> MySqlLinkStore {
    let config = StoreConfig::builder()
        .database_url(url)
        .max_connections(8)
        .build();
    let mut last_error = None;

    for _ in 0..20 {
        match MySqlLinkStore::connect(&config).await {
            Ok(store) => return store,
            Err(err) => {
                last_error = Some(err);
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }

    panic!("failed to connect mysql: {last_error:?}");
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn unknown_alias_is_absent() {
    let fixture = Fixture::start().await;
    common::unknown_alias_is_absent(&fixture.store).await;
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn create_then_read_back() {
    let fixture = Fixture::start().await;
    common::create_then_read_back(&fixture.store).await;
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn duplicate_create_conflicts() {
    let fixture = Fixture::start().await;
    common::duplicate_create_conflicts(&fixture.store).await;
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn aliases_match_exactly() {
    let fixture = Fixture::start().await;
    common::aliases_match_exactly(&fixture.store).await;
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn updated_at_round_trips() {
    let fixture = Fixture::start().await;
    common::updated_at_round_trips(&fixture.store).await;
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn repeated_reads_are_identical() {
    let fixture = Fixture::start().await;
    common::repeated_reads_are_identical(&fixture.store).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires a docker daemon"]
async fn concurrent_creates_have_one_winner() {
    let fixture = Fixture::start().await;
    common::concurrent_creates_have_one_winner(Arc::new(fixture.store.clone()), 16).await;
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn closed_pool_is_unavailable() {
    let fixture = Fixture::start().await;
    fixture.store.create(google("gg")).await.unwrap();
    fixture.store.close().await;

    let err = fixture
        .store
        .exists_by_alias(&alias("gg"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}
