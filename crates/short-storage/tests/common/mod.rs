//! Contract checks shared by every SQL backend's integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use jiff::Timestamp;
use short_storage::{Alias, LinkStore, NewUrl, StoreError, UrlRecord};

pub fn alias(value: &str) -> Alias {
    Alias::new_unchecked(value)
}

pub fn ts(value: &str) -> Timestamp {
    value.parse().unwrap()
}

pub fn google(alias_value: &str) -> NewUrl {
    NewUrl::builder()
        .alias(alias(alias_value))
        .original_url("http://www.google.com")
        .expire_at(ts("2019-05-01T08:02:16Z"))
        .created_at(ts("2017-05-01T08:02:16Z"))
        .build()
}

pub async fn unknown_alias_is_absent<S: LinkStore>(store: &S) {
    assert!(!store.exists_by_alias(&alias("gg")).await.unwrap());

    let err = store.get_by_alias(&alias("gg")).await.unwrap_err();
    assert_eq!(err, StoreError::NotFound("gg".to_string()));
}

pub async fn create_then_read_back<S: LinkStore>(store: &S) {
    store.create(google("220uFicCJj")).await.unwrap();

    assert!(store.exists_by_alias(&alias("220uFicCJj")).await.unwrap());
    let got = store.get_by_alias(&alias("220uFicCJj")).await.unwrap();
    assert_eq!(
        got,
        UrlRecord {
            alias: alias("220uFicCJj"),
            original_url: "http://www.google.com".to_string(),
            expire_at: ts("2019-05-01T08:02:16Z"),
            created_at: ts("2017-05-01T08:02:16Z"),
            updated_at: None,
        }
    );
}

pub async fn duplicate_create_conflicts<S: LinkStore>(store: &S) {
    store.create(google("220uFicCJj")).await.unwrap();

    let err = store
        .create(
            NewUrl::builder()
                .alias(alias("220uFicCJj"))
                .original_url("http://www.facebook.com")
                .expire_at(ts("2018-04-02T08:02:16Z"))
                .build(),
        )
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::AliasConflict("220uFicCJj".to_string()));

    let got = store.get_by_alias(&alias("220uFicCJj")).await.unwrap();
    assert_eq!(got.original_url, "http://www.google.com");
    assert_eq!(got.expire_at, ts("2019-05-01T08:02:16Z"));
}

pub async fn aliases_match_exactly<S: LinkStore>(store: &S) {
    store.create(google("CaseSensitive")).await.unwrap();

    assert!(!store.exists_by_alias(&alias("casesensitive")).await.unwrap());
    store.create(google("casesensitive")).await.unwrap();
    assert!(store.exists_by_alias(&alias("casesensitive")).await.unwrap());
}

pub async fn updated_at_round_trips<S: LinkStore>(store: &S) {
    let url = NewUrl::builder()
        .alias(alias("touched"))
        .original_url("http://www.google.com")
        .expire_at(ts("2019-05-01T08:02:16.750Z"))
        .updated_at(ts("2018-01-01T00:00:00Z"))
        .build();
    store.create(url).await.unwrap();

    let got = store.get_by_alias(&alias("touched")).await.unwrap();
    assert_eq!(got.updated_at, Some(ts("2018-01-01T00:00:00Z")));
    assert_eq!(got.expire_at, ts("2019-05-01T08:02:16Z"));
}

pub async fn repeated_reads_are_identical<S: LinkStore>(store: &S) {
    store.create(google("gg")).await.unwrap();

    let first = store.get_by_alias(&alias("gg")).await.unwrap();
    let second = store.get_by_alias(&alias("gg")).await.unwrap();
    assert_eq!(first, second);
    assert!(store.exists_by_alias(&alias("gg")).await.unwrap());
    assert!(store.exists_by_alias(&alias("gg")).await.unwrap());
}

pub async fn concurrent_creates_have_one_winner<S: LinkStore>(store: Arc<S>, creators: usize) {
    let mut handles = Vec::with_capacity(creators);
    for i in 0..creators {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .create(
                    NewUrl::builder()
                        .alias(alias("contested"))
                        .original_url(format!("https://example{i}.com"))
                        .expire_at(ts("2030-01-01T00:00:00Z"))
                        .build(),
                )
                .await
        }));
    }

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => successes += 1,
            Err(StoreError::AliasConflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(conflicts, creators - 1);

    let got = store.get_by_alias(&alias("contested")).await.unwrap();
    let submitted: Vec<String> = (0..creators)
        .map(|i| format!("https://example{i}.com"))
        .collect();
    assert!(submitted.contains(&got.original_url));
}
