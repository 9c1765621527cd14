//! Tests for the session store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::*;
use crate::domain::ports::{FixtureKeyValueStorage, MockKeyValueStorage};

fn sample_user() -> UserAccount {
    UserAccount {
        id: 7,
        name: "Ana Souza".to_owned(),
        email: "ana@fitgym.test".to_owned(),
    }
}

fn seeded_storage() -> Arc<FixtureKeyValueStorage> {
    let user_json = serde_json::to_string(&sample_user()).expect("user serialises");
    Arc::new(FixtureKeyValueStorage::with_entries([
        (TOKEN_KEY.to_owned(), "stored-token".to_owned()),
        (USER_KEY.to_owned(), user_json),
    ]))
}

#[test]
fn restores_token_and_user_from_storage() {
    let store = SessionStore::new(seeded_storage());

    assert_eq!(store.token().as_deref(), Some("stored-token"));
    assert_eq!(store.current_user(), Some(sample_user()));
    assert!(store.is_authenticated());
}

#[test]
fn starts_signed_out_when_storage_is_empty() {
    let store = SessionStore::new(Arc::new(FixtureKeyValueStorage::default()));

    assert!(store.token().is_none());
    assert!(store.current_user().is_none());
    assert!(!store.is_authenticated());
}

#[test]
fn blank_stored_token_counts_as_signed_out() {
    let storage = Arc::new(FixtureKeyValueStorage::with_entries([(
        TOKEN_KEY.to_owned(),
        String::new(),
    )]));
    let store = SessionStore::new(storage);

    assert!(!store.is_authenticated());
}

#[test]
fn corrupt_user_record_keeps_the_token() {
    let storage = Arc::new(FixtureKeyValueStorage::with_entries([
        (TOKEN_KEY.to_owned(), "stored-token".to_owned()),
        (USER_KEY.to_owned(), "{not json".to_owned()),
    ]));
    let store = SessionStore::new(storage);

    assert_eq!(store.token().as_deref(), Some("stored-token"));
    assert!(store.current_user().is_none());
}

#[test]
fn set_session_persists_both_keys() {
    let storage = Arc::new(FixtureKeyValueStorage::default());
    let store = SessionStore::new(storage.clone());

    store
        .set_session("issued-token", &sample_user())
        .expect("session persists");

    let stored_token = storage.read(TOKEN_KEY).expect("token readable");
    assert_eq!(stored_token.as_deref(), Some("issued-token"));
    let stored_user = storage
        .read(USER_KEY)
        .expect("user readable")
        .expect("user present");
    assert!(stored_user.contains("Ana Souza"));
    assert_eq!(
        store.bearer_header().as_deref(),
        Some("Bearer issued-token")
    );
}

#[test]
fn set_then_clear_leaves_storage_empty() {
    let storage = Arc::new(FixtureKeyValueStorage::default());
    let store = SessionStore::new(storage.clone());

    store
        .set_session("issued-token", &sample_user())
        .expect("session persists");
    store.clear_session().expect("session clears");

    assert!(storage.read(TOKEN_KEY).expect("readable").is_none());
    assert!(storage.read(USER_KEY).expect("readable").is_none());
    assert!(store.token().is_none());
    assert!(store.bearer_header().is_none());
}

#[test]
fn clear_session_without_a_session_is_safe() {
    let store = SessionStore::new(Arc::new(FixtureKeyValueStorage::default()));

    store.clear_session().expect("clearing nothing succeeds");
    store.clear_session().expect("clearing twice succeeds");
}

#[test]
fn set_session_rejects_an_empty_token() {
    let store = SessionStore::new(Arc::new(FixtureKeyValueStorage::default()));

    let error = store
        .set_session("", &sample_user())
        .expect_err("empty token must fail");
    assert!(matches!(error, ApiError::Validation { .. }));
    assert!(!store.is_authenticated());
}

#[test]
fn set_session_rolls_back_a_partial_write() {
    let mut storage = MockKeyValueStorage::new();
    storage.expect_read().returning(|_| Ok(None));
    storage
        .expect_write()
        .withf(|key, _| key == TOKEN_KEY)
        .return_once(|_, _| Ok(()));
    storage
        .expect_write()
        .withf(|key, _| key == USER_KEY)
        .return_once(|_, _| Err(KeyValueStorageError::write("disk full")));
    storage.expect_remove().times(2).returning(|_| Ok(()));

    let store = SessionStore::new(Arc::new(storage));
    let error = store
        .set_session("issued-token", &sample_user())
        .expect_err("failed persistence surfaces");

    assert!(matches!(error, ApiError::Storage { .. }));
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn restore_and_validate_without_a_token_skips_the_probe() {
    let store = SessionStore::new(Arc::new(FixtureKeyValueStorage::default()));
    let probed = AtomicBool::new(false);

    let valid = store
        .restore_and_validate(|| async {
            probed.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await;

    assert!(!valid);
    assert!(!probed.load(Ordering::SeqCst), "probe must not run");
}

#[tokio::test]
async fn restore_and_validate_keeps_a_confirmed_session() {
    let store = SessionStore::new(seeded_storage());

    let valid = store.restore_and_validate(|| async { Ok(()) }).await;

    assert!(valid);
    assert_eq!(store.token().as_deref(), Some("stored-token"));
    assert_eq!(store.current_user(), Some(sample_user()));
}

#[tokio::test]
async fn restore_and_validate_clears_a_rejected_session() {
    let storage = seeded_storage();
    let store = SessionStore::new(storage.clone());

    let valid = store
        .restore_and_validate(|| async { Err(ApiError::http(401_u16, "token expired")) })
        .await;

    assert!(!valid);
    assert!(store.token().is_none());
    assert!(storage.read(TOKEN_KEY).expect("readable").is_none());
    assert!(storage.read(USER_KEY).expect("readable").is_none());
}

#[tokio::test]
async fn restore_and_validate_keeps_the_session_on_network_failure() {
    let storage = seeded_storage();
    let store = SessionStore::new(storage.clone());

    let valid = store
        .restore_and_validate(|| async { Err(ApiError::network("connection refused")) })
        .await;

    assert!(!valid);
    assert_eq!(store.token().as_deref(), Some("stored-token"));
    assert_eq!(
        storage.read(TOKEN_KEY).expect("readable").as_deref(),
        Some("stored-token")
    );
}
