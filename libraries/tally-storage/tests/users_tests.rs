//! Integration tests for the users vertical slice
//!
//! Covers account creation, the unique-username constraint, lookup by name,
//! and credential retrieval.


use tally_core::types::CreateUser;
use tally_storage::StorageError;
use test_helpers::*;

#[tokio::test]
async fn test_create_and_find_user() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;
    assert_eq!(user.username, "alice");
    assert!(!user.id.as_str().is_empty());
    assert!(!user.created_at.is_empty());

    let found = tally_storage::users::find_by_username(pool, "alice")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(found.id, user.id);
    assert_eq!(found.username, "alice");
}

#[tokio::test]
async fn test_find_unknown_username_returns_none() {
    let test_db = TestDb::new().await;

    let found = tally_storage::users::find_by_username(test_db.pool(), "nobody")
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_user(pool, "alice").await;

    let result = tally_storage::users::create(
        pool,
        &CreateUser {
            username: "alice".to_string(),
            password_hash: "$2b$12$another.hash".to_string(),
        },
    )
    .await;

    assert!(matches!(result, Err(StorageError::Duplicate(_))));
}

#[tokio::test]
async fn test_password_hash_roundtrip() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = create_test_user(pool, "alice").await;

    let hash = tally_storage::users::get_password_hash(pool, &user.id)
        .await
        .unwrap()
        .expect("hash should exist");
    assert_eq!(hash, "$2b$12$test.hash.not.a.real.credential");
}

#[tokio::test]
async fn test_password_hash_for_unknown_user_is_none() {
    let test_db = TestDb::new().await;

    let hash = tally_storage::users::get_password_hash(
        test_db.pool(),
        &tally_core::types::UserId::generate(),
    )
    .await
    .unwrap();
    assert!(hash.is_none());
}

#[tokio::test]
async fn test_get_all_orders_by_username() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_user(pool, "carol").await;
    create_test_user(pool, "alice").await;
    create_test_user(pool, "bob").await;

    let users = tally_storage::users::get_all(pool).await.unwrap();
    let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob", "carol"]);
}
