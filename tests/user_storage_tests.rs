/// SQLite user storage: CRUD, friendship edges, friend queries
mod common;

use chrono::NaiveDate;
use cinetrack::error::ApiError;
use cinetrack::models::User;
use cinetrack::storage::{UserDbStorage, UserStorage};

async fn create_user(storage: &UserDbStorage, login: &str) -> User {
    storage
        .create(User {
            id: 0,
            email: format!("{login}@example.com"),
            login: login.to_string(),
            name: login.to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn create_and_find_round_trip() {
    let storage = UserDbStorage::new(common::test_pool().await);

    let created = create_user(&storage, "alice").await;
    assert!(created.id > 0);

    let fetched = storage.find_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn ids_are_monotonic() {
    let storage = UserDbStorage::new(common::test_pool().await);

    let a = create_user(&storage, "alice").await;
    let b = create_user(&storage, "bob").await;
    assert!(b.id > a.id);
}

#[tokio::test]
async fn update_replaces_every_field() {
    let storage = UserDbStorage::new(common::test_pool().await);

    let created = create_user(&storage, "alice").await;
    let updated = storage
        .update(User {
            id: created.id,
            email: "new@example.com".to_string(),
            login: "newlogin".to_string(),
            name: "New Name".to_string(),
            birthday: NaiveDate::from_ymd_opt(1985, 3, 2).unwrap(),
        })
        .await
        .unwrap();

    let fetched = storage.find_by_id(created.id).await.unwrap();
    assert_eq!(fetched, updated);
    assert_eq!(fetched.email, "new@example.com");
    assert_eq!(fetched.login, "newlogin");
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let storage = UserDbStorage::new(common::test_pool().await);

    let err = storage
        .update(User {
            id: 42,
            email: "a@b.c".to_string(),
            login: "a".to_string(),
            name: "a".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn find_by_unknown_id_is_not_found() {
    let storage = UserDbStorage::new(common::test_pool().await);

    let err = storage.find_by_id(999).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn find_all_orders_by_ascending_id() {
    let storage = UserDbStorage::new(common::test_pool().await);

    let a = create_user(&storage, "alice").await;
    let b = create_user(&storage, "bob").await;
    let c = create_user(&storage, "carol").await;

    let all = storage.find_all().await.unwrap();
    assert_eq!(
        all.iter().map(|u| u.id).collect::<Vec<_>>(),
        vec![a.id, b.id, c.id]
    );
}

#[tokio::test]
async fn adding_the_same_friend_edge_twice_is_idempotent() {
    let storage = UserDbStorage::new(common::test_pool().await);

    let alice = create_user(&storage, "alice").await;
    let bob = create_user(&storage, "bob").await;

    storage.add_friend(alice.id, bob.id).await.unwrap();
    storage.add_friend(alice.id, bob.id).await.unwrap();

    let friends = storage.find_friends(alice.id).await.unwrap();
    assert_eq!(friends.iter().map(|u| u.id).collect::<Vec<_>>(), vec![bob.id]);
}

#[tokio::test]
async fn friendship_is_asymmetric() {
    let storage = UserDbStorage::new(common::test_pool().await);

    let alice = create_user(&storage, "alice").await;
    let bob = create_user(&storage, "bob").await;

    storage.add_friend(alice.id, bob.id).await.unwrap();

    assert_eq!(storage.find_friends(alice.id).await.unwrap().len(), 1);
    assert!(storage.find_friends(bob.id).await.unwrap().is_empty());

    // Reciprocating creates the reverse edge
    storage.add_friend(bob.id, alice.id).await.unwrap();
    let bobs = storage.find_friends(bob.id).await.unwrap();
    assert_eq!(bobs.iter().map(|u| u.id).collect::<Vec<_>>(), vec![alice.id]);
}

#[tokio::test]
async fn removing_an_absent_edge_is_a_silent_no_op() {
    let storage = UserDbStorage::new(common::test_pool().await);

    let alice = create_user(&storage, "alice").await;
    let bob = create_user(&storage, "bob").await;

    storage.remove_friend(alice.id, bob.id).await.unwrap();
    assert!(storage.find_friends(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn common_friends_is_the_id_intersection_in_ascending_order() {
    let storage = UserDbStorage::new(common::test_pool().await);

    let alice = create_user(&storage, "alice").await;
    let bob = create_user(&storage, "bob").await;
    let carol = create_user(&storage, "carol").await;
    let dave = create_user(&storage, "dave").await;

    storage.add_friend(alice.id, carol.id).await.unwrap();
    storage.add_friend(alice.id, dave.id).await.unwrap();
    storage.add_friend(bob.id, carol.id).await.unwrap();
    storage.add_friend(bob.id, dave.id).await.unwrap();

    let common = storage.find_common_friends(alice.id, bob.id).await.unwrap();
    assert_eq!(
        common.iter().map(|u| u.id).collect::<Vec<_>>(),
        vec![carol.id, dave.id]
    );

    storage.remove_friend(bob.id, carol.id).await.unwrap();
    let common = storage.find_common_friends(alice.id, bob.id).await.unwrap();
    assert_eq!(common.iter().map(|u| u.id).collect::<Vec<_>>(), vec![dave.id]);
}

#[tokio::test]
async fn require_exists_guards_against_missing_ids() {
    let storage = UserDbStorage::new(common::test_pool().await);

    let alice = create_user(&storage, "alice").await;
    assert!(storage.require_exists(alice.id).await.is_ok());

    let err = storage.require_exists(999).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
