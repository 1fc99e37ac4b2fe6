//! Integration tests for user accounts: lookups, uniqueness, cascade delete.

use assert_matches::assert_matches;
use shelflife_db::models::review::ReviewPayload;
use shelflife_db::models::session::SessionPayload;
use shelflife_db::models::user::CreateUser;
use shelflife_db::models::work::WorkPayload;
use shelflife_db::repositories::{ReviewRepo, SessionRepo, UserRepo, WorkRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$placeholder$placeholder".to_string(),
        display_name: username.to_string(),
    }
}

fn new_work(title: &str) -> WorkPayload {
    WorkPayload {
        title: title.to_string(),
        ..WorkPayload::default()
    }
}

async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_and_find_user(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.display_name, "alice");

    let by_id = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(by_id.id, user.id);

    let by_username = UserRepo::find_by_username(&pool, "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_username.id, user.id);

    let by_email = UserRepo::find_by_email(&pool, "alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, user.id);

    assert!(UserRepo::exists_by_username(&pool, "alice").await.unwrap());
    assert!(!UserRepo::exists_by_username(&pool, "bob").await.unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_duplicate_username_hits_unique_index(pool: PgPool) {
    UserRepo::create(&pool, &new_user("alice")).await.unwrap();

    let mut dup = new_user("alice");
    dup.email = "other@example.com".to_string();
    let err = UserRepo::create(&pool, &dup).await.unwrap_err();

    assert_matches!(&err, sqlx::Error::Database(db_err) => {
        assert_eq!(db_err.code().as_deref(), Some("23505"));
        assert_eq!(db_err.constraint(), Some("uq_users_username"));
    });
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_duplicate_email_hits_unique_index(pool: PgPool) {
    UserRepo::create(&pool, &new_user("alice")).await.unwrap();

    let mut dup = new_user("bob");
    dup.email = "alice@example.com".to_string();
    let err = UserRepo::create(&pool, &dup).await.unwrap_err();

    assert_matches!(&err, sqlx::Error::Database(db_err) => {
        assert_eq!(db_err.constraint(), Some("uq_users_email"));
    });
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_user_cascades_all_owned_rows(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let bystander = UserRepo::create(&pool, &new_user("bob")).await.unwrap();

    let work = WorkRepo::create(&pool, user.id, &new_work("Dune")).await.unwrap();
    SessionRepo::create(&pool, user.id, work.id, &SessionPayload::default())
        .await
        .unwrap();
    ReviewRepo::upsert(
        &pool,
        user.id,
        work.id,
        &ReviewPayload {
            rating: Some(5),
            ..ReviewPayload::default()
        },
    )
    .await
    .unwrap();

    let other_work = WorkRepo::create(&pool, bystander.id, &new_work("Solaris"))
        .await
        .unwrap();

    let deleted = UserRepo::delete(&pool, user.id).await.unwrap();
    assert!(deleted);

    // All of alice's rows are gone; bob's are untouched.
    assert_eq!(count_rows(&pool, "users").await, 1);
    assert_eq!(count_rows(&pool, "works").await, 1);
    assert_eq!(count_rows(&pool, "sessions").await, 0);
    assert_eq!(count_rows(&pool, "reviews").await, 0);

    let survivor = WorkRepo::find_owned(&pool, bystander.id, other_work.id)
        .await
        .unwrap();
    assert!(survivor.is_some());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_missing_user_returns_false(pool: PgPool) {
    let deleted = UserRepo::delete(&pool, 424242).await.unwrap();
    assert!(!deleted);
}
