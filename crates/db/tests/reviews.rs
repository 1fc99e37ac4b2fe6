//! Integration tests for reviews: one-per-(user, work) upsert semantics,
//! the explicit "no review yet" lookup, and ownership scoping.

use shelflife_db::models::review::ReviewPayload;
use shelflife_db::models::user::CreateUser;
use shelflife_db::models::work::WorkPayload;
use shelflife_db::repositories::{ReviewRepo, UserRepo, WorkRepo};
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

fn review(rating: i32, title: &str) -> ReviewPayload {
    ReviewPayload {
        rating: Some(rating),
        title: Some(title.to_string()),
        ..ReviewPayload::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_for_work_is_none_before_first_review(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let work = WorkRepo::create(&pool, user.id, &new_work("Dune")).await.unwrap();

    let absent = ReviewRepo::find_for_work(&pool, user.id, work.id).await.unwrap();
    assert!(absent.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_upsert_updates_in_place(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let work = WorkRepo::create(&pool, user.id, &new_work("Dune")).await.unwrap();

    let first = ReviewRepo::upsert(&pool, user.id, work.id, &review(3, "decent"))
        .await
        .unwrap();
    let second = ReviewRepo::upsert(&pool, user.id, work.id, &review(5, "grew on me"))
        .await
        .unwrap();

    // Same row, new content.
    assert_eq!(second.id, first.id);
    assert_eq!(second.rating, 5);
    assert_eq!(second.title.as_deref(), Some("grew on me"));
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);

    // Exactly one row exists for the pair.
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM reviews WHERE user_id = $1 AND work_id = $2",
    )
    .bind(user.id)
    .bind(work.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_separate_works_get_separate_reviews(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let dune = WorkRepo::create(&pool, user.id, &new_work("Dune")).await.unwrap();
    let solaris = WorkRepo::create(&pool, user.id, &new_work("Solaris")).await.unwrap();

    ReviewRepo::upsert(&pool, user.id, dune.id, &review(4, "sand"))
        .await
        .unwrap();
    ReviewRepo::upsert(&pool, user.id, solaris.id, &review(5, "ocean"))
        .await
        .unwrap();

    let reviews = ReviewRepo::list_for_user(&pool, user.id).await.unwrap();
    assert_eq!(reviews.len(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_is_private_defaults_to_false_and_round_trips(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let work = WorkRepo::create(&pool, user.id, &new_work("Dune")).await.unwrap();

    let public = ReviewRepo::upsert(&pool, user.id, work.id, &review(4, "open book"))
        .await
        .unwrap();
    assert!(!public.is_private);

    let private = ReviewRepo::upsert(
        &pool,
        user.id,
        work.id,
        &ReviewPayload {
            rating: Some(4),
            is_private: true,
            ..ReviewPayload::default()
        },
    )
    .await
    .unwrap();
    assert!(private.is_private);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_reviews_are_ownership_scoped(pool: PgPool) {
    let alice = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let bob = UserRepo::create(&pool, &new_user("bob")).await.unwrap();
    let work = WorkRepo::create(&pool, alice.id, &new_work("Dune")).await.unwrap();

    let created = ReviewRepo::upsert(&pool, alice.id, work.id, &review(4, "sand"))
        .await
        .unwrap();

    assert!(ReviewRepo::find_owned(&pool, bob.id, created.id)
        .await
        .unwrap()
        .is_none());
    assert!(ReviewRepo::find_for_work(&pool, bob.id, work.id)
        .await
        .unwrap()
        .is_none());
    assert!(!ReviewRepo::delete_owned(&pool, bob.id, created.id).await.unwrap());

    assert!(ReviewRepo::delete_owned(&pool, alice.id, created.id).await.unwrap());
    assert!(ReviewRepo::find_for_work(&pool, alice.id, work.id)
        .await
        .unwrap()
        .is_none());
}
