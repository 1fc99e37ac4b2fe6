//! Integration tests for tracking sessions: start-time defaulting, ordering,
//! work reassignment, and ownership scoping.

use shelflife_db::models::session::SessionPayload;
use shelflife_db::models::user::CreateUser;
use shelflife_db::models::work::WorkPayload;
use shelflife_db::repositories::{SessionRepo, UserRepo, WorkRepo};
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

fn session_started_at(offset_mins: i64) -> SessionPayload {
    SessionPayload {
        started_at: Some(chrono::Utc::now() - chrono::Duration::minutes(offset_mins)),
        ..SessionPayload::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_started_at_defaults_to_now(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let work = WorkRepo::create(&pool, user.id, &new_work("Dune")).await.unwrap();

    let before = chrono::Utc::now() - chrono::Duration::seconds(5);
    let session = SessionRepo::create(&pool, user.id, work.id, &SessionPayload::default())
        .await
        .unwrap();

    let started_at = session.started_at.expect("default should be set");
    assert!(started_at >= before);
    assert_eq!(session.work_id, work.id);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_orders_most_recent_first_nulls_last(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let work = WorkRepo::create(&pool, user.id, &new_work("Dune")).await.unwrap();

    let older = SessionRepo::create(&pool, user.id, work.id, &session_started_at(120))
        .await
        .unwrap();
    let newer = SessionRepo::create(&pool, user.id, work.id, &session_started_at(10))
        .await
        .unwrap();

    // A full-replace update can clear started_at; such sessions sort last.
    let cleared = SessionRepo::create(&pool, user.id, work.id, &session_started_at(1))
        .await
        .unwrap();
    let cleared = SessionRepo::update_owned(
        &pool,
        user.id,
        cleared.id,
        work.id,
        &SessionPayload::default(),
    )
    .await
    .unwrap()
    .unwrap();
    assert!(cleared.started_at.is_none());

    let sessions = SessionRepo::list_for_user(&pool, user.id).await.unwrap();
    let ids: Vec<i64> = sessions.iter().map(|s| s.id).collect();
    assert_eq!(ids, [newer.id, older.id, cleared.id]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_for_work_filters_to_that_work(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let dune = WorkRepo::create(&pool, user.id, &new_work("Dune")).await.unwrap();
    let solaris = WorkRepo::create(&pool, user.id, &new_work("Solaris")).await.unwrap();

    SessionRepo::create(&pool, user.id, dune.id, &SessionPayload::default())
        .await
        .unwrap();
    SessionRepo::create(&pool, user.id, solaris.id, &SessionPayload::default())
        .await
        .unwrap();

    let sessions = SessionRepo::list_for_work(&pool, user.id, dune.id).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].work_id, dune.id);

    let all = SessionRepo::list_for_user(&pool, user.id).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_can_reassign_work(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let dune = WorkRepo::create(&pool, user.id, &new_work("Dune")).await.unwrap();
    let solaris = WorkRepo::create(&pool, user.id, &new_work("Solaris")).await.unwrap();

    let session = SessionRepo::create(
        &pool,
        user.id,
        dune.id,
        &SessionPayload {
            minutes: Some(45),
            note: Some("first sitting".to_string()),
            ..SessionPayload::default()
        },
    )
    .await
    .unwrap();

    let updated = SessionRepo::update_owned(
        &pool,
        user.id,
        session.id,
        solaris.id,
        &SessionPayload {
            minutes: Some(60),
            ..SessionPayload::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.work_id, solaris.id);
    assert_eq!(updated.minutes, Some(60));
    // Full replace: the note was not carried over.
    assert!(updated.note.is_none());
    assert_eq!(updated.created_at, session.created_at);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_sessions_are_ownership_scoped(pool: PgPool) {
    let alice = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let bob = UserRepo::create(&pool, &new_user("bob")).await.unwrap();
    let work = WorkRepo::create(&pool, alice.id, &new_work("Dune")).await.unwrap();

    let session = SessionRepo::create(&pool, alice.id, work.id, &SessionPayload::default())
        .await
        .unwrap();

    assert!(SessionRepo::find_owned(&pool, bob.id, session.id)
        .await
        .unwrap()
        .is_none());
    assert!(!SessionRepo::delete_owned(&pool, bob.id, session.id).await.unwrap());
    assert!(SessionRepo::list_for_user(&pool, bob.id).await.unwrap().is_empty());

    // Still there for its owner.
    assert!(SessionRepo::find_owned(&pool, alice.id, session.id)
        .await
        .unwrap()
        .is_some());
}
