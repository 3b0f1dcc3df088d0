use learningstack_core::model::{Session, User};
use storage::repository::{ClientStorage, Storage, TOKEN_KEY, USER_KEY};
use storage::sqlite::SqliteRepository;

fn student() -> User {
    User {
        name: "Grace".into(),
        email: "grace@example.com".into(),
        phone: Some("555-0100".into()),
        role: "student".into(),
        ..User::default()
    }
}

#[tokio::test]
async fn sqlite_set_overwrites_and_remove_deletes() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get("missing").await.unwrap(), None);

    repo.set(TOKEN_KEY, "first").await.unwrap();
    repo.set(TOKEN_KEY, "second").await.unwrap();
    assert_eq!(repo.get(TOKEN_KEY).await.unwrap().as_deref(), Some("second"));

    repo.remove(TOKEN_KEY).await.unwrap();
    assert_eq!(repo.get(TOKEN_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(applied, 1);
}

#[tokio::test]
async fn sqlite_storage_keeps_session_across_handles() {
    let url = "sqlite:file:memdb_session?mode=memory&cache=shared";
    let storage = Storage::sqlite(url).await.expect("storage");
    let session = Session {
        token: "abc".into(),
        user: student(),
    };
    storage.save_session(&session).await.unwrap();

    // A second handle on the same shared-cache database sees the session.
    let reopened = Storage::sqlite(url).await.expect("reopen");
    assert_eq!(reopened.session().await.unwrap(), Some(session));

    reopened.clear_session().await.unwrap();
    assert_eq!(storage.client.get(USER_KEY).await.unwrap(), None);
    assert_eq!(storage.token().await.unwrap(), None);
}
