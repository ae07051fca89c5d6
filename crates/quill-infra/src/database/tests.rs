use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

use quill_core::domain::Role;
use quill_core::error::RepoError;
use quill_core::ports::{CommentRepository, LikeRepository, PostRepository, UserRepository};

use crate::database::entity::{post, user};
use crate::database::postgres_repo::{PostgresStore, map_db_err};

fn post_model(id: i32, title: &str, created_at: NaiveDate) -> post::Model {
    post::Model {
        id,
        category: "travel".to_owned(),
        created_at,
        title: title.to_owned(),
        image1: None,
        intro_content: Some("Intro".to_owned()),
        content1: None,
        quote: None,
        quote_author: None,
        main_content: None,
        image2: None,
        final_content: None,
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(3, "Test Post", date)]])
        .into_connection();

    let store = PostgresStore::new(db);

    let post = PostRepository::find_by_id(&store, 3).await.unwrap().unwrap();

    assert_eq!(post.id, 3);
    assert_eq!(post.content.title, "Test Post");
    assert_eq!(post.content.intro_content.as_deref(), Some("Intro"));
    assert_eq!(post.created_at, date);
}

#[tokio::test]
async fn test_find_user_by_username_maps_role() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user::Model {
            id: 1,
            username: "admin".to_owned(),
            hashed_password: "$argon2id$stub".to_owned(),
            role: user::DbRole::Admin,
        }]])
        .into_connection();

    let store = PostgresStore::new(db);

    let found = store.find_by_username("admin").await.unwrap().unwrap();

    assert_eq!(found.id, 1);
    assert_eq!(found.role, Role::Admin);
    assert_eq!(found.password_hash, "$argon2id$stub");
}

#[tokio::test]
async fn test_delete_missing_comment_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let store = PostgresStore::new(db);

    let result = CommentRepository::delete(&store, 42).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_unlike_deletes_one_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let store = PostgresStore::new(db);

    assert!(LikeRepository::delete(&store, 1, 2).await.is_ok());
}

#[tokio::test]
async fn test_delete_post_cascades_in_transaction() {
    let date = Utc::now().date_naive();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(5, "Doomed", date)]])
        .append_exec_results(vec![
            // comments
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            },
            // likes
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            },
            // post
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
        ])
        .into_connection();

    let store = PostgresStore::new(db);

    let deleted = PostRepository::delete(&store, 5).await.unwrap();
    assert_eq!(deleted.id, 5);
    assert_eq!(deleted.content.title, "Doomed");
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let store = PostgresStore::new(db);

    let result = PostRepository::delete(&store, 404).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_replace_of_post_deleted_mid_update_is_not_found() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    // The lookup finds the row; the UPDATE ... RETURNING comes back empty.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(8, "Vanishing", date)], vec![]])
        .into_connection();

    let store = PostgresStore::new(db);

    let content = quill_core::domain::PostContent {
        category: "travel".to_owned(),
        title: "Rewritten".to_owned(),
        ..Default::default()
    };
    let result = PostRepository::replace(&store, 8, content, None).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[test]
fn test_db_errors_are_classified() {
    assert!(matches!(
        map_db_err(DbErr::RecordNotFound("post".into())),
        RepoError::NotFound
    ));
    assert!(matches!(
        map_db_err(DbErr::RecordNotUpdated),
        RepoError::NotFound
    ));
    assert!(matches!(
        map_db_err(DbErr::Custom("boom".into())),
        RepoError::Query(_)
    ));
}

#[test]
fn test_role_column_conversions() {
    assert_eq!(Role::from(user::DbRole::User), Role::User);
    assert_eq!(user::DbRole::from(Role::Admin), user::DbRole::Admin);
}
