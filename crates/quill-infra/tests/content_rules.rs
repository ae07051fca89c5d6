//! Content store integrity rules, exercised through `BlogService`.

use std::sync::Arc;

use chrono::{NaiveDate, TimeDelta, Utc};

use quill_core::domain::{Identity, NewContactMessage, NewPost, PostContent, Role};
use quill_core::error::DomainError;
use quill_core::ports::{PostRepository, UserRepository};
use quill_core::services::{AuthGateway, BlogService};
use quill_infra::{Argon2PasswordService, InMemoryStore, JwtConfig, JwtTokenService};

struct Fixture {
    store: Arc<InMemoryStore>,
    auth: AuthGateway,
    blog: BlogService,
}

impl Fixture {
    fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let auth = AuthGateway::new(
            store.clone(),
            Arc::new(Argon2PasswordService::new()),
            Arc::new(JwtTokenService::new(JwtConfig::default())),
        );
        let blog = BlogService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        );
        Self { store, auth, blog }
    }

    async fn user(&self, name: &str) -> Identity {
        self.auth.register(name, "pw").await.unwrap().into()
    }

    async fn admin(&self, name: &str) -> Identity {
        self.auth.create_admin(name, "pw").await.unwrap().into()
    }
}

fn content(title: &str) -> PostContent {
    PostContent {
        category: "general".to_string(),
        title: title.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_post_stamps_today() {
    let fx = Fixture::new();

    let post = fx.blog.create_post(content("First")).await.unwrap();

    assert_eq!(post.created_at, Utc::now().date_naive());
    assert_eq!(fx.blog.get_post(post.id).await.unwrap(), post);
}

#[tokio::test]
async fn update_replaces_fields_wholesale() {
    let fx = Fixture::new();
    let mut original = content("Draft");
    original.quote = Some("To be".to_string());
    original.image1 = Some("http://host/uploads/a.png".to_string());
    let post = fx.blog.create_post(original).await.unwrap();

    let updated = fx
        .blog
        .update_post(post.id, content("Final"), None)
        .await
        .unwrap();

    assert_eq!(updated.content.title, "Final");
    assert_eq!(updated.content.quote, None);
    assert_eq!(updated.content.image1, None);
    assert_eq!(updated.created_at, post.created_at);
}

#[tokio::test]
async fn update_can_overwrite_creation_date() {
    let fx = Fixture::new();
    let post = fx.blog.create_post(content("Old news")).await.unwrap();
    let backdated = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

    let updated = fx
        .blog
        .update_post(post.id, content("Old news"), Some(backdated))
        .await
        .unwrap();

    assert_eq!(updated.created_at, backdated);
}

#[tokio::test]
async fn missing_post_is_not_found() {
    let fx = Fixture::new();

    assert!(matches!(
        fx.blog.get_post(1).await,
        Err(DomainError::NotFound { entity_type: "Post", id: 1 })
    ));
    assert!(matches!(
        fx.blog.update_post(1, content("x"), None).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        fx.blog.delete_post(1).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn recent_returns_six_newest_first() {
    let fx = Fixture::new();
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    // Insert out of date order so the ordering is not just insertion order.
    for offset in [3, 9, 0, 7, 1, 8, 2, 6, 4, 5] {
        PostRepository::create(
            fx.store.as_ref(),
            NewPost {
                content: content(&format!("Day {offset}")),
                created_at: base + TimeDelta::days(offset),
            },
        )
        .await
        .unwrap();
    }

    let recent = fx.blog.recent_posts().await.unwrap();

    assert_eq!(recent.len(), 6);
    let dates: Vec<NaiveDate> = recent.iter().map(|p| p.created_at).collect();
    let expected: Vec<NaiveDate> = (4..=9)
        .rev()
        .map(|offset| base + TimeDelta::days(offset))
        .collect();
    assert_eq!(dates, expected);
}

#[tokio::test]
async fn duplicate_like_is_rejected_and_one_row_remains() {
    let fx = Fixture::new();
    let reader = fx.user("reader").await;
    let post = fx.blog.create_post(content("Likeable")).await.unwrap();

    fx.blog.like_post(&reader, post.id).await.unwrap();
    let second = fx.blog.like_post(&reader, post.id).await;

    assert!(matches!(second, Err(DomainError::Duplicate(_))));
    assert_eq!(fx.blog.like_count(post.id).await.unwrap(), 1);
    assert!(fx.blog.is_liked_by(&reader, post.id).await.unwrap());
}

#[tokio::test]
async fn concurrent_likes_produce_exactly_one_row() {
    let fx = Fixture::new();
    let reader = fx.user("reader").await;
    let post_id = fx.blog.create_post(content("Race")).await.unwrap().id;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let blog = fx.blog.clone();
            let reader = reader.clone();
            tokio::spawn(async move { blog.like_post(&reader, post_id).await })
        })
        .collect();
    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(
        results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| matches!(r, Err(DomainError::Duplicate(_))))
    );
    assert_eq!(fx.blog.like_count(post_id).await.unwrap(), 1);
}

#[tokio::test]
async fn liking_a_missing_post_is_not_found() {
    let fx = Fixture::new();
    let reader = fx.user("reader").await;

    assert!(matches!(
        fx.blog.like_post(&reader, 77).await,
        Err(DomainError::NotFound { entity_type: "Post", .. })
    ));
}

#[tokio::test]
async fn unlike_removes_only_the_callers_like() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;
    let bob = fx.user("bob").await;
    let post = fx.blog.create_post(content("Shared")).await.unwrap();
    fx.blog.like_post(&alice, post.id).await.unwrap();
    fx.blog.like_post(&bob, post.id).await.unwrap();

    fx.blog.unlike_post(&alice, post.id).await.unwrap();

    assert_eq!(fx.blog.like_count(post.id).await.unwrap(), 1);
    assert!(!fx.blog.is_liked_by(&alice, post.id).await.unwrap());
    assert!(fx.blog.is_liked_by(&bob, post.id).await.unwrap());
    assert!(matches!(
        fx.blog.unlike_post(&alice, post.id).await,
        Err(DomainError::NotFound { entity_type: "Like", .. })
    ));
}

#[tokio::test]
async fn deleting_post_cascades_to_comments_and_likes() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;
    let bob = fx.user("bob").await;
    let doomed = fx.blog.create_post(content("Doomed")).await.unwrap();
    let survivor = fx.blog.create_post(content("Survivor")).await.unwrap();

    for author in [&alice, &bob, &alice] {
        fx.blog
            .add_comment(author, doomed.id, "hello".to_string())
            .await
            .unwrap();
    }
    fx.blog.like_post(&alice, doomed.id).await.unwrap();
    fx.blog.like_post(&bob, doomed.id).await.unwrap();
    fx.blog
        .add_comment(&bob, survivor.id, "still here".to_string())
        .await
        .unwrap();
    fx.blog.like_post(&alice, survivor.id).await.unwrap();

    let deleted = fx.blog.delete_post(doomed.id).await.unwrap();

    assert_eq!(deleted.id, doomed.id);
    assert!(fx.blog.comments_for_post(doomed.id).await.unwrap().is_empty());
    assert_eq!(fx.blog.like_count(doomed.id).await.unwrap(), 0);
    assert!(matches!(
        fx.blog.get_post(doomed.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert_eq!(fx.blog.comments_for_post(survivor.id).await.unwrap().len(), 1);
    assert_eq!(fx.blog.like_count(survivor.id).await.unwrap(), 1);
}

#[tokio::test]
async fn deleting_user_cascades_to_their_comments_and_likes() {
    let fx = Fixture::new();
    let alice = fx.user("alice").await;
    let bob = fx.user("bob").await;
    let admin = fx.admin("root").await;
    let post = fx.blog.create_post(content("Thread")).await.unwrap();
    fx.blog
        .add_comment(&alice, post.id, "from alice".to_string())
        .await
        .unwrap();
    fx.blog
        .add_comment(&bob, post.id, "from bob".to_string())
        .await
        .unwrap();
    fx.blog.like_post(&alice, post.id).await.unwrap();

    fx.auth.delete_user(&admin, alice.id).await.unwrap();

    let remaining = fx.blog.comments_for_post(post.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].user_id, bob.id);
    assert_eq!(fx.blog.like_count(post.id).await.unwrap(), 0);
    assert!(fx.store.find_by_username("alice").await.unwrap().is_none());
}

#[tokio::test]
async fn stranger_cannot_delete_comment() {
    let fx = Fixture::new();
    let author = fx.user("author").await;
    let stranger = fx.user("stranger").await;
    let post = fx.blog.create_post(content("Thread")).await.unwrap();
    let comment = fx
        .blog
        .add_comment(&author, post.id, "mine".to_string())
        .await
        .unwrap();

    let result = fx.blog.delete_comment(&stranger, comment.id).await;

    assert!(matches!(result, Err(DomainError::Forbidden(_))));
    assert_eq!(fx.blog.comments_for_post(post.id).await.unwrap(), vec![comment]);
}

#[tokio::test]
async fn author_and_admin_can_delete_comments() {
    let fx = Fixture::new();
    let author = fx.user("author").await;
    let admin = fx.admin("root").await;
    let post = fx.blog.create_post(content("Thread")).await.unwrap();
    let first = fx
        .blog
        .add_comment(&author, post.id, "one".to_string())
        .await
        .unwrap();
    let second = fx
        .blog
        .add_comment(&author, post.id, "two".to_string())
        .await
        .unwrap();

    fx.blog.delete_comment(&author, first.id).await.unwrap();
    fx.blog.delete_comment(&admin, second.id).await.unwrap();

    assert!(fx.blog.comments_for_post(post.id).await.unwrap().is_empty());
    assert!(matches!(
        fx.blog.delete_comment(&admin, second.id).await,
        Err(DomainError::NotFound { entity_type: "Comment", .. })
    ));
}

#[tokio::test]
async fn comment_author_is_the_caller() {
    let fx = Fixture::new();
    let author = fx.user("author").await;
    let post = fx.blog.create_post(content("Thread")).await.unwrap();

    let comment = fx
        .blog
        .add_comment(&author, post.id, "hi".to_string())
        .await
        .unwrap();

    assert_eq!(comment.user_id, author.id);
    assert_eq!(comment.post_id, post.id);
    assert!(comment.created_at <= Utc::now());
}

#[tokio::test]
async fn duplicate_subscription_is_rejected() {
    let fx = Fixture::new();

    fx.blog
        .subscribe("reader@example.com".to_string())
        .await
        .unwrap();
    let second = fx.blog.subscribe("reader@example.com".to_string()).await;

    assert!(matches!(second, Err(DomainError::Duplicate(_))));
    assert_eq!(fx.blog.subscriptions().await.unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_subscription_email_is_rejected() {
    let fx = Fixture::new();

    for bad in ["not-an-email", "a@@b.com", "a@b..com"] {
        assert!(matches!(
            fx.blog.subscribe(bad.to_string()).await,
            Err(DomainError::Validation(_))
        ));
    }
    assert!(fx.blog.subscriptions().await.unwrap().is_empty());
}

#[tokio::test]
async fn contact_messages_are_appended() {
    let fx = Fixture::new();
    let message = NewContactMessage {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        phone: None,
        subject: "Hello".to_string(),
        message: "Lovely blog".to_string(),
    };

    let first = fx.blog.submit_contact(message.clone()).await.unwrap();
    let second = fx.blog.submit_contact(message).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(fx.blog.contact_messages().await.unwrap().len(), 2);
}

#[tokio::test]
async fn registration_grants_user_role() {
    let fx = Fixture::new();
    let reader = fx.user("reader").await;
    let editor = fx.admin("editor").await;

    assert_eq!(reader.role, Role::User);
    assert_eq!(editor.role, Role::Admin);
}
