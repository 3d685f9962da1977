use blog_core::domain::category::CreateCategoryRequest;
use blog_core::domain::comment::NewCommentRequest;
use blog_core::domain::post::{CreatePostRequest, PostStatus, UpdatePostRequest};
use blog_core::infrastructure::settings::Settings;
use blog_core::{Actor, Blog, DomainError};

fn create_post(title: &str, category_id: Option<i64>, status: PostStatus) -> CreatePostRequest {
    CreatePostRequest {
        title: title.to_string(),
        content: format!("{title} content {}", "x".repeat(50)),
        excerpt: String::new(),
        category_id,
        featured_image: None,
        status,
    }
}

fn update_post(post: &blog_core::domain::post::Post, status: PostStatus) -> UpdatePostRequest {
    UpdatePostRequest {
        title: post.title.clone(),
        content: post.content.clone(),
        excerpt: post.excerpt.clone(),
        category_id: post.category_id,
        featured_image: post.featured_image.clone(),
        status,
    }
}

#[tokio::test]
async fn publish_flow_keeps_slug_and_published_at() {
    blog_core::infrastructure::logging::init_logging("warn").ok();
    let blog = Blog::in_memory(Settings::default());
    let admin = Actor::admin(1);
    let author = Actor::user(10);

    let tech = blog
        .categories
        .create(
            &admin,
            CreateCategoryRequest {
                name: "Tech".to_string(),
                description: "tech posts".to_string(),
            },
        )
        .await
        .expect("category must be created");
    assert_eq!(tech.slug, "tech");

    let post = blog
        .posts
        .create(
            &author,
            create_post("Hello World", Some(tech.id), PostStatus::Draft),
        )
        .await
        .expect("post must be created");
    assert_eq!(post.slug, "hello-world");
    assert!(post.published_at.is_none());

    let published = blog
        .posts
        .update(&author, "hello-world", update_post(&post, PostStatus::Published))
        .await
        .expect("publish must succeed");
    let first_published_at = published
        .published_at
        .expect("published_at must be stamped");

    let mut retitled = update_post(&published, PostStatus::Published);
    retitled.title = "Hello World, Revised".to_string();
    let edited = blog
        .posts
        .update(&author, "hello-world", retitled)
        .await
        .expect("edit must succeed");

    assert_eq!(edited.title, "Hello World, Revised");
    assert_eq!(edited.slug, "hello-world", "slug survives the retitle");
    assert_eq!(edited.published_at, Some(first_published_at));
}

#[tokio::test]
async fn moderation_flow_for_a_non_owner_comment() {
    let blog = Blog::in_memory(Settings::default());
    let admin = Actor::admin(1);
    let author = Actor::user(10);
    let visitor = Actor::user(20);

    let post = blog
        .posts
        .create(&author, create_post("Open Thread", None, PostStatus::Published))
        .await
        .expect("post must be created");

    // a visitor cannot edit someone else's post
    let err = blog
        .posts
        .update(&visitor, &post.slug, update_post(&post, PostStatus::Published))
        .await
        .expect_err("non-owner edit must fail");
    assert!(matches!(err, DomainError::Forbidden));

    // but can comment, landing in the moderation queue
    let comment = blog
        .comments
        .submit(
            &visitor,
            &post.slug,
            NewCommentRequest {
                content: "first!".to_string(),
            },
        )
        .await
        .expect("comment must be created");
    assert!(!comment.approved);

    let public = blog
        .comments
        .list_for_post(&Actor::Anonymous, &post.slug)
        .await
        .expect("list must succeed");
    assert!(public.is_empty(), "pending comments stay invisible");

    let detail = blog
        .posts
        .get_detail(&Actor::Anonymous, &post.slug)
        .await
        .expect("detail must succeed");
    assert_eq!(detail.approved_comment_count, 0);

    blog.comments
        .approve(&admin, comment.id)
        .await
        .expect("approve must succeed");

    let public = blog
        .comments
        .list_for_post(&Actor::Anonymous, &post.slug)
        .await
        .expect("list must succeed");
    assert_eq!(public.iter().map(|c| c.id).collect::<Vec<_>>(), [comment.id]);

    let detail = blog
        .posts
        .get_detail(&Actor::Anonymous, &post.slug)
        .await
        .expect("detail must succeed");
    assert_eq!(detail.approved_comment_count, 1);
}

#[tokio::test]
async fn duplicate_titles_never_share_a_slug() {
    let blog = Blog::in_memory(Settings::default());

    let first = blog
        .posts
        .create(&Actor::user(10), create_post("Same Title", None, PostStatus::Published))
        .await
        .expect("first create must succeed");
    let second = blog
        .posts
        .create(&Actor::user(20), create_post("Same Title", None, PostStatus::Published))
        .await
        .expect("second create must succeed");

    assert_eq!(first.slug, "same-title");
    assert_eq!(second.slug, "same-title-2");
    assert_ne!(first.slug, second.slug);
}

#[tokio::test]
async fn hidden_drafts_leak_nothing() {
    let blog = Blog::in_memory(Settings::default());
    let author = Actor::user(10);

    let secret = "the launch happens on friday";
    let mut request = create_post("Quiet Plans", None, PostStatus::Draft);
    request.content = format!("{secret} {}", "x".repeat(50));
    blog.posts
        .create(&author, request)
        .await
        .expect("post must be created");

    let err = blog
        .posts
        .get_detail(&Actor::Anonymous, "quiet-plans")
        .await
        .expect_err("draft must be hidden");
    assert!(matches!(err, DomainError::NotFound(_)));
    assert!(
        !err.to_string().contains(secret),
        "the error must not carry draft content"
    );

    // the owner's payload does carry it, with the computed comment count
    let detail = blog
        .posts
        .get_detail(&author, "quiet-plans")
        .await
        .expect("owner must see the draft");
    let payload = serde_json::to_value(&detail).expect("detail must serialize");
    assert!(
        payload["post"]["content"]
            .as_str()
            .expect("content must be a string")
            .contains(secret)
    );
    assert_eq!(payload["approved_comment_count"], 0);
}
