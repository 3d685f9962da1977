use tracing::info;

use crate::data::comment_repository::{
    CommentRepository, CommentVisibility, NewComment,
};
use crate::data::post_repository::PostRepository;
use crate::domain::actor::Actor;
use crate::domain::comment::{Comment, NewCommentRequest};
use crate::domain::error::DomainError;
use crate::domain::policy::{self, Action};
use crate::infrastructure::settings::Settings;

pub struct CommentService<C: CommentRepository, P: PostRepository> {
    comments: C,
    posts: P,
    settings: Settings,
}

impl<C: CommentRepository, P: PostRepository> CommentService<C, P> {
    pub fn new(comments: C, posts: P, settings: Settings) -> Self {
        Self {
            comments,
            posts,
            settings,
        }
    }

    /// Every submission lands unapproved, whoever the actor is.
    pub async fn submit(
        &self,
        actor: &Actor,
        post_slug: &str,
        req: NewCommentRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate(self.settings.max_comment_chars)?;
        let post = self
            .posts
            .get_post_by_slug(post_slug)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post slug: {post_slug}")))?;
        policy::authorize(actor, Action::SubmitComment(&post))?;
        let author_id = actor.id().ok_or(DomainError::Forbidden)?;

        let comment = self
            .comments
            .create_comment(NewComment {
                post_id: post.id,
                author_id,
                content: req.content,
            })
            .await?;
        info!(
            comment_id = comment.id,
            post_id = post.id,
            "comment submitted, awaiting moderation"
        );
        Ok(comment)
    }

    pub async fn approve(&self, actor: &Actor, comment_id: i64) -> Result<Comment, DomainError> {
        self.moderate(actor, comment_id, true).await
    }

    pub async fn reject(&self, actor: &Actor, comment_id: i64) -> Result<Comment, DomainError> {
        self.moderate(actor, comment_id, false).await
    }

    pub async fn approve_many(&self, actor: &Actor, ids: &[i64]) -> Result<u64, DomainError> {
        self.moderate_many(actor, ids, true).await
    }

    pub async fn reject_many(&self, actor: &Actor, ids: &[i64]) -> Result<u64, DomainError> {
        self.moderate_many(actor, ids, false).await
    }

    /// A single comment, subject to the same visibility rules as listings:
    /// unapproved comments exist only for their author and administrators.
    pub async fn get(&self, actor: &Actor, comment_id: i64) -> Result<Comment, DomainError> {
        let comment = self
            .comments
            .get_comment(comment_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("comment id: {comment_id}")))?;
        policy::authorize(actor, Action::ViewComment(&comment))?;
        Ok(comment)
    }

    /// Comments on a post: approved ones for everybody, the actor's own
    /// unapproved ones on top, everything for an administrator. Oldest first.
    pub async fn list_for_post(
        &self,
        actor: &Actor,
        post_slug: &str,
    ) -> Result<Vec<Comment>, DomainError> {
        let post = self
            .posts
            .get_post_by_slug(post_slug)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post slug: {post_slug}")))?;
        policy::authorize(actor, Action::ViewPost(&post))?;

        let visibility = if actor.is_admin() {
            CommentVisibility::All
        } else if let Some(author_id) = actor.id() {
            CommentVisibility::ApprovedOrAuthor(author_id)
        } else {
            CommentVisibility::ApprovedOnly
        };
        self.comments.list_for_post(post.id, visibility).await
    }

    /// The moderation queue.
    pub async fn pending(&self, actor: &Actor) -> Result<Vec<Comment>, DomainError> {
        policy::authorize(actor, Action::ModerateComments)?;
        self.comments.list_unapproved().await
    }

    async fn moderate(
        &self,
        actor: &Actor,
        comment_id: i64,
        approved: bool,
    ) -> Result<Comment, DomainError> {
        policy::authorize(actor, Action::ModerateComments)?;

        let comment = self
            .comments
            .set_approved(comment_id, approved)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("comment id: {comment_id}")))?;
        info!(comment_id, approved, "comment moderated");
        Ok(comment)
    }

    async fn moderate_many(
        &self,
        actor: &Actor,
        ids: &[i64],
        approved: bool,
    ) -> Result<u64, DomainError> {
        policy::authorize(actor, Action::ModerateComments)?;

        let affected = self.comments.set_approved_many(ids, approved).await?;
        info!(affected, approved, "comments bulk moderated");
        Ok(affected)
    }
}
