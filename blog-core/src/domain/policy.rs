use super::actor::Actor;
use super::comment::Comment;
use super::error::DomainError;
use super::post::Post;

#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    ViewPost(&'a Post),
    CreatePost,
    EditPost(&'a Post),
    DeletePost(&'a Post),
    ListOwnPosts,
    ListAllPosts,
    SubmitComment(&'a Post),
    ViewComment(&'a Comment),
    ModerateComments,
    ManageCategories,
}

/// Single authorization point consulted by every service entry.
///
/// Denied reads of a resource that exists but is hidden surface as
/// `NotFound`, so a denied lookup is indistinguishable from a missing row.
/// Denied writes surface as `Forbidden`.
pub fn authorize(actor: &Actor, action: Action<'_>) -> Result<(), DomainError> {
    match action {
        Action::ViewPost(post) => {
            if post.is_published() || actor.is_admin() || actor.owns(post.author_id) {
                Ok(())
            } else {
                Err(hidden_post(post))
            }
        }
        Action::CreatePost | Action::ListOwnPosts => require_authenticated(actor),
        Action::EditPost(post) | Action::DeletePost(post) => {
            if actor.is_admin() || actor.owns(post.author_id) {
                Ok(())
            } else {
                Err(DomainError::Forbidden)
            }
        }
        Action::SubmitComment(post) => {
            require_authenticated(actor)?;
            if post.is_published() {
                return Ok(());
            }
            if actor.is_admin() || actor.owns(post.author_id) {
                // visible to this actor, but drafts take no comments
                return Err(DomainError::Validation {
                    field: "post",
                    message: "draft posts do not accept comments",
                });
            }
            Err(hidden_post(post))
        }
        Action::ViewComment(comment) => {
            if comment.approved || actor.is_admin() || actor.owns(comment.author_id) {
                Ok(())
            } else {
                Err(DomainError::NotFound(format!("comment id: {}", comment.id)))
            }
        }
        Action::ListAllPosts | Action::ModerateComments | Action::ManageCategories => {
            if actor.is_admin() {
                Ok(())
            } else {
                Err(DomainError::Forbidden)
            }
        }
    }
}

fn require_authenticated(actor: &Actor) -> Result<(), DomainError> {
    if actor.is_authenticated() {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}

fn hidden_post(post: &Post) -> DomainError {
    DomainError::NotFound(format!("post slug: {}", post.slug))
}
