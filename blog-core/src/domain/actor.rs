use serde::{Deserialize, Serialize};

/// The identity performing an operation. The credential layer that produced
/// it (sessions, password hashing) lives outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    Anonymous,
    User { id: i64, admin: bool },
}

impl Actor {
    pub fn user(id: i64) -> Self {
        Actor::User { id, admin: false }
    }

    pub fn admin(id: i64) -> Self {
        Actor::User { id, admin: true }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Actor::User { .. })
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            Actor::Anonymous => None,
            Actor::User { id, .. } => Some(*id),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::User { admin: true, .. })
    }

    pub fn owns(&self, author_id: i64) -> bool {
        self.id() == Some(author_id)
    }
}
