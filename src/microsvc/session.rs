//! Who is calling.

use uuid::Uuid;

use crate::domain::Role;

/// The caller of a command: anonymous, or a user with a role.
///
/// The HTTP layer builds it from a verified bearer token only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    caller: Option<(Uuid, Role)>,
}

impl Session {
    /// An anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authenticated(user_id: Uuid, role: Role) -> Self {
        Self {
            caller: Some((user_id, role)),
        }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.caller.map(|(id, _)| id)
    }

    pub fn role(&self) -> Option<Role> {
        self.caller.map(|(_, role)| role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }
}
