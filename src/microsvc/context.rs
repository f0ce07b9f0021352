//! Per-command view of the input, the caller and the repository root.

use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::Role;

use super::error::HandlerError;
use super::session::Session;

pub struct Context<'a, R> {
    command_name: String,
    input: Value,
    session: Session,
    repo: &'a R,
}

impl<'a, R> Context<'a, R> {
    pub(crate) fn new(command_name: String, input: Value, session: Session, repo: &'a R) -> Self {
        Self {
            command_name,
            input,
            session,
            repo,
        }
    }

    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(self.input.clone()).map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The authenticated user. Returns `Unauthorized` for anonymous sessions.
    pub fn user_id(&self) -> Result<Uuid, HandlerError> {
        self.session
            .user_id()
            .ok_or_else(|| HandlerError::Unauthorized("missing user ID in session".into()))
    }

    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    pub fn require_admin(&self) -> Result<(), HandlerError> {
        self.user_id()?;
        if !self.is_admin() {
            return Err(HandlerError::Forbidden(format!(
                "{} requires the admin role",
                self.command_name
            )));
        }
        Ok(())
    }

    /// Personal resources are visible only to the user who owns them.
    pub fn ensure_owner(&self, owner_id: Uuid) -> Result<(), HandlerError> {
        if self.user_id()? != owner_id {
            return Err(HandlerError::Forbidden(
                "resource belongs to another user".into(),
            ));
        }
        Ok(())
    }

    pub fn repo(&self) -> &R {
        self.repo
    }

    /// Null counts as absent.
    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some_and(|v| !v.is_null())
    }

    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }

    /// True when at least one of `fields` is present.
    pub fn has_any_field(&self, fields: &[&str]) -> bool {
        fields.iter().any(|f| self.has_field(f))
    }
}
