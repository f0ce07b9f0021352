//! The application state every command handler runs against.

use crate::auth::TokenSettings;
use crate::microsvc::Context;
use crate::store::Database;

pub struct Library {
    db: Database,
    tokens: TokenSettings,
}

impl Library {
    pub fn new(db: Database, tokens: TokenSettings) -> Self {
        Self { db, tokens }
    }

    pub fn in_memory() -> Self {
        Self::new(Database::in_memory(), TokenSettings::default())
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn tokens(&self) -> &TokenSettings {
        &self.tokens
    }
}

impl Context<'_, Library> {
    pub fn db(&self) -> &Database {
        self.repo().db()
    }

    pub fn tokens(&self) -> &TokenSettings {
        self.repo().tokens()
    }
}

#[cfg(feature = "http")]
mod http {
    use crate::auth;
    use crate::microsvc::{Authenticate, HandlerError, Session};
    use crate::store::TokenKind;

    use super::Library;

    impl Authenticate for Library {
        fn authenticate(&self, token: &str) -> Result<Option<Session>, HandlerError> {
            let user = auth::resolve(&self.db, token, TokenKind::Access)?;
            Ok(user.map(|user| Session::authenticated(user.entity.id(), user.role())))
        }
    }
}
