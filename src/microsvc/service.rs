//! Command registry and dispatch.
//!
//! A [`Service`] owns the repository root and maps command names such as
//! `"books.create"` to a guard and a handler. Transports only ever call
//! [`Service::dispatch`].

use std::collections::BTreeMap;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, error, warn};

use super::context::Context;
use super::error::HandlerError;
use super::session::Session;

type Guard<R> = Box<dyn Fn(&Context<R>) -> bool + Send + Sync>;
type Handle<R> = Box<dyn Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync>;

struct Command<R> {
    guard: Guard<R>,
    handle: Handle<R>,
}

pub struct Service<R> {
    repo: R,
    commands: BTreeMap<&'static str, Command<R>>,
}

impl<R: Send + Sync + 'static> Service<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            commands: BTreeMap::new(),
        }
    }

    /// Register a handler that accepts any input.
    pub fn command<F>(self, name: &'static str, handle: F) -> Self
    where
        F: Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.command_guarded(name, |_| true, handle)
    }

    /// Register a handler behind a guard. A guard returning `false` rejects
    /// the command with [`HandlerError::GuardRejected`] before the handler runs.
    ///
    /// Registering the same name twice replaces the earlier handler.
    pub fn command_guarded<G, F>(mut self, name: &'static str, guard: G, handle: F) -> Self
    where
        G: Fn(&Context<R>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        let command = Command {
            guard: Box::new(guard),
            handle: Box::new(handle),
        };
        if self.commands.insert(name, command).is_some() {
            warn!(command = name, "command registered twice");
        }
        self
    }

    pub fn dispatch(
        &self,
        name: &str,
        input: Value,
        session: Session,
    ) -> Result<Value, HandlerError> {
        let command = self
            .commands
            .get(name)
            .ok_or_else(|| HandlerError::UnknownCommand(name.to_string()))?;

        let ctx = Context::new(name.to_string(), input, session, &self.repo);
        if !(command.guard)(&ctx) {
            warn!(command = name, "guard rejected input");
            return Err(HandlerError::GuardRejected(name.to_string()));
        }

        let started = Instant::now();
        let result = (command.handle)(&ctx);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => debug!(command = name, user = ?ctx.session().user_id(), elapsed_ms, "command handled"),
            Err(err) if err.status_code() >= 500 => {
                error!(command = name, elapsed_ms, error = %err, "command failed")
            }
            Err(err) => debug!(
                command = name,
                status = err.status_code(),
                error = %err,
                "command rejected"
            ),
        }
        result
    }

    /// Registered command names in lexical order.
    pub fn commands(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }
}
