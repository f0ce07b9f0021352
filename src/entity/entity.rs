use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identity, version and pending domain actions shared by every aggregate.
///
/// Mutators on an aggregate change its state right away and record an action
/// describing the change. Repositories turn the pending actions into row and
/// join-table writes, then call [`Entity::mark_committed`].
pub struct Entity<A> {
    id: Uuid,
    version: u64,
    actions: Vec<A>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<A> Default for Entity<A> {
    fn default() -> Self {
        let now = Utc::now();
        Entity {
            id: Uuid::new_v4(),
            version: 0,
            actions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Entity<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("version", &self.version)
            .field("actions", &self.actions)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl<A: Clone> Clone for Entity<A> {
    fn clone(&self) -> Self {
        Entity {
            id: self.id,
            version: self.version,
            actions: self.actions.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl<A> Entity<A> {
    /// A fresh, never persisted entity with a random id.
    pub fn new() -> Self {
        Entity::default()
    }

    pub fn with_id(id: Uuid) -> Self {
        Entity {
            id,
            ..Entity::default()
        }
    }

    /// Rebuild an entity from a stored row. No actions are pending.
    pub fn load(
        id: Uuid,
        version: u64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Entity {
            id,
            version,
            actions: Vec::new(),
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// True until the entity has been committed once.
    pub fn is_new(&self) -> bool {
        self.version == 0
    }

    /// Record a domain action. The caller has already applied it to its state.
    pub fn record(&mut self, action: A) {
        self.actions.push(action);
        self.updated_at = Utc::now();
    }

    /// Actions recorded since the entity was loaded or last committed.
    pub fn pending_actions(&self) -> &[A] {
        &self.actions
    }

    pub fn has_changes(&self) -> bool {
        self.is_new() || !self.actions.is_empty()
    }

    /// Called by the store after a successful commit.
    pub fn mark_committed(&mut self) {
        if self.has_changes() {
            self.version += 1;
        }
        self.actions.clear();
    }
}

/// Set `field` to `value` and report whether anything changed.
pub fn replace_if_changed<T: PartialEq>(field: &mut T, value: T) -> bool {
    if *field == value {
        return false;
    }
    *field = value;
    true
}
