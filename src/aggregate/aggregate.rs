use std::fmt;

use uuid::Uuid;

use crate::entity::Entity;

/// A tagged record of an intended state change.
pub trait DomainAction: fmt::Debug + Clone + Send + Sync {
    /// Stable name used in logs, e.g. `"AddAuthor"`.
    fn action_type(&self) -> &'static str;
}

/// Domain aggregates wrap an [`Entity`] that tracks their pending actions.
pub trait Aggregate {
    type Action: DomainAction;

    /// Table name, used in errors and logs.
    const NAME: &'static str;

    fn entity(&self) -> &Entity<Self::Action>;
    fn entity_mut(&mut self) -> &mut Entity<Self::Action>;

    fn id(&self) -> Uuid {
        self.entity().id()
    }

    fn pending_action_types(&self) -> Vec<&'static str> {
        self.entity()
            .pending_actions()
            .iter()
            .map(DomainAction::action_type)
            .collect()
    }
}

#[macro_export]
macro_rules! impl_aggregate {
    ($ty:ty, $entity:ident, $action:ty, $name:expr) => {
        impl $crate::aggregate::Aggregate for $ty {
            type Action = $action;

            const NAME: &'static str = $name;

            fn entity(&self) -> &$crate::entity::Entity<$action> {
                &self.$entity
            }

            fn entity_mut(&mut self) -> &mut $crate::entity::Entity<$action> {
                &mut self.$entity
            }
        }
    };
}
