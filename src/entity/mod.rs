mod committable;
mod entity;

pub use committable::{Committable, Persist};
pub use entity::{replace_if_changed, Entity};
