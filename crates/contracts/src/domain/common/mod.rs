//! Types shared by all aggregates

pub mod campaign;
pub mod lookup;
pub mod person;

pub use crate::shared::resource::{Capabilities, EntityId, Resource};
pub use lookup::{LookupFields, LookupForm, LookupResource, LookupRow};
