//! # Domain Module
//!
//! Core domain types for the message relay.

pub mod entities;
pub mod errors;
pub mod events;
pub mod registry;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use events::*;
pub use registry::*;
pub use value_objects::*;
