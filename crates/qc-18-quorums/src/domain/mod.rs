//! # Domain Module
//!
//! Core domain types for the Quorums subsystem.

pub mod config;
pub mod encoding;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod params;
pub mod value_objects;

pub use config::*;
pub use encoding::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use params::*;
pub use value_objects::*;
