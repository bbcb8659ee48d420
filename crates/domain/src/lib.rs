//! silverwork domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Domain entities and value objects
//! - `labels`: Static interest label/tag catalog
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `usecases`: Application use cases / business logic

pub mod labels;
pub mod model;
pub mod ports;
pub mod usecases;

pub use labels::*;
pub use model::*;
pub use ports::*;
