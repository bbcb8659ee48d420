//! silverwork adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `rest_table`: REST adapter for the tabular backend
//! - `table_memory`: seedable in-memory table fetcher for tests and offline use
//! - `experience`: career-history based experience lookup

mod experience;
mod rest_table;
mod table_memory;

pub use experience::{CareerExperienceSource, StubExperienceSource};
pub use rest_table::RestTableFetcher;
pub use table_memory::InMemoryTableFetcher;
