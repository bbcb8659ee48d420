//! Application use cases

pub mod dashboard;
pub mod deadline;
pub mod interest;
pub mod recommend;

pub use dashboard::{DashboardConfig, DashboardUseCase};
pub use deadline::{dday_status, deadline_status};
pub use interest::InterestVectorBuilder;
pub use recommend::{RecommendConfig, RecommendUseCase, rank, score};
