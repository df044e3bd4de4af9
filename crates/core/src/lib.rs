pub mod domain;
pub mod solver;
pub mod math;

pub use solver::{CostSearchEngine, SolverConfig, Plan};
pub use domain::{Catalog, Facility, FacilityId, Order, ProductId};

/// Core result type for delivery cost operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}
