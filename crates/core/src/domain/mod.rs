pub mod orders;
pub mod facilities;
pub mod catalog;

pub use orders::{Order, ProductId};
pub use facilities::{Facility, FacilityId};
pub use catalog::{Catalog, MAX_FACILITIES};
