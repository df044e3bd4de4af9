use super::orders::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Facility unique identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct FacilityId(pub String);

impl FacilityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FacilityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A stocking facility that orders can be collected from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Facility {
    /// Unique facility identifier
    pub id: FacilityId,

    /// One-way distance to the facility
    pub distance: u64,

    /// Products the facility can supply
    pub products: BTreeSet<ProductId>,
}

impl Facility {
    /// Creates a new facility
    pub fn new<I, P>(id: impl Into<FacilityId>, distance: u64, products: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ProductId>,
    {
        Self {
            id: id.into(),
            distance,
            products: products.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks if the facility stocks a product
    pub fn supplies(&self, product: &str) -> bool {
        self.products.contains(product)
    }

    /// Checks if visiting this facility would fulfil any of the remaining demand
    pub fn contributes(&self, remaining: &BTreeSet<&str>) -> bool {
        remaining.iter().any(|product| self.supplies(product))
    }

    /// Demand left over after collecting everything this facility stocks
    pub fn fulfil<'a>(&self, remaining: &BTreeSet<&'a str>) -> BTreeSet<&'a str> {
        remaining
            .iter()
            .copied()
            .filter(|product| !self.supplies(product))
            .collect()
    }
}
