use super::facilities::{Facility, FacilityId};
use super::orders::{Order, ProductId};
use std::collections::HashMap;

/// Upper bound on catalog size.
///
/// The search is exhaustive over visiting orders, so each extra facility
/// multiplies the worst case by roughly the catalog size. Ten facilities
/// still finish in about a second.
pub const MAX_FACILITIES: usize = 10;

/// Read-only set of facilities orders are planned against.
///
/// Iteration order is the order facilities were supplied in and only
/// influences which of several equally cheap plans is reported.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Facilities in catalog order
    facilities: Vec<Facility>,

    /// Facility lookup by identifier
    index: HashMap<FacilityId, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate or blank identifiers
    pub fn new(facilities: Vec<Facility>) -> crate::Result<Self> {
        if facilities.len() > MAX_FACILITIES {
            return Err(crate::Error::InvalidCatalog(format!(
                "{} facilities configured, at most {} supported",
                facilities.len(),
                MAX_FACILITIES
            )));
        }

        let mut index = HashMap::with_capacity(facilities.len());
        for (idx, facility) in facilities.iter().enumerate() {
            if facility.id.as_str().trim().is_empty() {
                return Err(crate::Error::InvalidCatalog(format!(
                    "facility at position {} has an empty id",
                    idx
                )));
            }

            if index.insert(facility.id.clone(), idx).is_some() {
                return Err(crate::Error::InvalidCatalog(format!(
                    "duplicate facility id {}",
                    facility.id
                )));
            }
        }

        Ok(Self { facilities, index })
    }

    pub fn get(&self, id: &FacilityId) -> Option<&Facility> {
        self.index.get(id).map(|&idx| &self.facilities[idx])
    }

    /// Facility at a catalog position
    pub(crate) fn at(&self, idx: usize) -> &Facility {
        &self.facilities[idx]
    }

    /// Facility identifiers in catalog order
    pub fn ids(&self) -> impl Iterator<Item = &FacilityId> {
        self.facilities.iter().map(|f| &f.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Facility> {
        self.facilities.iter()
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// Checks if any facility stocks the product
    pub fn stocks(&self, product: &str) -> bool {
        self.facilities.iter().any(|f| f.supplies(product))
    }

    /// Ordered products that no facility in the catalog stocks
    pub fn unstocked(&self, order: &Order) -> Vec<ProductId> {
        order
            .products()
            .filter(|product| !self.stocks(product))
            .map(str::to_string)
            .collect()
    }
}

impl Default for Catalog {
    /// The three-facility reference catalog
    fn default() -> Self {
        Self {
            index: [("C1", 0), ("C2", 1), ("C3", 2)]
                .into_iter()
                .map(|(id, idx)| (FacilityId::from(id), idx))
                .collect(),
            facilities: vec![
                Facility::new("C1", 10, ["A", "B", "E", "H"]),
                Facility::new("C2", 20, ["B", "C", "F", "I"]),
                Facility::new("C3", 30, ["C", "D", "G", "H", "I"]),
            ],
        }
    }
}
