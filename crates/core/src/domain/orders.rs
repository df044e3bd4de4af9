use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Product identifier as it appears in orders and facility stock lists
pub type ProductId = String;

/// A customer order: requested quantity per product.
///
/// Only the presence of a product key matters when planning a delivery;
/// quantities are carried through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Order(BTreeMap<ProductId, u64>);

impl Order {
    /// Creates an empty order
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an order from a JSON object such as `{"A": 1, "C": 2}`
    pub fn from_json(bytes: &[u8]) -> crate::Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| crate::Error::InvalidOrder(e.to_string()))
    }

    /// Adds a product line, replacing any previous quantity for it
    pub fn insert(&mut self, product: impl Into<ProductId>, quantity: u64) {
        self.0.insert(product.into(), quantity);
    }

    /// Requested quantity for a product, if it was ordered
    pub fn quantity(&self, product: &str) -> Option<u64> {
        self.0.get(product).copied()
    }

    pub fn contains(&self, product: &str) -> bool {
        self.0.contains_key(product)
    }

    /// Iterates over the distinct products in the order
    pub fn products(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Set of products still to be fulfilled, borrowed from the order
    pub fn demand(&self) -> BTreeSet<&str> {
        self.products().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// An empty order is already fully satisfied
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<P: Into<ProductId>> FromIterator<(P, u64)> for Order {
    fn from_iter<I: IntoIterator<Item = (P, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(p, q)| (p.into(), q)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_order_from_json() {
        let order = Order::from_json(br#"{"A": 1, "C": 3}"#).unwrap();
        assert_eq!(order.len(), 2);
        assert_eq!(order.quantity("A"), Some(1));
        assert_eq!(order.quantity("C"), Some(3));
        assert!(!order.contains("B"));
    }

    #[test]
    fn test_decode_empty_order() {
        let order = Order::from_json(b"{}").unwrap();
        assert!(order.is_empty());
        assert!(order.demand().is_empty());
    }

    #[test]
    fn test_decode_rejects_negative_quantity() {
        let res = Order::from_json(br#"{"A": -1}"#);
        assert!(matches!(res, Err(crate::Error::InvalidOrder(_))));
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(Order::from_json(b"[1, 2]").is_err());
        assert!(Order::from_json(b"not json").is_err());
        assert!(Order::from_json(br#"{"A": "one"}"#).is_err());
    }

    #[test]
    fn test_zero_quantity_still_counts_as_demand() {
        let order: Order = [("A", 0u64)].into_iter().collect();
        assert_eq!(order.demand(), BTreeSet::from(["A"]));
    }

    #[test]
    fn test_insert_replaces_quantity() {
        let mut order = Order::new();
        order.insert("A", 1);
        order.insert("A", 5);
        assert_eq!(order.len(), 1);
        assert_eq!(order.quantity("A"), Some(5));
    }
}
