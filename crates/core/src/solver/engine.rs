use super::{Plan, SolverConfig};
use crate::domain::{Catalog, Order};
use crate::math;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Exhaustive search for the cheapest sequence of facility visits
/// that fulfils an order.
///
/// Every facility is tried as a starting point, and from each one every
/// ordering of the remaining facilities is explored, visiting each at most
/// once. A branch stops as soon as the order is fulfilled. The search is a
/// pure function of the catalog, the config and the order, so one engine can
/// be shared between any number of concurrent callers.
pub struct CostSearchEngine {
    catalog: Arc<Catalog>,
    config: SolverConfig,
}

/// Best completion found below a node of the search tree
#[derive(Debug)]
struct Branch {
    cost: u64,
    /// Catalog positions, deepest visit first
    stops: Vec<usize>,
}

impl CostSearchEngine {
    /// Creates a new engine over a catalog
    pub fn new(catalog: Arc<Catalog>, config: SolverConfig) -> Self {
        info!(
            "Cost search engine ready: {} facilities, {} per distance unit",
            catalog.len(),
            config.cost_per_distance_unit
        );
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Minimum total round-trip cost to fulfil the order.
    ///
    /// Returns `None` when some ordered product is not stocked anywhere.
    pub fn minimum_cost(&self, order: &Order) -> Option<u64> {
        self.plan(order).map(|plan| plan.cost)
    }

    /// Cheapest plan for the order, including the route taken.
    ///
    /// Among equally cheap plans the one starting earliest in catalog order wins.
    pub fn plan(&self, order: &Order) -> Option<Plan> {
        if order.is_empty() {
            debug!("Empty order, no visits needed");
            return Some(Plan::empty());
        }

        let unstocked = self.catalog.unstocked(order);
        if !unstocked.is_empty() {
            warn!("Order cannot be fulfilled, unstocked products: {:?}", unstocked);
            return None;
        }

        let demand = order.demand();
        debug!("Planning order for {} products", demand.len());

        let best = (0..self.catalog.len())
            .filter(|&start| self.catalog.at(start).contributes(&demand))
            .filter_map(|start| self.explore_from(&demand, start, 0, 0))
            .fold(None, keep_cheaper)?;

        let route = best
            .stops
            .iter()
            .rev()
            .map(|&idx| self.catalog.at(idx).id.clone())
            .collect();

        let plan = Plan {
            cost: best.cost,
            route,
        };

        debug!("Cheapest plan: cost={}, route={:?}", plan.cost, plan.route);
        Some(plan)
    }

    /// Visits `current` and explores every way to finish the order from there.
    ///
    /// `visited` is a bitmask of catalog positions already used on this
    /// branch; being `Copy`, each recursive call works on its own snapshot.
    fn explore_from(
        &self,
        remaining: &BTreeSet<&str>,
        current: usize,
        visited: u64,
        accumulated: u64,
    ) -> Option<Branch> {
        let facility = self.catalog.at(current);
        let left = facility.fulfil(remaining);
        let cost = math::accumulate(
            accumulated,
            math::round_trip_cost(facility.distance, self.config.cost_per_distance_unit),
        );

        if left.is_empty() {
            return Some(Branch {
                cost,
                stops: vec![current],
            });
        }

        let visited = visited | (1u64 << current);

        // Hops that fulfil nothing only add cost, so they are skipped. With
        // no useful hop left the branch is a dead end.
        let best = (0..self.catalog.len())
            .filter(|&next| visited & (1u64 << next) == 0)
            .filter(|&next| self.catalog.at(next).contributes(&left))
            .filter_map(|next| self.explore_from(&left, next, visited, cost))
            .fold(None, keep_cheaper);

        best.map(|mut branch| {
            branch.stops.push(current);
            branch
        })
    }
}

/// Keeps the earlier branch on ties
fn keep_cheaper(best: Option<Branch>, candidate: Branch) -> Option<Branch> {
    match best {
        Some(best) if best.cost <= candidate.cost => Some(best),
        _ => Some(candidate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Facility, FacilityId};

    fn default_engine() -> CostSearchEngine {
        CostSearchEngine::new(Arc::new(Catalog::default()), SolverConfig::default())
    }

    fn order(products: &[&str]) -> Order {
        products.iter().map(|p| (*p, 1u64)).collect()
    }

    fn route(plan: &Plan) -> Vec<&str> {
        plan.route.iter().map(FacilityId::as_str).collect()
    }

    #[test]
    fn test_empty_order_costs_nothing() {
        let engine = default_engine();
        let plan = engine.plan(&Order::new()).unwrap();
        assert_eq!(plan.cost, 0);
        assert!(plan.route.is_empty());
        assert_eq!(engine.minimum_cost(&Order::new()), Some(0));
    }

    #[test]
    fn test_single_facility_order() {
        let engine = default_engine();
        let plan = engine.plan(&order(&["A"])).unwrap();
        assert_eq!(plan.cost, 40);
        assert_eq!(route(&plan), vec!["C1"]);
    }

    #[test]
    fn test_two_facility_order() {
        let engine = default_engine();
        let plan = engine.plan(&order(&["A", "C"])).unwrap();
        assert_eq!(plan.cost, 80 + 40);
        assert_eq!(route(&plan), vec!["C1", "C2"]);
    }

    #[test]
    fn test_reference_scenario_costs() {
        let engine = default_engine();
        // C2 alone covers both
        assert_eq!(engine.minimum_cost(&order(&["B", "C"])), Some(80));
        // H is at C1 and C3, D only at C3
        assert_eq!(engine.minimum_cost(&order(&["D", "H"])), Some(120));
        // E at C1, D at C3, F at C2: all three needed
        assert_eq!(engine.minimum_cost(&order(&["D", "E", "F"])), Some(240));
        // I at C2 or C3, A at C1
        assert_eq!(engine.minimum_cost(&order(&["A", "I"])), Some(120));
    }

    #[test]
    fn test_unstocked_product_is_unsatisfiable() {
        let engine = default_engine();
        assert_eq!(engine.minimum_cost(&order(&["Z"])), None);
        assert_eq!(engine.minimum_cost(&order(&["A", "Z"])), None);
        assert!(engine.plan(&order(&["A", "C", "Z"])).is_none());
    }

    #[test]
    fn test_dead_end_branch_is_not_a_result() {
        let engine = default_engine();
        let demand = BTreeSet::from(["A", "Z"]);
        for start in 0..engine.catalog().len() {
            assert!(engine.explore_from(&demand, start, 0, 0).is_none());
        }
    }

    #[test]
    fn test_quantities_do_not_affect_cost() {
        let engine = default_engine();
        let small: Order = [("A", 1u64), ("C", 1)].into_iter().collect();
        let large: Order = [("A", 500u64), ("C", 0)].into_iter().collect();
        assert_eq!(engine.minimum_cost(&small), engine.minimum_cost(&large));
    }

    #[test]
    fn test_key_order_does_not_affect_cost() {
        let engine = default_engine();
        let forward = order(&["A", "D", "F"]);
        let backward = order(&["F", "D", "A"]);
        assert_eq!(engine.minimum_cost(&forward), engine.minimum_cost(&backward));
    }

    #[test]
    fn test_cost_is_monotone_in_products() {
        let engine = default_engine();
        let products = ["A", "B", "C", "D", "E", "F", "G", "H", "I"];

        for mask in 0u32..(1u32 << products.len()) {
            let base: Vec<&str> = products
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1u32 << i) != 0)
                .map(|(_, p)| *p)
                .collect();
            let base_cost = engine.minimum_cost(&order(&base)).unwrap();

            for extra in products.iter().filter(|p| !base.contains(p)) {
                let mut grown = base.clone();
                grown.push(*extra);
                let grown_cost = engine.minimum_cost(&order(&grown)).unwrap();
                assert!(grown_cost >= base_cost, "{:?} + {} got cheaper", base, extra);
            }
        }
    }

    #[test]
    fn test_single_facility_orders_pick_cheapest_stockist() {
        let engine = default_engine();
        let rate = engine.config().cost_per_distance_unit;

        for product in ["A", "B", "C", "D", "E", "F", "G", "H", "I"] {
            let expected = engine
                .catalog()
                .iter()
                .filter(|f| f.supplies(product))
                .map(|f| math::round_trip_cost(f.distance, rate))
                .min();
            assert_eq!(engine.minimum_cost(&order(&[product])), expected);
        }
    }

    #[test]
    fn test_custom_rate() {
        let engine = CostSearchEngine::new(
            Arc::new(Catalog::default()),
            SolverConfig {
                cost_per_distance_unit: 5,
            },
        );
        assert_eq!(engine.minimum_cost(&order(&["A"])), Some(100));
        assert_eq!(engine.minimum_cost(&order(&["A", "C"])), Some(300));
    }

    #[test]
    fn test_empty_catalog() {
        let engine = CostSearchEngine::new(
            Arc::new(Catalog::new(vec![]).unwrap()),
            SolverConfig::default(),
        );
        assert_eq!(engine.minimum_cost(&Order::new()), Some(0));
        assert_eq!(engine.minimum_cost(&order(&["A"])), None);
    }

    #[test]
    fn test_ties_resolve_to_catalog_order() {
        let catalog = Catalog::new(vec![
            Facility::new("North", 15, ["A"]),
            Facility::new("South", 15, ["A"]),
        ])
        .unwrap();
        let engine = CostSearchEngine::new(Arc::new(catalog), SolverConfig::default());

        let plan = engine.plan(&order(&["A"])).unwrap();
        assert_eq!(plan.cost, 60);
        assert_eq!(route(&plan), vec!["North"]);
    }

    #[test]
    fn test_matches_cheapest_covering_set() {
        // Visiting order never changes the total, so the optimum is the
        // cheapest subset of facilities whose stock covers the order.
        let catalog = Catalog::new(vec![
            Facility::new("F1", 7, ["A", "B"]),
            Facility::new("F2", 3, ["B", "C"]),
            Facility::new("F3", 11, ["A", "C", "D", "E"]),
            Facility::new("F4", 2, ["E"]),
            Facility::new("F5", 9, ["D", "F"]),
        ])
        .unwrap();
        let engine = CostSearchEngine::new(Arc::new(catalog), SolverConfig::default());
        let products = ["A", "B", "C", "D", "E", "F"];
        let facilities: Vec<&Facility> = engine.catalog().iter().collect();

        for mask in 1u32..(1u32 << products.len()) {
            let wanted: Vec<&str> = products
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1u32 << i) != 0)
                .map(|(_, p)| *p)
                .collect();

            let expected = (1u32..(1u32 << facilities.len()))
                .filter(|subset| {
                    wanted.iter().all(|p| {
                        facilities
                            .iter()
                            .enumerate()
                            .any(|(i, f)| subset & (1u32 << i) != 0 && f.supplies(p))
                    })
                })
                .map(|subset| {
                    facilities
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| subset & (1u32 << i) != 0)
                        .map(|(_, f)| math::round_trip_cost(f.distance, 2))
                        .sum::<u64>()
                })
                .min();

            assert_eq!(engine.minimum_cost(&order(&wanted)), expected, "order {:?}", wanted);
        }
    }

    #[test]
    fn test_route_visits_each_facility_once() {
        let engine = default_engine();
        let plan = engine.plan(&order(&["A", "D", "F"])).unwrap();
        let mut seen = route(&plan);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), plan.stops());
    }
}
