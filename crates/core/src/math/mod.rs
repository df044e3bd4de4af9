/// Cost of driving to a facility and back.
///
/// Saturates instead of wrapping so an oversized configuration can never
/// look cheaper than it is.
pub fn round_trip_cost(distance: u64, cost_per_distance_unit: u64) -> u64 {
    distance
        .saturating_mul(2)
        .saturating_mul(cost_per_distance_unit)
}

/// Adds a leg cost to a running total
pub fn accumulate(accumulated: u64, leg_cost: u64) -> u64 {
    accumulated.saturating_add(leg_cost)
}
