//! Closed-form reference value for the best achievable total utility

/// Maximum total utility for `n` nodes under the connections model.
///
/// Piecewise in the cost regime:
///
/// - `cost < delta(1 - delta)`: the complete graph, `(n-1) n (delta - cost)`
/// - `cost < delta + (n-2) delta^2 / 2`: the star,
///   `2 (n-1)(delta - cost) + (n-1)(n-2) delta^2`
/// - otherwise the empty graph, `0`
///
/// Fewer than two nodes cannot form a link, so the bound is `0`.
pub fn max_utility(n: usize, delta: f64, cost: f64) -> f64 {
    if n < 2 {
        return 0.0;
    }
    let n = n as f64;
    if cost < delta * (1.0 - delta) {
        return (n - 1.0) * n * (delta - cost);
    }
    if cost < delta + (n - 2.0) * delta * delta / 2.0 {
        return 2.0 * (n - 1.0) * (delta - cost) + (n - 1.0) * (n - 2.0) * delta * delta;
    }
    0.0
}
