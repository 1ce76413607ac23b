//! Repeated favor exchange sustained by the threat of losing the link
//!
//! In every period each relationship produces a favor opportunity with
//! probability `prob`. Granting costs `cost`, receiving is worth `value`,
//! and future periods are discounted by `delta`.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result, check_probability},
    formation::UtilityMap,
    graph::Graph,
};

/// Parameters of the favor-exchange game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FavorParams {
    /// Discount factor, must lie in `[0, 1)`
    pub delta: f64,
    /// Chance of a favor opportunity per relationship and period
    pub prob: f64,
    pub value: f64,
    pub cost: f64,
}

impl FavorParams {
    pub fn validate(&self) -> Result<()> {
        check_probability(self.prob)?;
        if !(0.0..1.0).contains(&self.delta) {
            return Err(Error::InvalidParameter {
                name: "delta",
                value: self.delta,
                reason: "discount factor must lie in [0, 1)",
            });
        }
        Ok(())
    }

    /// Expected discounted net payoff contributed by one relationship.
    pub fn relationship_value(&self) -> f64 {
        self.delta * self.prob * (self.value - self.cost) / (1.0 - self.delta)
    }
}

/// `degree * relationship_value - cost` for nodes with at least one link,
/// `0` for isolated nodes.
pub fn favor_utility(graph: &Graph, params: &FavorParams) -> Result<UtilityMap> {
    params.validate()?;
    let per_link = params.relationship_value();
    Ok(graph
        .nodes()
        .map(|node| {
            let degree = graph.degree(node);
            let upfront = if degree > 0 { params.cost } else { 0.0 };
            (node, degree as f64 * per_link - upfront)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;

    fn params() -> FavorParams {
        FavorParams {
            delta: 0.9,
            prob: 0.1,
            value: 0.9,
            cost: 0.5,
        }
    }

    #[test]
    fn utility_grows_with_degree() {
        let graph = Graph::from_edges([(0, 1), (0, 2), (0, 3)]).unwrap();
        let util = favor_utility(&graph, &params()).unwrap();
        let per_link = 0.9 * 0.1 * (0.9 - 0.5) / (1.0 - 0.9);
        assert!((util.get(NodeId::new(0)).unwrap() - (3.0 * per_link - 0.5)).abs() < 1e-12);
        assert!((util.get(NodeId::new(1)).unwrap() - (per_link - 0.5)).abs() < 1e-12);
    }

    #[test]
    fn isolated_nodes_pay_nothing() {
        let graph = Graph::empty(3);
        let util = favor_utility(&graph, &params()).unwrap();
        assert_eq!(util.total(), 0.0);
    }

    #[test]
    fn unit_discount_is_rejected() {
        let graph = Graph::empty(2);
        let bad = FavorParams {
            delta: 1.0,
            ..params()
        };
        assert!(matches!(
            favor_utility(&graph, &bad),
            Err(Error::InvalidParameter { name: "delta", .. })
        ));
    }

    #[test]
    fn invalid_probability_is_rejected() {
        let bad = FavorParams {
            prob: 1.5,
            ..params()
        };
        assert!(matches!(
            bad.validate(),
            Err(Error::InvalidProbability { .. })
        ));
    }
}
