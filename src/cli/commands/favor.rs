//! Favor command - Utilities of the repeated favor-exchange game

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::{
        config::{CommonArgs, build_graph},
        output::{format_utility, print_json, print_kv, print_section, print_subsection},
    },
    formation::UtilityMap,
    games::favor_utility,
    graph::{Edge, Graph},
    networks::{FAVOR_NODES, Preset},
};

#[derive(Parser, Debug)]
#[command(about = "Compute favor-exchange utilities on a network")]
pub struct FavorArgs {
    /// Links of a custom network on nodes 0..7, e.g. "0-1,1-2"
    #[arg(long, value_delimiter = ',', conflicts_with = "preset")]
    pub edges: Vec<Edge>,

    /// Predefined network (favor-a, favor-b, eleven, six, cohesion)
    #[arg(long)]
    pub preset: Option<Preset>,

    /// Chance of a favor opportunity per link and period
    #[arg(long, short = 'p')]
    pub prob: Option<f64>,

    /// Value of receiving a favor
    #[arg(long)]
    pub value: Option<f64>,

    /// Cost of granting a favor
    #[arg(long, short = 'c')]
    pub cost: Option<f64>,

    /// Discount factor in [0, 1)
    #[arg(long, short = 'd')]
    pub delta: Option<f64>,

    /// Print the utilities as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Serialize)]
struct FavorSummary {
    relationship_value: f64,
    utility: UtilityMap,
    total_utility: f64,
}

/// Custom links always sit on the full favor node set, so unlinked nodes
/// still count towards the totals.
fn network(args: &FavorArgs) -> Result<Graph> {
    let graph = match (args.preset, args.edges.is_empty()) {
        (Some(preset), _) => preset.graph()?,
        (None, false) => build_graph(FAVOR_NODES, &args.edges),
        (None, true) => Preset::FavorA.graph()?,
    };
    Ok(graph)
}

pub fn execute(args: FavorArgs) -> Result<()> {
    let mut config = args.common.load_config()?.favor;
    if let Some(prob) = args.prob {
        config = config.with_prob(prob);
    }
    if let Some(value) = args.value {
        config = config.with_value(value);
    }
    if let Some(cost) = args.cost {
        config = config.with_cost(cost);
    }
    if let Some(delta) = args.delta {
        config = config.with_delta(delta);
    }

    let graph = network(&args)?;

    let params = config.params();
    let utility = favor_utility(&graph, &params)?;
    let summary = FavorSummary {
        relationship_value: params.relationship_value(),
        total_utility: utility.total(),
        utility,
    };

    if args.json {
        return print_json(&summary);
    }

    print_section("Favor Exchange");
    print_kv("Nodes", &graph.node_count().to_string());
    print_kv("Links", &graph.edge_count().to_string());
    print_kv(
        "Per-link value",
        &format_utility(summary.relationship_value),
    );

    print_subsection("Utility");
    for (node, utility) in summary.utility.iter() {
        print_kv(
            &format!("Node {node} (degree {})", graph.degree(node)),
            &format_utility(utility),
        );
    }
    print_kv("Total", &format_utility(summary.total_utility));
    Ok(())
}
