//! Formation command - Edge perturbation analysis under the connections model

use anyhow::{Result, bail};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::{
        config::{CommonArgs, LinkCost, build_graph},
        output::{format_utility, print_json, print_kv, print_section, print_subsection},
    },
    formation::{EdgeChange, EdgeReport, UtilityMap, analyze, max_utility},
    graph::Edge,
};

#[derive(Parser, Debug)]
#[command(about = "Analyze link additions and removals under the connections model")]
pub struct FormationArgs {
    /// Number of nodes in the network
    #[arg(long, short = 'n')]
    pub nodes: Option<usize>,

    /// Existing links, e.g. "0-1,1-2"
    #[arg(long, value_delimiter = ',')]
    pub edges: Vec<Edge>,

    /// Benefit decay per hop
    #[arg(long, short = 'd')]
    pub delta: Option<f64>,

    /// Cost per link, or "none" to drop the cost term
    #[arg(long, short = 'c')]
    pub cost: Option<LinkCost>,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Serialize)]
struct FormationSummary {
    delta: f64,
    cost: Option<f64>,
    utility: UtilityMap,
    total_utility: f64,
    max_utility: Option<f64>,
    best_addition: Option<Edge>,
    pairwise_stable: bool,
    edges: Vec<EdgeReport>,
}

pub fn execute(args: FormationArgs) -> Result<()> {
    let mut config = args.common.load_config()?.formation;
    if let Some(nodes) = args.nodes {
        config = config.with_nodes(nodes);
    }
    if let Some(delta) = args.delta {
        config = config.with_delta(delta);
    }
    if let Some(LinkCost(cost)) = args.cost {
        config = config.with_cost(cost);
    }
    config.validate()?;

    let graph = build_graph(config.nodes, &args.edges);
    if graph.node_count() == 0 {
        bail!("the network has no nodes; pass --nodes or --edges");
    }

    let analysis = analyze(&graph, config.delta, config.cost);
    let summary = FormationSummary {
        delta: config.delta,
        cost: config.cost,
        utility: analysis.current_util.clone(),
        total_utility: analysis.total_utility(),
        max_utility: config
            .cost
            .map(|cost| max_utility(graph.node_count(), config.delta, cost)),
        best_addition: analysis.best_addition,
        pairwise_stable: analysis.is_pairwise_stable(),
        edges: analysis.edge_reports(),
    };

    if args.json {
        return print_json(&summary);
    }

    print_section("Network Formation");
    print_kv("Nodes", &graph.node_count().to_string());
    print_kv("Links", &graph.edge_count().to_string());
    print_kv("Delta", &summary.delta.to_string());
    print_kv("Cost", &LinkCost(summary.cost).to_string());

    print_subsection("Utility");
    for (node, utility) in summary.utility.iter() {
        print_kv(&format!("Node {node}"), &format_utility(utility));
    }
    print_kv("Total", &format_utility(summary.total_utility));
    if let Some(bound) = summary.max_utility {
        print_kv("Max achievable", &format_utility(bound));
    }

    for (title, change) in [
        ("Active links", EdgeChange::Removal),
        ("Possible links", EdgeChange::Addition),
    ] {
        print_subsection(title);
        let reports: Vec<&EdgeReport> = summary
            .edges
            .iter()
            .filter(|report| report.change == change)
            .collect();
        if reports.is_empty() {
            println!("  (none)");
        }
        for report in reports {
            let (u, v) = report.edge.endpoints();
            println!(
                "  {:10} total {:>9}  {u}: {:>9}  {v}: {:>9}  pair {:5}  net {:5}",
                report.edge.to_string(),
                format_utility(report.total_diff),
                format_utility(report.low_diff),
                format_utility(report.high_diff),
                report.pair_supported,
                report.net_supported,
            );
        }
    }

    print_subsection("Verdict");
    match summary.best_addition {
        Some(edge) => print_kv("Best addition", &edge.to_string()),
        None => print_kv("Best addition", "none (efficient against single additions)"),
    }
    print_kv(
        "Pairwise stable",
        if summary.pairwise_stable { "yes" } else { "no" },
    );
    Ok(())
}
