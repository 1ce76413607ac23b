//! Learn command - Observational learning on a random network

use std::{collections::BTreeMap, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use crate::{
    cli::{
        config::CommonArgs,
        output::{
            LearningProgress, format_utility, print_json, print_kv, print_section,
            print_subsection,
        },
    },
    exchange::NodeLinkData,
    export::write_beliefs_csv,
    graph::NodeId,
    learning::{
        Arm, BanditNodeState, BanditTrainer, NodeParams, NoopObserver, TrainingObserver,
        build_rng,
    },
    networks::gnp_random,
};

#[derive(Parser, Debug)]
#[command(about = "Run observational learning of a two-armed bandit on a random network")]
pub struct LearnArgs {
    /// Number of nodes
    #[arg(long, short = 'n')]
    pub nodes: Option<usize>,

    /// Link probability of the random network
    #[arg(long)]
    pub edge_prob: Option<f64>,

    /// Probability that the risky arm pays out
    #[arg(long, short = 'p')]
    pub prob: Option<f64>,

    /// Number of episodes
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Initial belief of every node that the risky arm pays
    #[arg(long)]
    pub belief: Option<f64>,

    /// Exploration probability of every node
    #[arg(long)]
    pub greedy: Option<f64>,

    /// Random seed for the learning run (the network uses seed + 1)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the belief time series to a CSV file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print the final network state as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Serialize)]
struct LearnSummary {
    prob: f64,
    episodes: usize,
    seed: Option<u64>,
    final_beliefs: BTreeMap<NodeId, f64>,
    network: NodeLinkData<BanditNodeState>,
}

fn risky_share(state: &BanditNodeState) -> f64 {
    if state.actions.is_empty() {
        return 0.0;
    }
    let risky = state.actions.iter().filter(|&&arm| arm == Arm::Risky).count();
    risky as f64 / state.actions.len() as f64
}

pub fn execute(args: LearnArgs) -> Result<()> {
    let mut config = args.common.load_config()?.learning;
    if let Some(nodes) = args.nodes {
        config = config.with_nodes(nodes);
    }
    if let Some(edge_prob) = args.edge_prob {
        config = config.with_edge_prob(edge_prob);
    }
    if let Some(prob) = args.prob {
        config = config.with_prob(prob);
    }
    if let Some(episodes) = args.episodes {
        config = config.with_episodes(episodes);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let node_params = NodeParams::new(
        args.belief.unwrap_or(config.node_params.prior_belief),
        args.greedy.unwrap_or(config.node_params.greedy),
    );
    config = config.with_node_params(node_params);
    config.validate()?;

    let mut graph_rng = build_rng(config.seed.map(|seed| seed.wrapping_add(1)));
    let graph = gnp_random(config.nodes, config.edge_prob, &mut graph_rng)?;
    info!(
        nodes = graph.node_count(),
        links = graph.edge_count(),
        "generated random network"
    );

    let params: BTreeMap<NodeId, NodeParams> =
        graph.nodes().map(|node| (node, config.node_params)).collect();
    let mut trainer = BanditTrainer::new(config.prob, config.episodes)?;
    if let Some(seed) = config.seed {
        trainer = trainer.with_seed(seed);
    }

    let mut progress = LearningProgress::new();
    let mut quiet = NoopObserver;
    let observer: &mut dyn TrainingObserver = if args.json {
        &mut quiet
    } else {
        &mut progress
    };
    let run = trainer.train_observed(&graph, &params, observer)?;

    if let Some(path) = &args.output {
        let rows = write_beliefs_csv(&run, path)
            .with_context(|| format!("failed to export beliefs to {}", path.display()))?;
        info!(rows, path = %path.display(), "exported belief series");
    }

    if args.json {
        return print_json(&LearnSummary {
            prob: config.prob,
            episodes: config.episodes,
            seed: config.seed,
            final_beliefs: run.final_beliefs(),
            network: NodeLinkData::from(&run),
        });
    }

    print_section("Observational Learning");
    print_kv("Nodes", &graph.node_count().to_string());
    print_kv("Links", &graph.edge_count().to_string());
    print_kv("Risky payout prob", &config.prob.to_string());
    print_kv("Episodes", &config.episodes.to_string());
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    print_subsection("Final state");
    println!(
        "  {:>4} {:>6} {:>9} {:>11}",
        "node", "degree", "belief", "risky share"
    );
    for (&node, state) in run.states() {
        println!(
            "  {:>4} {:>6} {:>9} {:>11}",
            node.to_string(),
            graph.degree(node),
            format_utility(state.belief()),
            format!("{:.1}%", risky_share(state) * 100.0),
        );
    }
    if let Some(path) = &args.output {
        print_kv("Beliefs written to", &path.display().to_string());
    }
    Ok(())
}
