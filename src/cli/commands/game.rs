//! Game command - Best-response dynamics on a predefined network

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::{
        config::CommonArgs,
        output::{format_utility, print_json, print_kv, print_section, print_subsection},
    },
    exchange::NodeLinkData,
    games::{GameBoard, GameEvent, GameVariant, NodeGameState, VariantKind},
    graph::NodeId,
    networks::Preset,
};

#[derive(Parser, Debug)]
#[command(about = "Play best-response games on a network")]
pub struct GameArgs {
    /// Predefined network (eleven, six, cohesion, favor-a, favor-b)
    #[arg(long)]
    pub preset: Option<Preset>,

    /// Game variant (substitute, complement, coordination)
    #[arg(long)]
    pub variant: Option<VariantKind>,

    /// Threshold of the complement or coordination payoff
    #[arg(long, short = 't')]
    pub threshold: Option<f64>,

    /// Nodes to toggle, in order
    #[arg(long, num_args = 1..)]
    pub toggle: Vec<usize>,

    /// Print the final board as node-link JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Serialize)]
struct GameSummary {
    variant: GameVariant,
    equilibrium: bool,
    optimal_count: usize,
    network: NodeLinkData<NodeGameState>,
}

pub fn execute(args: GameArgs) -> Result<()> {
    let mut config = args.common.load_config()?.game;
    if let Some(preset) = args.preset {
        config = config.with_preset(preset);
    }
    if let Some(variant) = args.variant {
        config = config.with_variant(variant);
    }
    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold);
    }
    config.validate()?;

    let variant = config.game_variant();
    let mut board = GameBoard::new(
        config.preset.graph()?,
        config.variant.initial_action(),
        &variant,
    );
    for &node in &args.toggle {
        board = board
            .step(&variant, GameEvent::Toggle(NodeId::new(node)))
            .with_context(|| format!("cannot toggle node {node} on {}", config.preset))?;
    }

    if args.json {
        return print_json(&GameSummary {
            variant,
            equilibrium: board.is_equilibrium(),
            optimal_count: board.optimal_count(),
            network: NodeLinkData::from(&board),
        });
    }

    print_section("Best-Response Game");
    print_kv("Network", &config.preset.to_string());
    print_kv("Variant", &config.variant.to_string());
    print_kv("Threshold", &config.threshold().to_string());
    if !args.toggle.is_empty() {
        let toggled: Vec<String> = args.toggle.iter().map(ToString::to_string).collect();
        print_kv("Toggled", &toggled.join(", "));
    }

    print_subsection("Nodes");
    println!(
        "  {:>4} {:>6} {:>6} {:>9} {:>9} {:>8}",
        "node", "degree", "action", "util_0", "util_1", "optimal"
    );
    for (&node, state) in board.states() {
        println!(
            "  {:>4} {:>6} {:>6} {:>9} {:>9} {:>8}",
            node.to_string(),
            board.graph().degree(node),
            u8::from(state.action),
            format_utility(state.util_0),
            format_utility(state.util_1),
            if state.optimal { "yes" } else { "no" },
        );
    }

    print_subsection("Verdict");
    print_kv(
        "Optimal nodes",
        &format!("{}/{}", board.optimal_count(), board.states().len()),
    );
    print_kv(
        "Equilibrium",
        if board.is_equilibrium() { "yes" } else { "no" },
    );
    Ok(())
}
