use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use fd_graph::{Edge, Graph, NodeRef};
use fd_layout::{Detail, LayoutConfig, optimize_with_stats};

mod error;
mod manifest;

use error::CliResult;
use manifest::{Manifest, ResolvedManifest};

#[derive(Parser)]
#[command(name = "fd-cli")]
#[command(about = "flowdiag CLI - dataflow composition diagram tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the extracted graph of a composition manifest
    Show {
        /// Path to the composition YAML manifest
        manifest_path: PathBuf,
    },
    /// Compute a grid layout for a composition manifest
    Layout {
        /// Path to the composition YAML manifest
        manifest_path: PathBuf,
        /// Edge detail level to optimize for
        #[arg(long, value_enum, default_value = "direct")]
        detail: DetailArg,
        /// Fixed random seed for reproducible layouts
        #[arg(long)]
        seed: Option<u64>,
        /// Iteration cap for the layout search
        #[arg(long, default_value_t = 25_000)]
        max_iterations: usize,
        /// Emit positions as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DetailArg {
    /// Collapsed component pairs, no slot or adapter detail
    Simple,
    /// Collapsed adapter chains with hop counts
    Direct,
    /// Adapters placed as individual nodes
    Full,
}

impl From<DetailArg> for Detail {
    fn from(arg: DetailArg) -> Self {
        match arg {
            DetailArg::Simple => Detail::Collapsed,
            DetailArg::Direct => Detail::Direct,
            DetailArg::Full => Detail::Expanded,
        }
    }
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { manifest_path } => cmd_show(&manifest_path),
        Commands::Layout {
            manifest_path,
            detail,
            seed,
            max_iterations,
            json,
        } => cmd_layout(&manifest_path, detail.into(), seed, max_iterations, json),
    }
}

fn cmd_show(manifest_path: &Path) -> CliResult<()> {
    let resolved = Manifest::load(manifest_path)?.resolve()?;
    let graph = Graph::build(&resolved.composition, &resolved.excluded)?;

    let mut comps: Vec<&str> = graph
        .components()
        .iter()
        .map(|c| node_label(&resolved, NodeRef::Component(*c)))
        .collect();
    comps.sort_unstable();
    println!("Components ({}):", comps.len());
    for name in comps {
        println!("  {}", name);
    }

    let mut adapters: Vec<&str> = graph
        .adapters()
        .iter()
        .map(|a| node_label(&resolved, NodeRef::Adapter(*a)))
        .collect();
    adapters.sort_unstable();
    println!("Adapters ({}):", adapters.len());
    for name in adapters {
        println!("  {}", name);
    }

    println!("Direct edges ({}):", graph.direct_edges().len());
    for edge in graph.direct_edges() {
        println!("  {}", format_edge(&resolved, edge));
    }

    println!("Expanded edges ({}):", graph.edges().len());
    for edge in graph.edges() {
        println!("  {}", format_edge(&resolved, edge));
    }

    println!("Connectors ({}):", graph.simple_edges().len());
    for (src, trg) in graph.simple_edges() {
        println!(
            "  {} -> {}",
            node_label(&resolved, NodeRef::Component(*src)),
            node_label(&resolved, NodeRef::Component(*trg))
        );
    }

    Ok(())
}

fn cmd_layout(
    manifest_path: &Path,
    detail: Detail,
    seed: Option<u64>,
    max_iterations: usize,
    json: bool,
) -> CliResult<()> {
    let resolved = Manifest::load(manifest_path)?.resolve()?;
    let graph = Graph::build(&resolved.composition, &resolved.excluded)?;

    let config = LayoutConfig {
        detail,
        max_iterations,
        seed,
        ..Default::default()
    };
    let result = optimize_with_stats(&graph, &config);

    let mut rows: Vec<(&str, i32, i32)> = result
        .positions
        .iter()
        .map(|(node, p)| (node_label(&resolved, *node), p.x, p.y))
        .collect();
    rows.sort_unstable();

    if json {
        let positions: serde_json::Map<String, serde_json::Value> = rows
            .iter()
            .map(|(name, x, y)| {
                (
                    (*name).to_string(),
                    serde_json::json!({ "x": x, "y": y }),
                )
            })
            .collect();
        let doc = serde_json::json!({
            "positions": positions,
            "iterations": result.iterations,
            "score": result.score,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!(
            "Layout done ({} iterations, score {})",
            result.iterations, result.score
        );
        for (name, x, y) in rows {
            println!("  {:<20} {:>4} {:>4}", name, x, y);
        }
    }

    Ok(())
}

fn node_label(resolved: &ResolvedManifest, node: NodeRef) -> &str {
    match node {
        NodeRef::Component(c) => resolved.comp_names.get(&c).map(String::as_str),
        NodeRef::Adapter(a) => resolved.adapter_names.get(&a).map(String::as_str),
    }
    .unwrap_or("?")
}

fn format_edge(resolved: &ResolvedManifest, edge: &Edge) -> String {
    let hops = if edge.hops > 0 {
        format!(" ({} hops)", edge.hops)
    } else {
        String::new()
    };
    format!(
        "{}[{}] -> {}[{}]{}",
        node_label(resolved, edge.source),
        edge.out_slot.as_deref().unwrap_or("-"),
        node_label(resolved, edge.target),
        edge.in_slot.as_deref().unwrap_or("-"),
        hops
    )
}
