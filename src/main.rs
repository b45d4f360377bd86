use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use dagnet_visualizer::config::{self, resolve_conditions};
use dagnet_visualizer::diagnostics;
use dagnet_visualizer::graph::{self, AbstractGraph, NodeKind};
use dagnet_visualizer::render::{self, LayoutEngine, RankDir};
use dagnet_visualizer::Result;

use anyhow::Context;

#[derive(Parser)]
#[command(name = "dagnet-viz")]
#[command(about = "DAG description visualizer", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the DAG. Format follows the output extension (.dot/.gv written directly).
    Render {
        #[arg(short = 'i', long)]
        config: PathBuf,

        /// Output file; DOT goes to stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,

        #[arg(short = 'r', long, value_enum, ignore_case = true, default_value_t = RankDir::TopBottom)]
        rankdir: RankDir,

        /// Graphviz layout executable.
        #[arg(long, default_value = render::engine::DEFAULT_PROGRAM)]
        engine: PathBuf,

        /// Apply enable_if / disable_if / bypass_if against the current environment.
        #[arg(long)]
        resolve_env: bool,
    },

    /// Print node and edge counts.
    Inspect {
        #[arg(short = 'i', long)]
        config: PathBuf,

        #[arg(long)]
        resolve_env: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init_logging(cli.verbose);

    match cli.cmd {
        Commands::Render {
            config,
            out,
            rankdir,
            engine,
            resolve_env,
        } => {
            let graph = load_graph(&config, resolve_env)?;

            match out {
                Some(out) => {
                    render::render_to_path(&graph, rankdir, &out, &LayoutEngine::new(engine))
                        .with_context(|| {
                            diagnostics::error_message(format!("render {}", out.display()))
                        })?;
                    println!("Wrote {}", out.display());
                }
                None => print!("{}", render::to_dot(&graph, rankdir)),
            }
        }
        Commands::Inspect {
            config,
            resolve_env,
        } => {
            let graph = load_graph(&config, resolve_env)?;
            println!("operators: {}", graph.count(NodeKind::Operator));
            println!("channels:  {}", graph.count(NodeKind::Channel));
            println!("outputs:   {}", graph.count(NodeKind::Output));
            println!("edges:     {}", graph.edge_count());
        }
    }

    Ok(())
}

/// 1) Parse the description, 2) optionally resolve env conditions, 3) build.
fn load_graph(path: &Path, resolve_env: bool) -> Result<AbstractGraph> {
    let mut dag = config::load_config(path)?;

    if resolve_env {
        dag = resolve_conditions(&dag, |name| std::env::var(name).ok())
            .with_context(|| diagnostics::error_message("resolve operator conditions"))?;
    }

    if dag.op.is_empty() {
        diagnostics::warn(format!("{} contains no operators", path.display()));
    }

    let graph = graph::build(&dag).with_context(|| {
        diagnostics::error_message(format!("build graph from {}", path.display()))
    })?;
    Ok(graph)
}
