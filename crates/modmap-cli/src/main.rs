#![forbid(unsafe_code)]

mod cmd;
mod context;
mod explore;
mod output;

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use modmap_core::config::{EffectiveConfig, resolve_config};
use modmap_graph::ModuleGraph;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::context::{Explorer, load_adjacency};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "modmap: explore large module dependency graphs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Dependency data: a JSON object mapping each module id to the ids it imports.
    #[arg(long, global = true, env = "MODMAP_DATA", default_value = "data.json")]
    data: PathBuf,

    /// Project config file (default: nearest `.modmap/config.toml`).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Label language, e.g. `zh-HANS`. Overrides the configured language.
    #[arg(long, global = true, value_name = "CODE")]
    lang: Option<String>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "Export nodes and links for a renderer",
        long_about = "Print positioned nodes, links and categories as JSON for an external renderer.",
        after_help = "EXAMPLES:\n    # Export with raw ids as labels\n    modmap export > graph.json\n\n    # Export with Chinese labels to a file\n    modmap --lang zh-HANS export --output graph.json"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one module",
        long_about = "Show the info panel for one module: label, degrees, rank and neighbours.",
        after_help = "EXAMPLES:\n    # Show a module\n    modmap show Algebra.Group.Basic\n\n    # Emit machine-readable output\n    modmap show Algebra.Group.Basic --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Read",
        about = "Fuzzy-search module ids and labels",
        long_about = "Rank modules whose id or label contains the query characters in order.",
        after_help = "EXAMPLES:\n    # Find group theory modules\n    modmap search group\n\n    # Top three, as JSON\n    modmap search alg.grp -n 3 --json"
    )]
    Search(cmd::search::SearchArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Print the layout order",
        long_about = "Print modules in layout order (dependencies first) with their normalized ranks.",
        after_help = "EXAMPLES:\n    # Whole order\n    modmap order\n\n    # First 20 as text rows\n    modmap order -n 20 --format text"
    )]
    Order(cmd::order::OrderArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Graph statistics and import cycles",
        long_about = "Report size, density, components, degree extremes and import cycles.",
        after_help = "EXAMPLES:\n    # Summary\n    modmap stats\n\n    # Emit machine-readable output\n    modmap stats --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Interactive",
        about = "Drive the explorer from stdin",
        long_about = "Read click/search/history interactions from stdin, one per line, and print every view command.",
        after_help = "EXAMPLES:\n    # Scripted session\n    printf 'click Order.Basic\\nsearch ring\\nback\\n' | modmap explore\n\n    # JSON lines for another program\n    modmap explore --json"
    )]
    Explore(cmd::explore::ExploreArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    modmap completions bash\n\n    # Generate zsh completions\n    modmap completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("MODMAP_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "modmap=debug,info"
        } else {
            "modmap=info,warn"
        })
    });

    let format = env::var("MODMAP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: Cli, output: &mut OutputMode, project_root: &Path) -> anyhow::Result<()> {
    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args, &mut command, &mut std::io::stdout());
    }

    let config: EffectiveConfig =
        resolve_config(project_root, cli.config.as_deref(), cli.lang.as_deref())?;
    *output = resolve_output_mode(cli.format, cli.json, config.user.output.as_deref());
    debug!(?output, language = ?config.language, "config resolved");

    match cli.command {
        Commands::Stats(ref args) => {
            let adjacency = load_adjacency(&cli.data, &config)?;
            cmd::stats::run_stats(args, *output, &ModuleGraph::from_adjacency(&adjacency))
        }
        Commands::Export(ref args) => {
            let explorer = Explorer::load(&cli.data, &config, project_root)?;
            cmd::export::run_export(args, *output, &explorer)
        }
        Commands::Show(ref args) => {
            let explorer = Explorer::load(&cli.data, &config, project_root)?;
            cmd::show::run_show(args, *output, &explorer)
        }
        Commands::Search(ref args) => {
            let explorer = Explorer::load(&cli.data, &config, project_root)?;
            cmd::search::run_search(args, *output, &explorer)
        }
        Commands::Order(ref args) => {
            let explorer = Explorer::load(&cli.data, &config, project_root)?;
            cmd::order::run_order(args, *output, &explorer)
        }
        Commands::Explore(ref args) => {
            let mut explorer = Explorer::load(&cli.data, &config, project_root)?;
            cmd::explore::run_explore(args, *output, &mut explorer)
        }
        Commands::Completions(_) => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let mut output = resolve_output_mode(cli.format, cli.json, None);
    let result = env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|project_root| run(cli, &mut output, &project_root));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            if render_error(output, &CliError::from_anyhow(&err)).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
