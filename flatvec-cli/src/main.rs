use anyhow::Result;
use clap::{Parser, Subcommand};
use flatvec_cli::commands;
use flatvec_core::constants::DEFAULT_MEMORY_SLOTS;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "flatvec")]
#[command(about = "Flatvec - Dynamic arrays over a simulated flat memory", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of slots in the flat memory
    #[arg(long, global = true, default_value_t = DEFAULT_MEMORY_SLOTS)]
    memory_slots: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay the push/pop walkthrough and show the layout after each step
    Demo,

    /// Run a JSON script of array operations
    Run {
        /// Script file (JSON array of operations), or - for stdin
        #[arg(short, long)]
        script: String,

        /// Fail every allocation after this many succeed
        #[arg(long)]
        fail_after: Option<usize>,

        /// Output JSON file for the step trace
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Push N values and report resize behaviour
    Growth {
        /// Number of values to push
        #[arg(short, long, default_value = "100")]
        count: usize,

        /// Output JSON file for the growth report
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Demo => commands::demo::execute(cli.memory_slots),

        Commands::Run {
            script,
            fail_after,
            output,
        } => commands::run::execute(&script, cli.memory_slots, fail_after, output.as_deref()),

        Commands::Growth { count, output } => {
            commands::growth::execute(count, cli.memory_slots, output.as_deref())
        }
    }
}
