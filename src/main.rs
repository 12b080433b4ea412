use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use casestudies::catalog::{slug, Catalog, Dependencies};
use casestudies::config::Config;
use casestudies::logging::init_tracing;

#[derive(Parser)]
#[command(name = "casestudies")]
#[command(about = "Browse and drive the architecture case studies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: <config dir>/casestudies/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog sections and entries
    List,

    /// Show the commands an entry accepts
    Commands {
        /// Entry path, e.g. "getting-started/basics"
        entry: String,
    },

    /// Open an entry, send it commands in order and print its final state
    Run {
        /// Entry path, e.g. "effects/timers"
        entry: String,

        /// Commands to send, one argument each
        commands: Vec<String>,

        /// Time to let effects run after each command, in milliseconds
        #[arg(long)]
        settle_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let filter = if cli.verbose { "debug" } else { config.logging.filter.as_str() };
    init_tracing(filter);

    let catalog = Catalog::case_studies();
    match cli.command {
        Commands::List => {
            println!("{}", catalog.title);
            for section in &catalog.sections {
                println!();
                println!("{}", section.header);
                for entry in &section.entries {
                    println!("  {:<30} {}/{}", entry.title, slug(section.header), slug(entry.title));
                }
            }
        }
        Commands::Commands { entry } => {
            let screen = (catalog.find(&entry)?.open)(&Dependencies::live(&config));
            for command in screen.commands() {
                println!("{command}");
            }
        }
        Commands::Run {
            entry,
            commands,
            settle_ms,
        } => {
            let settle = settle_ms.map(Duration::from_millis).unwrap_or(config.runtime.settle());
            let screen = (catalog.find(&entry)?.open)(&Dependencies::live(&config));
            for command in &commands {
                screen.dispatch(command)?;
                if screen.in_flight() > 0 {
                    tokio::time::sleep(settle).await;
                }
            }
            println!("{}", screen.render().trim_end());
        }
    }

    Ok(())
}
