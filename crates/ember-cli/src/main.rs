mod script;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ember::counter::{CounterWidget, parse_target};
use ember::platform::headless::{Document, HeadlessRuntime};
use ember::{SiteConfig, config};

use script::Action;

#[derive(Parser)]
#[command(name = "ember")]
#[command(about = "Run the ember site runtime without a browser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the page on virtual time and print the final state as JSON
    Simulate {
        /// Virtual milliseconds to run
        #[arg(long, default_value = "3000")]
        ms: u64,
        /// Seed for the live-update randomness
        #[arg(long, default_value = "0")]
        seed: u64,
        /// JSON config overrides
        #[arg(long)]
        config: Option<PathBuf>,
        /// JSON array of timed events and commands
        #[arg(long)]
        script: Option<PathBuf>,
    },
    /// Print every value a counter renders on its way to `target`
    Counter {
        target: String,
        /// Frames to reach the target
        #[arg(long, default_value = "50")]
        steps: u32,
    },
    /// Validate a config file and print it with defaults filled in
    CheckConfig { file: PathBuf },
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            ms,
            seed,
            config,
            script,
        } => simulate(ms, seed, config.as_deref(), script.as_deref()),
        Commands::Counter { target, steps } => {
            let Some(target) = parse_target(&target) else {
                bail!("'{target}' is not a number");
            };
            for frame in CounterWidget::new(target, steps).render_all() {
                println!("{frame}");
            }
            Ok(())
        }
        Commands::CheckConfig { file } => {
            let config = load_config(&file)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            eprintln!("{}: ok", file.display());
            Ok(())
        }
    }
}

fn load_config(path: &Path) -> Result<SiteConfig> {
    let source =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    config::from_json(&source).with_context(|| format!("loading {}", path.display()))
}

fn simulate(ms: u64, seed: u64, config: Option<&Path>, script: Option<&Path>) -> Result<()> {
    let config = match config {
        Some(path) => load_config(path)?,
        None => SiteConfig::default(),
    };
    let actions = match script {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            script::parse(&source).with_context(|| format!("parsing {}", path.display()))?
        }
        None => Vec::new(),
    };

    let mut runtime = HeadlessRuntime::new(Document::portfolio(), config, seed);
    runtime.mount();
    for (at_ms, action) in actions {
        if at_ms > ms {
            log::warn!("skipping step at {at_ms} ms, past the end of the run");
            continue;
        }
        runtime.advance_by(at_ms.saturating_sub(runtime.now_ms()));
        match action {
            Action::Event(event) => {
                let outcome = runtime.dispatch(event);
                log::info!("t={at_ms}: {outcome:?}");
            }
            Action::Command(command) => runtime.execute(command),
        }
    }
    runtime.advance_by(ms.saturating_sub(runtime.now_ms()));

    println!("{}", serde_json::to_string_pretty(&runtime.snapshot())?);
    Ok(())
}
