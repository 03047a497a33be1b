use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use snake_tui::game::GameConfig;
use snake_tui::modes::HumanMode;
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "snake_tui")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// Board width in cells
    #[arg(long, default_value = "20")]
    width: usize,

    /// Board height in cells
    #[arg(long, default_value = "15")]
    height: usize,

    /// Milliseconds between game ticks
    #[arg(long, default_value = "200")]
    tick_ms: u64,

    /// Score awarded per food eaten
    #[arg(long, default_value = "10")]
    food_reward: u32,

    /// Length of the snake at the start of a round
    #[arg(long, default_value = "1")]
    initial_length: usize,

    /// Write a log to this file (the terminal itself is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity when --log-file is set
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), file)
        .context("Failed to initialize logger")?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = GameConfig::new(cli.width, cli.height)
        .with_tick_interval(Duration::from_millis(cli.tick_ms))
        .with_food_reward(cli.food_reward)
        .with_initial_snake_length(cli.initial_length);
    info!("starting with {:?}", config);

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    let last_round = human_mode.snapshot();
    println!("Final Score: {}", last_round.score);
    println!("Snake Length: {}", last_round.length());

    Ok(())
}
