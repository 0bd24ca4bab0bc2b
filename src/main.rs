use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use xiangqi_rules::config::{Config, Mode};
use xiangqi_rules::Player;

mod tui;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// A person plays one side, the engine the other.
    Hve,
    /// Two people share the terminal.
    Hvh,
    /// The engine plays both sides.
    Eve,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SideArg {
    Red,
    Black,
}

impl From<SideArg> for Player {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Red => Player::Red,
            SideArg::Black => Player::Black,
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Play Xiangqi in the terminal against a UCI engine")]
struct Arguments {
    /// UCI engine executable (e.g. pikafish). Without it the engine side plays random legal moves.
    #[arg(short, long)]
    engine: Option<PathBuf>,
    #[arg(short, long, default_value_t = 6)]
    depth: u32,
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long, default_value_t = 64)]
    hash_mb: usize,
    #[arg(short, long, value_enum, default_value_t = ModeArg::Hve)]
    mode: ModeArg,
    /// The side the person plays in engine games.
    #[arg(long, value_enum, default_value_t = SideArg::Red)]
    side: SideArg,
    #[arg(long, value_enum, default_value_t = SideArg::Red)]
    first: SideArg,
    /// Seed for the fallback move picker.
    #[arg(long)]
    seed: Option<u64>,
    /// Log filter, e.g. `debug` or `xiangqi_rules=trace`. `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Arguments {
    fn into_config(self) -> Config {
        Config {
            search_depth: self.depth,
            engine_timeout_ms: self.timeout_ms,
            engine_path: self.engine,
            engine_threads: self.threads,
            engine_hash_mb: self.hash_mb,
            mode: match self.mode {
                ModeArg::Hve => Mode::HumanVsEngine,
                ModeArg::Hvh => Mode::HumanVsHuman,
                ModeArg::Eve => Mode::EngineVsEngine,
            },
            starting_side: self.first.into(),
            human_side: self.side.into(),
            seed: self.seed,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let arguments = Arguments::parse();

    env_logger::Builder::new()
        .parse_filters(&arguments.log_level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    tui::run(arguments.into_config())
        .await
        .context("terminal session failed")
}
