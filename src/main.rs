use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use swipedeck::core::cards;
use swipedeck::core::config::{self, CliOverrides};

#[derive(Parser)]
#[command(name = "swipedeck", about = "Swipe through a deck of cards in the terminal")]
struct Args {
    /// JSON deck file (defaults to a built-in sample deck)
    #[arg(short, long)]
    deck: Option<PathBuf>,

    /// Fraction of the width a drag must pass to count as a swipe
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Log level written to swipedeck.log
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - writes to swipedeck.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("swipedeck.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    log::info!("Swipedeck starting up");

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            eprintln!("swipedeck: {e}");
            std::process::exit(2);
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            deck_file: args.deck,
            threshold: args.threshold,
        },
    );

    let data = match &resolved.deck_file {
        Some(path) => match cards::load_cards(path) {
            Ok(data) => data,
            Err(e) => {
                log::error!("{e}");
                eprintln!("swipedeck: {}: {e}", path.display());
                std::process::exit(2);
            }
        },
        None => cards::sample_cards(),
    };

    swipedeck::tui::run(resolved, data)
}
