//! Run the tags view onboarding demo.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tagview::geom::Expanse;
use tagview_demo::{config::Config, dump, init_logging, onboarding::Onboarding, terminal};

/// CLI flags for the onboarding demo.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// TOML file with `[tags]` and `[demo]` tables.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Write tracing output to this file.
    #[clap(short, long)]
    log: Option<PathBuf>,

    /// Print one frame per page to stdout and exit.
    #[clap(short, long)]
    dump: bool,

    /// Screen width for --dump.
    #[clap(long, default_value_t = 80)]
    width: u32,

    /// Screen height for --dump.
    #[clap(long, default_value_t = 24)]
    height: u32,
}

/// Run the demo.
pub fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log {
        init_logging(path)?;
    }
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut app = Onboarding::new(&config, Expanse::new(args.width, args.height))?;
    if args.dump {
        for line in dump(&mut app)? {
            println!("{line}");
        }
        return Ok(());
    }
    terminal::runloop(app)
}
