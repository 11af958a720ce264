use clap::Parser;
use log::LevelFilter;

use fontdump::{run, Args, Error};

fn main() -> Result<(), Error> {
    // the per-glyph progress lines are the tool's primary console output;
    // RUST_LOG still overrides
    env_logger::builder()
        .format_timestamp_micros()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    run(&args)
}
