//! A Poker@Home bot client.
//!
//! Connects to a Poker@Home server over WebSockets and keeps a validated
//! snapshot of the table, consulting the (placeholder) bot whenever the
//! server requests an action.

use anyhow::{Context, Result};
use log::info;
use pico_args::Arguments;
use poker_at_home::{NoopBot, TableStream};

mod transport;

use transport::WebSocketSource;

const HELP: &str = "\
Watch a Poker@Home table as a bot

USAGE:
  pah_bot [OPTIONS] SERVER_URL

ARGS:
  SERVER_URL            WebSockets URL to connect to (e.g. ws://localhost:9999)

OPTIONS:
  --log-level LEVEL     Log filter for stderr output  [default: info]

FLAGS:
  -h, --help            Print help information
";

struct Args {
    server_url: String,
    log_level: String,
}

fn parse_args() -> Result<Args> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let log_level = pargs
        .value_from_str("--log-level")
        .unwrap_or_else(|_| "info".to_string());
    let server_url = pargs
        .free_from_str()
        .context("missing SERVER_URL argument")?;

    Ok(Args {
        server_url,
        log_level,
    })
}

fn main() -> Result<()> {
    let args = parse_args()?;

    // Logging is configured here, once, from explicit input; library code
    // only ever emits through the `log` facade.
    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .init();

    info!("connecting to {}", args.server_url);
    let mut source = WebSocketSource::connect(&args.server_url)?;

    let mut stream = TableStream::new(NoopBot);
    stream.run(&mut source)
}
