//! `json-edit`: synthesize and apply editor patches from the command line.
//!
//! Usage:
//!   json-edit [--legacy-order] <command> [args...] < document.json
//!
//! Diagnostics go to stderr; set `RUST_LOG=json_edit=debug` to see how
//! clipboard text was recovered and how many keys were reordered.

use std::io::{self, Read, Write};

use json_edit::cli::{parse_args, run, CliError, USAGE};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_filter(filter);
    tracing_subscriber::registry().with(stderr_layer).init();
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (options, command) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e @ CliError::Usage(_)) => {
            eprintln!("{e}\n\n{USAGE}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run(buf.trim(), options, &command) {
        Ok(output) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{output}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
