//! Boot-time cache preloader.
//!
//! Invoked in place of init with init's arguments; forwards them verbatim
//! at the handoff. Prints nothing on a normal boot (raise `RUST_LOG` to
//! see progress); fatal conditions print `Error: <description>.` to stdout
//! and exit non-zero.

use std::ffi::OsString;

use tracing_subscriber::EnvFilter;

use bootwarm::{ForkExecHandoff, PreloadConfig, scheduler};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let argv: Vec<OsString> = std::env::args_os().collect();
    let config = PreloadConfig::default();
    let handoff = ForkExecHandoff::new(config.init_program.clone());

    match scheduler::run(&config, &handoff, &argv) {
        Ok(report) => {
            tracing::debug!(?report, "preload finished");
        }
        Err(err) => {
            println!("Error: {err}.");
            std::process::exit(1);
        }
    }
}
