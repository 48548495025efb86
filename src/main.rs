//! wsbuild - build and test a workspace on a CI farm agent
//!
//! Parses the job arguments, loads the farm configuration, and runs the
//! build, build-tests, run-tests sequence, exiting with the first
//! non-zero build-tool exit code.

use std::env;
use std::process;

use clap::Parser;

use wsbuild::cli::Cli;
use wsbuild::error::Error;

fn init_logging() {
    let default_level = if env::var("WSBUILD_DEBUG")
        .map_or(false, |v| v == "1" || v.to_lowercase() == "true")
    {
        "debug"
    } else {
        "info"
    };
    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from(env_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(1);
        }
    };

    let job = cli.into_job(config);
    match job.run().await {
        Ok(exit_code) => process::exit(exit_code),
        Err(Error::GpuSupportMissing) => {
            // the farm treats this distinct code as a misconfigured agent
            println!(
                "--require-gpu-support is enabled but can not detect nvidia support installed"
            );
            process::exit(-1);
        }
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(1);
        }
    }
}
