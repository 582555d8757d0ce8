//! `switchconf` command line entry point.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{error, info};
use switchconf::{config, fleet};

/// Deploy a declarative VLAN configuration to web-managed switches
#[derive(Parser, Debug)]
#[command(name = "switchconf")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long)]
    config: PathBuf,

    /// Log in and print the pending changes without applying them
    #[arg(long)]
    dry_run: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(1);
        }
    };

    match config.to_yaml() {
        Ok(yaml) => println!("{}", yaml),
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(1);
        }
    }

    let timeout = args.timeout.map(Duration::from_secs);
    let mut sessions = match fleet::connect(&config, timeout).await {
        Ok(sessions) => sessions,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    if args.dry_run {
        match fleet::plan(&config, &mut sessions).await {
            Ok(plans) => {
                for (switch, changes) in plans {
                    println!("Switch {}: {} pending changes", switch, changes.len());
                    for change in changes {
                        println!("  {}", change);
                    }
                }
            }
            Err(e) => {
                error!("{}", e);
                return ExitCode::from(2);
            }
        }
        return ExitCode::SUCCESS;
    }

    match fleet::deploy(&config, &mut sessions).await {
        Ok(summaries) => {
            info!("Deployed {} switches", summaries.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}
