mod args;
mod input;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use libsql_node::{LibsqlClient, SqlNodeError, host_items, run_items};
use serde_json::Value as JsonValue;
use tracing::Level;

use crate::args::{Args, RunConfig};
use crate::input::load_operations;
use crate::logging::LogWriter;

fn main() -> ExitCode {
    let args = Args::parse();
    let config = match RunConfig::from_args(args) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(2);
        }
    };
    let writer = match LogWriter::new(config.log.clone()) {
        Ok(writer) => writer,
        Err(err) => {
            eprintln!("failed to open log file: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(false)
        .with_max_level(if config.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!("failed to start runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&config)) {
        Ok(items) => {
            let rendered = if config.pretty {
                serde_json::to_string_pretty(&items)
            } else {
                serde_json::to_string(&items)
            };
            match rendered {
                Ok(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    tracing::error!("failed to render output: {err}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(err) => {
            tracing::error!(kind = err.kind(), "{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &RunConfig) -> Result<JsonValue, SqlNodeError> {
    let descriptors = load_operations(&config.operations)?;
    tracing::info!(items = descriptors.len(), policy = ?config.policy, "loaded operations");

    let client = LibsqlClient::connect(config.database.clone()).await?;
    let outputs = run_items(&client, &descriptors, config.policy).await?;
    Ok(JsonValue::Array(host_items(&outputs)))
}
