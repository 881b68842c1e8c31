use std::io::Write;

use clap::Parser;
use kc_collect::{
    CollectorConfig,
    CollectorManager,
    CongroupUpdate,
};
use kc_core::logging;
use kc_core::prelude::*;
use kube::Client;
use tracing::*;

#[derive(Parser, Debug)]
struct Options {
    #[arg(short, long)]
    config_file: String,

    #[arg(short, long, default_value = "info")]
    verbosity: String,
}

fn write_update(out: &mut impl Write, update: &CongroupUpdate) -> EmptyResult {
    serde_json::to_writer(&mut *out, update)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[instrument(ret, err)]
async fn run(args: Options) -> EmptyResult {
    let config = CollectorConfig::load(&args.config_file)?;
    let client = Client::try_default().await?;
    let (mut manager, mut rx) = CollectorManager::start(client, &config)?;

    // Updates queue up in the channel until every cache has done its initial list
    let ready = tokio::select! {
        res = manager.wait_ready() => Some(res),
        _ = tokio::signal::ctrl_c() => None,
    };
    match ready {
        Some(res) => {
            res?;
            info!("all caches ready");
        },
        None => {
            info!("interrupted before caches were ready, shutting down");
            manager.shutdown().await;
            return Ok(());
        },
    }

    let mut stdout = std::io::stdout().lock();
    loop {
        tokio::select! {
            update = rx.recv() => match update {
                Some(update) => write_update(&mut stdout, &update)?,
                None => {
                    warn!("all watchers exited");
                    break;
                },
            },
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, shutting down");
                break;
            },
        }
    }

    manager.shutdown().await;
    Ok(())
}

#[tokio::main]
async fn main() -> EmptyResult {
    let args = Options::parse();
    logging::setup(&args.verbosity);
    run(args).await
}

#[cfg(test)]
mod tests;
