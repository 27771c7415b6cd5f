//! Binary entry point: prompt for payment details, submit, poll, report.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use momo_collect::cli::Cli;
use momo_collect::collect::collect;
use momo_collect::config::Config;
use momo_collect::poll::{PollConfig, ProgressFn};
use momo_collect::prompt::read_payment_request;
use momo_collect::{GatewayClient, ReqwestHttpClient, logging};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init("momo_collect=warn");

    // Config is loaded before prompting so a missing credential fails
    // without asking the user for anything.
    let config = cli.apply(Config::from_env()?);

    let request = {
        let mut stdin = io::stdin().lock();
        let mut stdout = io::stdout().lock();
        read_payment_request(&mut stdin, &mut stdout)
            .context("failed to read payment details")?
    };

    println!();
    println!("=== Payment Details ===");
    println!("Number: {}", request.from);
    println!("Amount: {}", request.amount);
    println!("Description: {}", request.description);
    println!();
    println!("Sending payment request to the gateway...");

    // Ctrl-C cancels the poll cooperatively instead of killing the
    // process mid-wait; the run then reports the cancellation and exits
    // non-zero.
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling");
            signal_token.cancel();
        }
    });

    let gateway = GatewayClient::new(&config, ReqwestHttpClient::new());
    let poll_config = PollConfig::from(&config);

    let progress: ProgressFn = Arc::new(|attempt, max| {
        println!("Status: PENDING... (attempt {attempt}/{max})");
    });

    let result = collect(
        &gateway,
        poll_config,
        request,
        &cancel,
        |reference| {
            println!();
            println!("Transaction initialized");
            println!("Reference: {reference}");
            println!("Waiting for mobile money confirmation...");
        },
        Some(progress),
    )
    .await?;

    println!();
    println!("=== FINAL TRANSACTION STATUS ===");
    println!("{}", result.outcome);

    Ok(())
}
