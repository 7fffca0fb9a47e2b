use anyhow::Context;
use cicd_demo::server::TerminationSignals;
use cicd_demo::{AppConfig, Application};
use std::process::ExitCode;
use tracing::{debug, error};

/// First line written to stderr when startup fails
fn startup_failure_message(err: &anyhow::Error) -> String {
    format!("Failed to start web server: {:#}", err)
}

/// Banner, signal registration, startup, then block until SIGTERM/SIGINT
async fn run() -> anyhow::Result<()> {
    let app = Application::new(AppConfig::default());
    app.print_banner();

    // Register before binding so a signal during startup is not lost
    let mut signals =
        TerminationSignals::register().context("could not register termination handlers")?;

    app.run_until(async move {
        let signal = signals.recv().await;
        debug!(signal, "Initiating graceful shutdown");
    })
    .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing; stdout is reserved for the operator lines
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Startup failed");
            eprintln!("{}", startup_failure_message(&e));
            // Full cause chain, plus a backtrace when RUST_BACKTRACE is set
            eprintln!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
