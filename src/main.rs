//! supaprobe - smoke test for a hosted auth service and its database
//!
//! Reads its configuration from the environment, runs every probe in order
//! and narrates the results on stdout. Exits 1 only when the mandatory
//! configuration is missing or invalid.

use supaprobe::core::fatal_message;
use supaprobe::{ProbeConfig, ProbeRunner, Reporter};

use eyre::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; the narration owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let config = ProbeConfig::from_env();
    let runner = ProbeRunner::new(config);
    let mut report = Reporter::stdout();

    if let Err(e) = runner.run(&mut report).await {
        error!(code = e.code_str(), fatal = e.code.is_fatal(), "run aborted");
        eprintln!("{}", fatal_message(&e));
        std::process::exit(1);
    }

    Ok(())
}
