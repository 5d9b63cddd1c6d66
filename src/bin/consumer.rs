use clap::{Parser, Subcommand};
use status_contract::client::{self, ClientError, DEFAULT_BASE_URL, StatusClient};
use status_contract::telemetry;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "status-consumer", version, about = "Client for the status service")]
struct Cli {
    /// Base URL of the status service
    #[arg(long, env = "STATUS_SERVICE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,
    /// Request timeout in seconds (defaults to the HTTP client's own)
    #[arg(
        long,
        env = "STATUS_CLIENT_TIMEOUT_SECS",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the service status
    Status,
}

fn run(cli: Cli) -> Result<(), ClientError> {
    match cli.cmd {
        Commands::Status => {
            let timeout = cli.timeout_secs.map(Duration::from_secs);
            let client = StatusClient::with_timeout(&cli.base_url, timeout)?;
            let response = client.fetch_status()?;
            println!("{}", client::render(&response));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    telemetry::init_tracing("warn");
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "status command failed");
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
