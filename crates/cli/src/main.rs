use clap::{Parser, Subcommand};
use ferrous_authdns_domain::CliOverrides;
use std::process::ExitCode;
use tracing::info;

mod bootstrap;
mod di;
mod output;

#[derive(Parser)]
#[command(name = "ferrous-authdns")]
#[command(version)]
#[command(about = "Ferrous AuthDNS - answers straight from the authoritative nameservers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Per-query timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Local recursive resolver (repeatable); replaces resolv.conf
    #[arg(long = "resolver", value_name = "IP")]
    resolvers: Vec<String>,

    /// Fall back to the local resolvers when the authoritative walk fails
    #[arg(long)]
    system_fallback: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the A record of a domain
    A { domain: String },

    /// Fetch the AAAA record of a domain
    Aaaa { domain: String },

    /// Check that a domain's CNAME chain ends at the expected target
    VerifyCname { domain: String, target: String },

    /// Show the authoritative nameservers of a domain
    Ns { domain: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        query_timeout_ms: cli.timeout_ms,
        system_fallback: cli.system_fallback.then_some(true),
        local_resolvers: cli.resolvers.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting Ferrous AuthDNS v{}", env!("CARGO_PKG_VERSION"));

    let services = di::DnsServices::new(&config)?;
    let use_case = services.resolve_record;
    let format = output::Format::from_flag(cli.json);

    let succeeded = match &cli.command {
        Command::A { domain } => output::record(format, use_case.query_a(domain).await)?,
        Command::Aaaa { domain } => output::record(format, use_case.query_aaaa(domain).await)?,
        Command::VerifyCname { domain, target } => {
            output::record(format, use_case.verify_cname(domain, target).await)?
        }
        Command::Ns { domain } => {
            output::nameservers(format, use_case.authoritative_nameservers(domain).await)?
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
