use clap::{Parser, Subcommand};
use ferrous_resolv_domain::{CliOverrides, ResolveError};
use std::net::{IpAddr, Ipv4Addr};
use std::process::ExitCode;
use tracing::{debug, error};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "ferrous-resolv")]
#[command(version)]
#[command(about = "Ferrous Resolv - minimal stub DNS resolver")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Name server address (overrides configuration)
    #[arg(long, global = true)]
    server: Option<IpAddr>,

    /// Name server port
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Search suffix appended to single-label names
    #[arg(long, global = true)]
    search: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a host name to its IPv4 address
    Lookup {
        #[arg(value_name = "HOST")]
        host: String,
    },
    /// Resolve an IPv4 address to its host name
    Reverse {
        #[arg(value_name = "IPV4")]
        address: Ipv4Addr,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        nameserver: cli.server,
        port: cli.port,
        search: cli.search.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = match bootstrap::load_config(cli.config.as_deref(), cli_overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ferrous-resolv: {:#}", e);
            return ExitCode::from(2);
        }
    };

    bootstrap::init_logging(&config);
    debug!("Starting Ferrous Resolv v{}", env!("CARGO_PKG_VERSION"));

    let services = match di::ResolverServices::new(&config) {
        Ok(services) => services,
        Err(e) => {
            error!(error = %e, "Failed to build resolver services");
            eprintln!("ferrous-resolv: {:#}", e);
            return ExitCode::from(2);
        }
    };

    match run(&services, cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, "Lookup failed");
            eprintln!("ferrous-resolv: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Prints the answer; `Ok(false)` when the name or address was not found.
fn run(services: &di::ResolverServices, command: Command) -> Result<bool, ResolveError> {
    match command {
        Command::Lookup { host } => match services.resolver.resolve_address(&host)? {
            Some(address) => {
                println!("{}", address);
                Ok(true)
            }
            None => {
                eprintln!("{}: not found", host);
                Ok(false)
            }
        },
        Command::Reverse { address } => {
            match services.resolver.resolve_hostname(IpAddr::V4(address))? {
                Some(name) => {
                    println!("{}", name);
                    Ok(true)
                }
                None => {
                    eprintln!("{}: not found", address);
                    Ok(false)
                }
            }
        }
    }
}
