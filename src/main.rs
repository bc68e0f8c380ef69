//! library-access - inspect what a principal may see
//!
//! Resolves a principal's roles against the backend and prints the resulting
//! capability flags, navigation menu, or route decision.

use anyhow::Context;
use clap::{Parser, Subcommand};
use library_access::auth::rbac::NavigationView;
use library_access::utils::init_tracing;
use library_access::{
    AuthState, BackendClient, BackendRoleSource, CapabilityTable, Config, GateOutcome,
    NavigationFilter, Principal, RoleResolver, RouteTable, Session,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "library-access", version, about)]
struct Cli {
    /// YAML configuration file; environment variables are used when omitted
    #[arg(long, env = "LIBRARY_ACCESS_CONFIG")]
    config: Option<PathBuf>,

    /// Principal to resolve roles for
    #[arg(long, env = "LIBRARY_PRINCIPAL")]
    principal: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the principal's roles and capability flags
    Roles,
    /// Print the navigation menu visible to the principal
    Nav {
        /// Mark the item at this path as active
        #[arg(long)]
        current: Option<String>,
    },
    /// Print what the route at PATH would render
    Check { path: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::from_env()?,
    };
    init_tracing(&config.logging)?;

    let client = Arc::new(BackendClient::new(config.backend())?);
    let source = Arc::new(BackendRoleSource::from_config(client, config.backend()));
    let table = CapabilityTable::from_config(&config.access().capabilities)?;
    let resolver = Arc::new(RoleResolver::new(source, table));

    let principal = Principal::new(cli.principal.as_str());
    let session = Session::start(principal.clone(), resolver).await;
    let state = session.roles();

    match cli.command {
        Command::Roles => {
            if let Some(error) = &state.error {
                anyhow::bail!("failed to load roles: {}", error);
            }
            println!("principal: {}", principal.id);
            let roles: Vec<&str> = state.roles.iter().map(|role| role.as_str()).collect();
            println!("roles:     {}", roles.join(", "));
            println!("member:    {}", state.is_member());
            println!("librarian: {}", state.is_librarian());
            println!("admin:     {}", state.is_admin());
        }
        Command::Nav { current } => {
            let view = NavigationFilter::library().view(&state);
            if view.is_empty() {
                println!("(no navigation items)");
            }
            for (group, items) in view.non_empty_groups() {
                println!("{}", group.title());
                for item in items {
                    let marker = match &current {
                        Some(path) if NavigationView::is_active(item, path) => "*",
                        _ => " ",
                    };
                    println!(
                        " {} {} {:<18} {}",
                        marker,
                        item.icon.unwrap_or(" "),
                        item.label,
                        item.path
                    );
                }
            }
        }
        Command::Check { path } => {
            let routes = RouteTable::library(config.access())
                .context("failed to build route table")?;
            let decision = routes.evaluate(&path, &AuthState::signed_in(principal), &state);
            if let Some(matched) = &decision.matched {
                println!("route:   {}", matched.pattern());
            }
            match decision.outcome {
                GateOutcome::Loading => println!("outcome: loading"),
                GateOutcome::Content => println!("outcome: allowed"),
                GateOutcome::Error { message, fallback } => {
                    println!("outcome: error ({}), fallback {}", message, fallback.to)
                }
                GateOutcome::Redirect(redirect) => match redirect.reason {
                    Some(reason) => println!("outcome: redirect to {} ({})", redirect.to, reason),
                    None => println!("outcome: redirect to {}", redirect.to),
                },
                GateOutcome::Forbidden { message, reason } => {
                    println!("outcome: forbidden ({}): {}", reason, message)
                }
            }
        }
    }

    session.end();
    Ok(())
}
