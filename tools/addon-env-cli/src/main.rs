//! Addon Env CLI: inspect the environment a host injects into an addon.
//!
//! Values come from `--api-url` / `--instance-uuid` or the `API_URL` /
//! `INSTANCE_UUID` environment variables.

use addon_api::AddonApiClient;
use addon_env::{vars, AddonId, Environment, HostHandshake, BUILD_INFO};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "addon-env")]
#[command(about = "Addon Env CLI - inspect and validate a host-injected addon environment")]
#[command(version = addon_env::VERSION)]
struct Cli {
    /// REST API base URL template
    #[arg(long, global = true, env = vars::API_URL)]
    api_url: Option<String>,

    /// UUID of the addon instance
    #[arg(long, global = true, env = vars::INSTANCE_UUID)]
    instance_uuid: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the injected values verbatim
    Show {
        /// Print as a JSON handshake object
        #[arg(long)]
        json: bool,
    },
    /// Validate the injected values
    Check,
    /// Print the endpoint URL for an addon
    Resolve {
        #[arg(long)]
        addon_id: AddonId,
        /// Path relative to the API base
        path: Option<String>,
    },
    /// Call a GET endpoint and print the response payload
    Get {
        #[arg(long)]
        addon_id: AddonId,
        path: String,
        /// Query parameter as key=value, may be repeated
        #[arg(long = "query", short = 'q', value_parser = parse_key_val)]
        query: Vec<(String, String)>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value pair: no '=' in '{s}'"))?;
    Ok((key.to_string(), value.to_string()))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    debug!("{}", BUILD_INFO);

    let env = Environment::from_handshake(HostHandshake {
        api_url: cli.api_url,
        instance_uuid: cli.instance_uuid,
    })
    .context("Failed to load addon environment")?;

    match cli.command {
        Commands::Show { json } => handle_show(&env, json),
        Commands::Check => handle_check(&env),
        Commands::Resolve { addon_id, path } => handle_resolve(&env, addon_id, path),
        Commands::Get {
            addon_id,
            path,
            query,
        } => handle_get(env, addon_id, &path, query).await,
    }
}

fn handle_show(env: &Environment, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(env)?);
    } else {
        println!("{}={}", vars::API_URL, env.api_url());
        println!("{}={}", vars::INSTANCE_UUID, env.instance_uuid());
    }
    Ok(())
}

fn handle_check(env: &Environment) -> anyhow::Result<()> {
    println!("✅ Addon environment is valid");
    match env.api().placeholder() {
        Some(placeholder) => println!("🔗 API URL placeholder: {placeholder}"),
        None => println!("🔗 API URL has no placeholder"),
    }
    println!("🆔 Instance: {}", env.instance_id());
    Ok(())
}

fn handle_resolve(env: &Environment, addon_id: AddonId, path: Option<String>) -> anyhow::Result<()> {
    let url = match path {
        Some(path) => env.api().endpoint(addon_id, &path),
        None => env.api().resolve(addon_id),
    }
    .context("Failed to resolve endpoint")?;
    println!("{url}");
    Ok(())
}

async fn handle_get(
    env: Environment,
    addon_id: AddonId,
    path: &str,
    query: Vec<(String, String)>,
) -> anyhow::Result<()> {
    let client = AddonApiClient::new(Arc::new(env), addon_id)?;

    let payload: serde_json::Value = client
        .get_with_query(path, &query)
        .await
        .with_context(|| format!("GET {path} failed"))?;
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
