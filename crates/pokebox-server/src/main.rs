use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use pokebox_catalog::HttpCatalog;
use pokebox_core::{Identity, ServiceConfig, TokenAuthority};
use pokebox_server::{routes, AppState};
use pokebox_store::MemoryStore;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_parser(value_parser!(PathBuf))
        .help("Path to a TOML configuration file")
}

fn cli() -> Command {
    Command::new("pokebox")
        .version(pokebox_server::VERSION)
        .about("Creature catalog aggregator and per-user collection service")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP service")
                .arg(config_arg())
                .arg(
                    Arg::new("bind")
                        .long("bind")
                        .help("Listen address, overrides the configuration file"),
                )
                .arg(
                    Arg::new("log-json")
                        .long("log-json")
                        .action(ArgAction::SetTrue)
                        .help("Emit logs as JSON lines"),
                ),
        )
        .subcommand(
            Command::new("issue-token")
                .about("Print a bearer token for a username")
                .arg(
                    Arg::new("user")
                        .long("user")
                        .required(true)
                        .help("Username the token is issued for"),
                )
                .arg(config_arg()),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("serve", args)) => serve(args).await,
        Some(("issue-token", args)) => issue_token(args),
        _ => Ok(()),
    }
}

fn load_config(args: &ArgMatches) -> Result<ServiceConfig> {
    match args.get_one::<PathBuf>("config") {
        Some(path) => ServiceConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(ServiceConfig::default()),
    }
}

fn init_tracing(default_filter: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn serve(args: &ArgMatches) -> Result<()> {
    let mut config = load_config(args)?;
    if let Some(bind) = args.get_one::<String>("bind") {
        config = config.with_bind_addr(bind.clone());
    }
    init_tracing(&config.log_filter, args.get_flag("log-json"));

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address {:?}", config.bind_addr))?;

    let store = Arc::new(MemoryStore::new());
    store.connect();
    let catalog = Arc::new(HttpCatalog::new(&config.catalog_base_url)?);
    tracing::info!(base_url = %catalog.base_url(), "catalog client ready");

    let state = AppState::from_config(config, catalog, store.clone())?;
    let (bound, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(addr, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .context("binding listener")?;

    tracing::info!(%bound, version = pokebox_server::VERSION, "pokebox listening");
    server.await;

    store.disconnect();
    tracing::info!("pokebox stopped");
    Ok(())
}

fn issue_token(args: &ArgMatches) -> Result<()> {
    let config = load_config(args)?;
    let user = args
        .get_one::<String>("user")
        .context("missing --user")?;
    let identity = Identity::new(user.as_str())?;

    if config.signing_seed_hex.is_none() {
        eprintln!("warning: no signing_seed_hex configured; this token will not verify against a running server");
    }
    let authority = TokenAuthority::from_config(&config)?;
    println!("{}", authority.issue(&identity));
    Ok(())
}
