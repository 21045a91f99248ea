use anyhow::{Context, Result};
use clap::{App, Arg, ArgMatches, SubCommand};
use cluster_models::{Address, Network, OperatorId};
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod output;

use commands::ClusterCommands;
use config::Config;

fn account_arg() -> Arg<'static, 'static> {
    Arg::with_name("account")
        .short("a")
        .long("account")
        .value_name("ADDRESS")
        .help("Cluster owner address")
        .takes_value(true)
        .required(true)
}

fn network_arg() -> Arg<'static, 'static> {
    Arg::with_name("network")
        .short("n")
        .long("network")
        .value_name("NETWORK")
        .help("mainnet or holesky, defaults to the configured network")
        .takes_value(true)
        .possible_values(&["mainnet", "holesky"])
}

fn json_arg() -> Arg<'static, 'static> {
    Arg::with_name("json")
        .long("json")
        .help("Print JSON instead of a table")
}

fn parse_target(sub_matches: &ArgMatches, config: &Config) -> Result<(Address, Network)> {
    let account = sub_matches
        .value_of("account")
        .context("missing --account")?
        .parse::<Address>()?;
    let network = match sub_matches.value_of("network") {
        Some(network) => network.parse::<Network>()?,
        None => config.default_network,
    };
    Ok((account, network))
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = App::new("SSV Cluster CLI")
        .version("0.1")
        .about("Estimates balance and runway of SSV clusters")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("Path to a config file")
                .takes_value(true)
                .global(true),
        )
        .arg(
            Arg::with_name("clamp-operator-deltas")
                .long("clamp-operator-deltas")
                .help("Floor each operator's accrued fee delta at zero")
                .global(true),
        )
        .subcommand(
            SubCommand::with_name("clusters")
                .about("Estimate every active cluster of an account")
                .arg(account_arg())
                .arg(network_arg())
                .arg(json_arg()),
        )
        .subcommand(
            SubCommand::with_name("cluster")
                .about("Estimate a single cluster")
                .arg(account_arg())
                .arg(
                    Arg::with_name("operators")
                        .short("o")
                        .long("operators")
                        .value_name("IDS")
                        .help("Operator ids, e.g. 1,2,3,4")
                        .takes_value(true)
                        .required(true),
                )
                .arg(network_arg())
                .arg(json_arg()),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = match matches.value_of("config") {
        Some(path) => Config::load_from(Path::new(path)),
        None => Config::load(),
    }
    .context("loading configuration")?;
    tracing::debug!(network = %config.default_network, "configuration loaded");
    let service = api::discovery_service(&config, matches.is_present("clamp-operator-deltas"))?;

    match matches.subcommand() {
        ("clusters", Some(sub_matches)) => {
            let (account, network) = parse_target(sub_matches, &config)?;
            ClusterCommands::account_clusters(
                &service,
                &config,
                &account,
                network,
                sub_matches.is_present("json"),
            )
            .await?;
        }
        ("cluster", Some(sub_matches)) => {
            let (account, network) = parse_target(sub_matches, &config)?;
            let operator_ids =
                OperatorId::parse_list(sub_matches.value_of("operators").unwrap_or_default())?;
            ClusterCommands::cluster(
                &service,
                &config,
                &account,
                &operator_ids,
                network,
                sub_matches.is_present("json"),
            )
            .await?;
        }
        _ => {
            println!("No subcommand specified. Use --help for usage information.");
        }
    }

    Ok(())
}
