//! policy-nav - Terminal client for the Policy Navigator service
//!
//! Without a subcommand it opens the interactive screen; `ask`, `status`, `compliance` and
//! `health` print a single answer to stdout.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use policy_navigator::client::{DEFAULT_BUSINESS_SIZE, DEFAULT_BUSINESS_TYPE};
use policy_navigator::render::plain::write_lines;
use policy_navigator::render::ui::TerminalUI;
use policy_navigator::{
    normalize, render, Application, ClientConfig, HttpTransport, QueryTransport, ServerPayload,
    QUERY_FAILED_MESSAGE,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

fn cli() -> Command {
    Command::new("policy-nav")
        .version(policy_navigator::VERSION)
        .about("Ask the Policy Navigator service about policies and regulations")
        .long_about(
            "policy-nav sends policy, executive order and compliance questions to a \
             Policy Navigator analysis service and renders the answers with source \
             citations highlighted.",
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .global(true)
                .value_name("URL")
                .help("Base URL of the analysis service"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .global(true)
                .value_name("SECS")
                .value_parser(value_parser!(u64))
                .help("Request timeout in seconds"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .global(true)
                .value_parser(["default", "monochrome", "high-contrast"])
                .help("Color theme"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print one-shot answers without ANSI styling"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Read settings from this TOML file"),
        )
        .subcommand(
            Command::new("ask").about("Ask one question and print the answer").arg(
                Arg::new("query")
                    .required(true)
                    .num_args(1..)
                    .help("The question; multiple words are joined with spaces"),
            ),
        )
        .subcommand(
            Command::new("status")
                .about("Check whether a policy is still in effect")
                .arg(
                    Arg::new("policy_id")
                        .required(true)
                        .help("Policy identifier, e.g. EO-14067"),
                ),
        )
        .subcommand(
            Command::new("compliance")
                .about("Summarize compliance requirements for a business")
                .arg(
                    Arg::new("business_type")
                        .long("business-type")
                        .short('t')
                        .default_value(DEFAULT_BUSINESS_TYPE)
                        .help("Type of business"),
                )
                .arg(
                    Arg::new("size")
                        .long("size")
                        .short('s')
                        .value_parser(["small_business", "large_business"])
                        .default_value(DEFAULT_BUSINESS_SIZE)
                        .help("Business size"),
                ),
        )
        .subcommand(Command::new("health").about("Check that the service is reachable"))
}

fn resolve_config(matches: &ArgMatches) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))
        .context("failed to load configuration")?;

    if let Some(endpoint) = matches.get_one::<String>("endpoint") {
        config.endpoint = endpoint.clone();
    }
    if let Some(secs) = matches.get_one::<u64>("timeout") {
        config.timeout = Duration::from_secs(*secs);
    }
    if let Some(theme) = matches.get_one::<String>("theme") {
        config.theme = theme.clone();
    }
    config.validate().context("invalid command-line settings")?;
    Ok(config)
}

fn print_answer(payload: &ServerPayload, config: &ClientConfig, color: bool) -> Result<()> {
    let display = normalize(payload);
    let mut stdout = std::io::stdout().lock();
    write_lines(&mut stdout, render(&display), &config.color_theme(), color)
        .context("failed to write answer")
}

fn fail(err: &policy_navigator::NavigatorError) -> ! {
    log::error!("{err}");
    eprintln!("{QUERY_FAILED_MESSAGE}");
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    // Logs would tear through the alternate screen, so the TUI stays silent unless asked.
    let default_filter = if matches.subcommand().is_some() {
        "warn"
    } else {
        "off"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = resolve_config(&matches)?;
    let transport = HttpTransport::new(&config).context("failed to create HTTP client")?;
    let color = !matches.get_flag("no-color") && std::io::stdout().is_terminal();

    match matches.subcommand() {
        Some(("ask", sub)) => {
            let query = sub
                .get_many::<String>("query")
                .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            if query.trim().is_empty() {
                anyhow::bail!("query must not be empty");
            }
            match transport.submit_query(&query).await {
                Ok(payload) => print_answer(&payload, &config, color)?,
                Err(err) => fail(&err),
            }
        }
        Some(("status", sub)) => {
            let policy_id = sub
                .get_one::<String>("policy_id")
                .context("policy id is required")?;
            match transport.policy_status(policy_id).await {
                Ok(payload) => print_answer(&payload, &config, color)?,
                Err(err) => fail(&err),
            }
        }
        Some(("compliance", sub)) => {
            let business_type = sub
                .get_one::<String>("business_type")
                .map_or(DEFAULT_BUSINESS_TYPE, String::as_str);
            let size = sub
                .get_one::<String>("size")
                .map_or(DEFAULT_BUSINESS_SIZE, String::as_str);
            match transport.compliance(business_type, size).await {
                Ok(payload) => print_answer(&payload, &config, color)?,
                Err(err) => fail(&err),
            }
        }
        Some(("health", _)) => match transport.health().await {
            Ok(payload) => print_answer(&payload, &config, color)?,
            Err(err) => fail(&err),
        },
        _ => {
            let ui_renderer = Box::new(TerminalUI::with_theme(config.color_theme())?);
            let mut app = Application::new(Arc::new(transport), ui_renderer, config.endpoint);
            app.run().await?;
        }
    }

    Ok(())
}
