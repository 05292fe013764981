//! oidwalkctl - walk an SNMP agent and catalog what it exposes.

use anyhow::{Context, Result};
use clap::Parser;
use oidwalk_common::config::Config;
use oidwalk_common::survey::Survey;
use oidwalk_common::tools::RealSnmpTools;
use oidwalkctl::cli::Cli;
use oidwalkctl::errors::{exit_code_for, EXIT_GENERAL_ERROR, EXIT_SUCCESS, EXIT_USAGE};
use oidwalkctl::logging;
use oidwalkctl::output::{display_error, render_summary, Handoff, TemplateSettings};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too, on stdout
            let code = if e.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            display_error(&format!("{:#}", e));
            exit_code_for(&e)
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<i32> {
    let config = Config::load(cli.config.as_deref())?;
    let level = cli.log_level.as_deref().unwrap_or(&config.log.level);
    logging::init(level);

    let request = cli.walk_request()?;

    let mut settings = config.tools.clone();
    if let Some(concurrency) = cli.concurrency {
        settings.translate_concurrency = concurrency;
    }

    info!(
        "oidwalkctl v{} walking {} ({} roots)",
        env!("CARGO_PKG_VERSION"),
        request.target(),
        cli.roots.len()
    );

    let tools = Arc::new(RealSnmpTools::new(settings.clone()));
    let report = Survey::new(tools)
        .with_settings(&settings)
        .run(&request, &cli.roots)
        .await;

    let all_failed = report.all_roots_failed(cli.roots.len());

    if cli.json {
        let handoff = Handoff::new(TemplateSettings::from(&cli), report);
        let json = handoff.to_json().context("Failed to serialize hand-off")?;
        println!("{}", json);
    } else {
        println!("{}", render_summary(&report));
    }

    if all_failed {
        display_error("No root could be walked");
        return Ok(EXIT_GENERAL_ERROR);
    }
    Ok(EXIT_SUCCESS)
}
