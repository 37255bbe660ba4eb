use anyhow::{Context, Result};
use clap::Parser;
use gen3_metadata::client::{FetchKey, FetchOptions, MetadataClient};
use gen3_metadata::utils::config_loader;
use gen3_metadata::utils::constants::DEFAULT_CONFIG_PATH;
use gen3_metadata::utils::logging;
use gen3_metadata::utils::logging::LogLevel;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "GEN3_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// Overrides the api version from the config file
    #[arg(long)]
    api_version: Option<String>,
    /// Write every table to stdout as JSON records
    #[arg(long)]
    print: bool,
    /// Exports to fetch, as program/project/node
    #[arg(required = true, value_parser = clap::value_parser!(FetchKey))]
    targets: Vec<FetchKey>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load settings, init logging
    // -------------------------------

    let args = Args::parse();
    let settings = config_loader::run(&args.config).await?;
    logging::run(&settings, args.log_level);

    // -------------------------------
    // 2. Authenticate
    // -------------------------------

    let mut client = MetadataClient::from_settings(&settings)?;
    client.authenticate().await.context("authentication failed")?;

    // -------------------------------
    // 3. Fetch every target, then flatten
    // -------------------------------

    let options = FetchOptions {
        api_version: args.api_version.clone(),
        return_data: false,
    };
    for target in &args.targets {
        client
            .fetch_data(&target.program_name, &target.project_code, &target.node_label, &options)
            .await
            .with_context(|| format!("fetch of {} failed", target))?;
    }
    client.data_to_tables()?;

    // -------------------------------
    // 4. Report
    // -------------------------------

    for target in &args.targets {
        let Some(table) = client.table(target) else { continue };
        info!(key = %target, rows = table.len(), columns = table.columns().len(), "table ready");
        if args.print {
            println!("{}", serde_json::to_string(&serde_json::json!({
                "key": target.to_string(),
                "records": table,
            }))?);
        }
    }

    Ok(())
}
