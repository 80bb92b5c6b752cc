//! rsdd：命令行 UA 识别工具
//! 每个输入输出一行 JSON 结果；未给出 UA 参数时逐行读取标准输入

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use rsdevicedetector::{ConfigManager, DetectResult, DetectorOptions, DeviceDetector};

#[derive(Parser)]
#[command(name = "rsdd")]
#[command(about = "Classify user-agent strings into bot / os / client / device", long_about = None)]
#[command(version)]
struct Cli {
    /// User agents to classify (reads stdin lines when omitted)
    user_agents: Vec<String>,

    /// Rule directory
    #[arg(long, default_value = "regexes")]
    rules: PathBuf,

    /// Rule snapshot file
    #[arg(long, default_value = "device_detector_rules.mp")]
    cache: PathBuf,

    /// Do not read or write the rule snapshot
    #[arg(long)]
    no_cache: bool,

    /// Report bots without name/category/producer details
    #[arg(long)]
    discard_bot_details: bool,

    /// Do not run bot detection at all
    #[arg(long)]
    skip_bot_detection: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn setup_tracing(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();
}

fn render(result: &DetectResult, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let config = ConfigManager::custom()
        .rules_dir(cli.rules.clone())
        .rule_cache_path(cli.cache.clone())
        .use_rule_cache(!cli.no_cache)
        .build();
    let options = DetectorOptions::default()
        .with_discard_bot_details(cli.discard_bot_details)
        .with_skip_bot_detection(cli.skip_bot_detection);

    let detector = DeviceDetector::new(&config, options)
        .await
        .with_context(|| format!("failed to load rules from {}", cli.rules.display()))?;
    debug!("client types: {:?}", detector.client_types().names());

    if !cli.user_agents.is_empty() {
        for ua in &cli.user_agents {
            println!("{}", render(&detector.detect(ua), cli.pretty)?);
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let ua = line.trim();
        if ua.is_empty() {
            continue;
        }
        println!("{}", render(&detector.detect(ua), cli.pretty)?);
    }

    Ok(())
}
