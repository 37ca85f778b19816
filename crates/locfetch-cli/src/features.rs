//! Features command - download and extract the configuration archive.

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use locfetch_core::pipeline::features::{self, FeaturesRequest};
use locfetch_core::util::sanitize_project_name;
use locfetch_core::HttpClient;

use crate::common;

#[derive(Args, Debug)]
pub struct FeaturesArgs {
    /// Project to download the configuration archive for
    #[arg(long)]
    pub project: String,

    /// Output directory
    #[arg(long)]
    pub location: PathBuf,

    /// Country code
    #[arg(long, default_value = "XX")]
    pub country: String,

    /// Target platform
    #[arg(long)]
    pub platform: String,

    /// Bundle version
    #[arg(long)]
    pub version: String,

    /// HTTP(S) proxy URL
    #[arg(long)]
    pub proxy: Option<String>,

    /// Distribution service base URL
    #[arg(long, default_value = locfetch_core::config::DEFAULT_API_BASE)]
    pub api_base: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

pub async fn execute(args: FeaturesArgs) -> Result<i32> {
    common::banner("features");

    let project = sanitize_project_name(&args.project);
    println!("project   {project}");
    println!("country   {}", args.country);
    println!("platform  {}", args.platform);
    println!("version   {}", args.version);
    println!("location  {}", args.location.display());

    let config = common::build_config(&args.api_base, args.proxy.as_deref(), args.timeout);
    let client = HttpClient::new(&config).context("failed to build HTTP client")?;

    let request = FeaturesRequest {
        project,
        country: args.country,
        platform: args.platform,
        version: args.version,
        location: args.location,
    };

    let bar = download_bar();
    let progress = {
        let bar = bar.clone();
        move |downloaded: u64, total: u64| {
            if total > 0 {
                bar.set_length(total);
            }
            bar.set_position(downloaded);
        }
    };

    let report = features::run(&config, &client, &request, Some(progress)).await?;
    bar.finish_and_clear();

    Ok(common::summarize(&[report]))
}

fn download_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
