//! Locales command - download per-language wording files.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use locfetch_core::pipeline::locales::{self, LocalesRequest};
use locfetch_core::util::sanitize_project_name;
use locfetch_core::HttpClient;

use crate::common;

#[derive(Args, Debug)]
pub struct LocalesArgs {
    /// Project to download wording for
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

    /// Comma-separated list of languages
    #[arg(long, value_delimiter = ',', required = true)]
    pub languages: Vec<String>,

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

pub async fn execute(args: LocalesArgs) -> Result<i32> {
    common::banner("locales");

    let project = sanitize_project_name(&args.project);
    println!("project   {project}");
    println!("country   {}", args.country);
    println!("platform  {}", args.platform);
    println!("version   {}", args.version);
    println!("languages {}", args.languages.join(","));
    println!("location  {}", args.location.display());

    let config = common::build_config(&args.api_base, args.proxy.as_deref(), args.timeout);
    let client = HttpClient::new(&config).context("failed to build HTTP client")?;

    let request = LocalesRequest {
        project,
        country: args.country,
        platform: args.platform,
        version: args.version,
        languages: args.languages,
        location: args.location,
    };

    let reports = locales::run(&config, &client, &request).await?;
    Ok(common::summarize(&reports))
}
