//! Modules command - download module wording files and merge them.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use locfetch_core::pipeline::modules::{self, ModulesRequest};
use locfetch_core::util::{resolve_versions, sanitize_project_name};
use locfetch_core::HttpClient;

use crate::common;

#[derive(Args, Debug)]
pub struct ModulesArgs {
    /// Name of the delivery stamped into the merged bundles
    #[arg(long)]
    pub delivery: String,

    /// Comma-separated list of modules to merge, in overwrite order
    #[arg(long, value_delimiter = ',', required = true)]
    pub modules: Vec<String>,

    /// Output directory
    #[arg(long)]
    pub location: PathBuf,

    /// Country code
    #[arg(long, default_value = "XX")]
    pub country: String,

    /// Target platform
    #[arg(long)]
    pub platform: String,

    /// Comma-separated module versions; a single value applies to all
    /// modules, missing entries default to "draft"
    #[arg(long, value_delimiter = ',', required = true)]
    pub versions: Vec<String>,

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

pub async fn execute(args: ModulesArgs) -> Result<i32> {
    common::banner("modules");

    let modules: Vec<String> = args
        .modules
        .iter()
        .map(|m| sanitize_project_name(m))
        .collect();
    let versions = resolve_versions(modules.len(), &args.versions);

    println!("delivery  {}", args.delivery);
    println!("modules   {}", modules.join(","));
    println!("versions  {}", versions.join(","));
    println!("country   {}", args.country);
    println!("platform  {}", args.platform);
    println!("languages {}", args.languages.join(","));
    println!("location  {}", args.location.display());

    let config = common::build_config(&args.api_base, args.proxy.as_deref(), args.timeout);
    let client = HttpClient::new(&config).context("failed to build HTTP client")?;

    let request = ModulesRequest {
        delivery: args.delivery,
        modules,
        versions,
        country: args.country,
        platform: args.platform,
        languages: args.languages,
        location: args.location,
    };

    let reports = modules::run(&config, &client, &request).await?;
    Ok(common::summarize(&reports))
}
