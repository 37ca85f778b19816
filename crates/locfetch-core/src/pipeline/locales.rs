//! Per-language wording download flow.
//!
//! One unit per language: fetch the language's `Wording.json` straight to
//! `{location}/{language}.json`. Units run through a fixed-size worker pool
//! so a long language list cannot flood the distribution service.

use std::path::PathBuf;

use futures_util::StreamExt;

use crate::config::DistConfig;
use crate::http::HttpClient;
use crate::pipeline::UnitReport;
use crate::Result;

/// Upper bound on concurrently fetched languages.
const MAX_IN_FLIGHT: usize = 4;

#[derive(Debug, Clone)]
pub struct LocalesRequest {
    pub project: String,
    pub country: String,
    pub platform: String,
    pub version: String,
    pub languages: Vec<String>,
    pub location: PathBuf,
}

/// Fetch every language of the request, returning one report per language.
pub async fn run(
    config: &DistConfig,
    client: &HttpClient,
    request: &LocalesRequest,
) -> Result<Vec<UnitReport>> {
    tokio::fs::create_dir_all(&request.location).await?;

    let units = request.languages.iter().map(|language| {
        let url = config.wording_url(
            &request.project,
            &request.country,
            &request.platform,
            &request.version,
            language,
        );
        let dest = request.location.join(format!("{language}.json"));

        async move {
            log::info!("Fetching wording for {language} from {url}");
            match client.download(&url, &dest, None::<fn(u64, u64)>).await {
                Ok(()) => UnitReport::persisted(language),
                Err(e) => {
                    // Discard any partially written file for this unit.
                    let _ = tokio::fs::remove_file(&dest).await;
                    UnitReport::failed(language, e)
                }
            }
        }
    });

    let reports = futures_util::stream::iter(units)
        .buffer_unordered(MAX_IN_FLIGHT)
        .collect::<Vec<_>>()
        .await;

    Ok(reports)
}
