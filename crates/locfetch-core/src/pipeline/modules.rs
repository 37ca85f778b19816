//! Multi-module fetch-and-merge flow.
//!
//! Languages are processed strictly one at a time to bound load on the
//! distribution service. For each language, every module's wording document
//! is downloaded to a `{language}-{module}.json` temporary, all documents
//! are parsed and merged in module order, the result is written to
//! `{language}.json`, and the temporaries are removed. A failed language is
//! cleaned up and its siblings continue.

use std::path::PathBuf;

use crate::config::DistConfig;
use crate::error::{DistError, Result};
use crate::http::HttpClient;
use crate::merge::{self, MergeMetadata, MergedBundle};
use crate::pipeline::UnitReport;

#[derive(Debug, Clone)]
pub struct ModulesRequest {
    pub delivery: String,
    /// Module names, already normalized.
    pub modules: Vec<String>,
    /// One version per module (see `util::resolve_versions`).
    pub versions: Vec<String>,
    pub country: String,
    pub platform: String,
    pub languages: Vec<String>,
    pub location: PathBuf,
}

/// Process every language of the request, returning one report per language.
pub async fn run(
    config: &DistConfig,
    client: &HttpClient,
    request: &ModulesRequest,
) -> Result<Vec<UnitReport>> {
    tokio::fs::create_dir_all(&request.location).await?;

    let mut reports = Vec::with_capacity(request.languages.len());

    for language in &request.languages {
        log::info!("Processing language {language}");
        match process_language(config, client, request, language).await {
            Ok(()) => {
                log::info!("{language} completed");
                reports.push(UnitReport::persisted(language));
            }
            Err(e) => {
                log::error!("Failed to process {language}: {e}");
                reports.push(UnitReport::failed(language, e));
            }
        }
    }

    Ok(reports)
}

async fn process_language(
    config: &DistConfig,
    client: &HttpClient,
    request: &ModulesRequest,
    language: &str,
) -> Result<()> {
    let mut temp_files: Vec<PathBuf> = Vec::with_capacity(request.modules.len());

    let result = fetch_and_merge(config, client, request, language, &mut temp_files).await;

    if result.is_err() {
        // The unit failed; leave no temporaries (or partial downloads) behind.
        for path in &temp_files {
            let _ = tokio::fs::remove_file(path).await;
        }
    }

    result
}

async fn fetch_and_merge(
    config: &DistConfig,
    client: &HttpClient,
    request: &ModulesRequest,
    language: &str,
    temp_files: &mut Vec<PathBuf>,
) -> Result<()> {
    for (module, version) in request.modules.iter().zip(&request.versions) {
        let url = config.wording_url(module, &request.country, &request.platform, version, language);
        let dest = request.location.join(format!("{language}-{module}.json"));

        log::info!("Downloading {module} ({version}) for {language}");
        // Record the path before downloading so a partial file is cleaned up.
        temp_files.push(dest.clone());
        client.download(&url, &dest, None::<fn(u64, u64)>).await?;
    }

    log::info!("Merging {} modules for {language}", request.modules.len());
    let mut sources: Vec<MergedBundle> = Vec::with_capacity(temp_files.len());
    for path in temp_files.iter() {
        let bytes = tokio::fs::read(path).await?;
        let document: MergedBundle =
            serde_json::from_slice(&bytes).map_err(|source| DistError::JsonParse {
                path: path.clone(),
                source,
            })?;
        sources.push(document);
    }

    let meta = MergeMetadata::new(&request.delivery, &request.country);
    let merged = merge::merge(&sources, &meta);

    let final_path = request.location.join(format!("{language}.json"));
    let bytes = merge::to_pretty_bytes(&merged).map_err(|source| DistError::JsonParse {
        path: final_path.clone(),
        source,
    })?;

    // Stage the bundle under a temporary name and rename it into place, so
    // an interrupted write never leaves a half-written final artifact and a
    // pre-existing bundle survives until the replacement is complete.
    let staging_path = request.location.join(format!("{language}.json.tmp"));
    temp_files.push(staging_path.clone());
    tokio::fs::write(&staging_path, bytes).await?;
    tokio::fs::rename(&staging_path, &final_path).await?;
    temp_files.retain(|path| path != &staging_path);

    for path in temp_files.drain(..) {
        if let Err(e) = tokio::fs::remove_file(&path).await {
            log::warn!("Could not clean up {}: {e}", path.display());
        }
    }

    Ok(())
}
