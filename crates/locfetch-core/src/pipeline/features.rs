//! Configuration archive download-and-extract flow.
//!
//! A single unit: fetch `Configuration.zip` into the target directory,
//! extract it in place, then remove the archive and the known temporary
//! files it ships. Cleanup problems are logged but never resurrect or fail
//! the unit.

use std::path::{Path, PathBuf};

use crate::config::{DistConfig, ARCHIVE_FILE};
use crate::extract;
use crate::http::HttpClient;
use crate::pipeline::UnitReport;
use crate::Result;

/// Files shipped inside the archive that clients must not see.
const TEMP_FILES: [&str; 2] = ["Config.json", "Configuration.json"];

#[derive(Debug, Clone)]
pub struct FeaturesRequest {
    pub project: String,
    pub country: String,
    pub platform: String,
    pub version: String,
    pub location: PathBuf,
}

/// Fetch and extract the configuration archive for the request.
pub async fn run<F>(
    config: &DistConfig,
    client: &HttpClient,
    request: &FeaturesRequest,
    progress: Option<F>,
) -> Result<UnitReport>
where
    F: Fn(u64, u64),
{
    tokio::fs::create_dir_all(&request.location).await?;

    let url = config.archive_url(
        &request.project,
        &request.country,
        &request.platform,
        &request.version,
    );
    let archive_path = request.location.join(ARCHIVE_FILE);
    let unit = request.project.clone();

    log::info!("Downloading {url}");
    if let Err(e) = client.download(&url, &archive_path, progress).await {
        let _ = tokio::fs::remove_file(&archive_path).await;
        return Ok(UnitReport::failed(unit, e));
    }

    log::info!("Extracting {}", archive_path.display());
    let report = match extract::extract(&archive_path, &request.location) {
        Ok(report) => report,
        Err(e) => {
            let _ = tokio::fs::remove_file(&archive_path).await;
            return Ok(UnitReport::failed(unit, e));
        }
    };
    log::info!(
        "Extracted {} files, {} directories ({} unsafe entries skipped, {} failed)",
        report.files_written,
        report.dirs_created,
        report.skipped_unsafe,
        report.failed
    );

    cleanup(&request.location, &archive_path).await;

    Ok(UnitReport::persisted(unit))
}

async fn cleanup(location: &Path, archive_path: &Path) {
    for name in TEMP_FILES {
        remove_if_present(&location.join(name)).await;
    }
    remove_if_present(archive_path).await;
}

async fn remove_if_present(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("Could not clean up {}: {e}", path.display()),
    }
}
