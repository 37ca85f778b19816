pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod merge;
pub mod pipeline;
pub mod util;

pub use config::DistConfig;
pub use error::{DistError, Result};
pub use extract::{extract, ExtractReport, ZipEntries};
pub use http::HttpClient;
pub use merge::{merge, MergeMetadata, MergedBundle};
pub use pipeline::{UnitOutcome, UnitReport};
pub use util::{resolve_versions, sanitize_project_name};
