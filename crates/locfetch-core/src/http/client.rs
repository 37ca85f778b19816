//! HTTP client for distribution service downloads.
//!
//! Wraps `reqwest` with the behavior the pipeline needs:
//! - Streaming downloads to a destination file (never whole-body buffering)
//! - Manual redirect following with an explicit, configurable cap
//! - Optional proxy routing
//! - Request timeout mapped to a typed error
//!
//! Redirects are followed by hand rather than by `reqwest`'s built-in policy
//! so that exceeding the cap surfaces as [`DistError::RedirectLimit`] instead
//! of a generic transport error.

use reqwest::header::LOCATION;
use reqwest::{Client, Response};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::config::DistConfig;
use crate::error::{DistError, Result};

pub struct HttpClient {
    client: Client,
    max_redirects: u32,
}

impl HttpClient {
    pub fn new(config: &DistConfig) -> std::result::Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(&config.user_agent);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            max_redirects: config.max_redirects,
        })
    }

    /// Perform a GET request, following up to `max_redirects` redirects.
    pub async fn get(&self, url: &str) -> Result<Response> {
        let mut current = Url::parse(url).map_err(|source| DistError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let mut redirects = 0u32;

        loop {
            let response = self
                .client
                .get(current.clone())
                .send()
                .await
                .map_err(|e| request_error(current.as_str(), e))?;

            let status = response.status();

            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);

                let Some(location) = location else {
                    // A 3xx without a usable Location is just a failed status.
                    return Err(DistError::HttpStatus {
                        status: status.as_u16(),
                        url: current.to_string(),
                    });
                };

                redirects += 1;
                if redirects > self.max_redirects {
                    return Err(DistError::RedirectLimit {
                        url: url.to_string(),
                        limit: self.max_redirects,
                    });
                }

                // Location may be relative; resolve against the current URL.
                current = current.join(&location).map_err(|source| DistError::InvalidUrl {
                    url: location,
                    source,
                })?;
                log::debug!("Following redirect {} -> {}", redirects, current);
                continue;
            }

            if status.is_success() {
                return Ok(response);
            }

            return Err(DistError::HttpStatus {
                status: status.as_u16(),
                url: current.to_string(),
            });
        }
    }

    /// Download `url` to `dest`, streaming the body chunk by chunk.
    ///
    /// A partially written destination file is left behind on failure; the
    /// caller decides whether to discard it.
    pub async fn download<F>(&self, url: &str, dest: &Path, progress: Option<F>) -> Result<()>
    where
        F: Fn(u64, u64),
    {
        let response = self.get(url).await?;
        let total_size = response.content_length().unwrap_or(0);

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = File::create(dest).await?;
        let mut downloaded: u64 = 0;

        let mut stream = response.bytes_stream();

        use futures_util::StreamExt;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| request_error(url, e))?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            if let Some(ref callback) = progress {
                callback(downloaded, total_size);
            }
        }

        file.flush().await?;

        Ok(())
    }

    /// Download `url` fully into memory. Only used for small documents.
    pub async fn download_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.get(url).await?;
        let bytes = response.bytes().await.map_err(|e| request_error(url, e))?;
        Ok(bytes.to_vec())
    }
}

fn request_error(url: &str, e: reqwest::Error) -> DistError {
    if e.is_timeout() {
        DistError::Timeout {
            url: url.to_string(),
        }
    } else {
        DistError::Network {
            url: url.to_string(),
            source: e,
        }
    }
}
