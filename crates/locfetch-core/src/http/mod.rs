//! HTTP asset retrieval.

mod client;

pub use client::HttpClient;
