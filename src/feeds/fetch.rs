use anyhow::{Context, Result};

/// Loads dataset bytes from an HTTP(S) URL or, for anything else, a local
/// file path.
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub async fn fetch_bytes(&self, source: &str) -> Result<Vec<u8>> {
        if source.starts_with("http://") || source.starts_with("https://") {
            let resp = self
                .client
                .get(source)
                .send()
                .await
                .with_context(|| format!("fetching {source}"))?
                .error_for_status()
                .with_context(|| format!("fetching {source}"))?;
            Ok(resp.bytes().await?.to_vec())
        } else {
            std::fs::read(source).with_context(|| format!("reading {source}"))
        }
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}
