use crate::config::HTTP_CLIENT;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use std::path::Path;
use tokio::fs;

/// Something that can answer an HTTP GET with the raw response body.
#[async_trait]
pub trait HttpSource: Send + Sync {
    /// Non-2xx responses fail with `AppError::FetchStatus`, transport and
    /// timeout problems with `AppError::Fetch`.
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// `HttpSource` backed by the shared reqwest client.
#[derive(Clone)]
pub struct ReqwestSource {
    client: Client,
}

impl ReqwestSource {
    pub fn new() -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
        }
    }
}

impl Default for ReqwestSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpSource for ReqwestSource {
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(AppError::FetchStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| AppError::Fetch {
            url: url.to_string(),
            reason: format!("Failed to read response: {}", e),
        })?;

        debug!("GET {} -> {} bytes", url, body.len());
        Ok(body.to_vec())
    }
}

pub struct DownloadUtils;

impl DownloadUtils {
    /// Fetches `url` and writes the body verbatim to `target_path`, replacing
    /// any existing file. An empty body counts as a failed download.
    pub async fn download_file<P: AsRef<Path>>(
        source: &dyn HttpSource,
        url: &str,
        target_path: P,
    ) -> Result<u64> {
        let target_path = target_path.as_ref();
        debug!("Starting download: {} -> {:?}", url, target_path);

        let body = source
            .get_bytes(url)
            .await
            .map_err(|e| AppError::Download(e.to_string()))?;

        if body.is_empty() {
            return Err(AppError::Download(format!("Empty response from {}", url)));
        }

        fs::write(target_path, &body).await.map_err(|e| {
            AppError::Download(format!("Failed to write {:?}: {}", target_path, e))
        })?;

        info!("Successfully downloaded: {} -> {:?}", url, target_path);
        Ok(body.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Result<Vec<u8>>);

    #[async_trait]
    impl HttpSource for FixedSource {
        async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
            match &self.0 {
                Ok(body) => Ok(body.clone()),
                Err(_) => Err(AppError::FetchStatus {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_download_writes_body_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("client.json");
        let source = FixedSource(Ok(b"{\"id\":\"meldmc\"}\n".to_vec()));

        let written = DownloadUtils::download_file(&source, "http://repo/x.json", &target)
            .await
            .unwrap();

        assert_eq!(written, 16);
        assert_eq!(std::fs::read(&target).unwrap(), b"{\"id\":\"meldmc\"}\n");
    }

    #[tokio::test]
    async fn test_download_rejects_empty_body() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("client.json");
        let source = FixedSource(Ok(Vec::new()));

        let err = DownloadUtils::download_file(&source, "http://repo/x.json", &target)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Download(_)));
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_download_maps_fetch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = FixedSource(Err(AppError::InvalidInput(String::new())));

        let err = DownloadUtils::download_file(&source, "http://repo/x.json", dir.path().join("a"))
            .await
            .unwrap_err();

        match err {
            AppError::Download(message) => assert!(message.contains("404")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
