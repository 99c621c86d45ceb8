#![allow(dead_code)]

use async_trait::async_trait;
use meldmc_installer_lib::error::{AppError, Result};
use meldmc_installer_lib::meld::MeldRepository;
use meldmc_installer_lib::utils::download_utils::HttpSource;
use std::collections::HashMap;
use std::sync::Mutex;

pub const BASE_URL: &str = "http://repo.test";

pub fn repository() -> MeldRepository {
    MeldRepository::new(BASE_URL, "net/coosanta/meldmc")
}

pub fn metadata_xml(versions: &[&str]) -> String {
    let entries: String = versions
        .iter()
        .map(|v| format!("      <version>{}</version>\n", v))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>net.coosanta</groupId>
  <artifactId>meldmc</artifactId>
  <versioning>
    <versions>
{}    </versions>
  </versioning>
</metadata>"#,
        entries
    )
}

/// In-memory repository answering from a url -> (status, body) table and
/// recording every request it sees.
#[derive(Default)]
pub struct FakeRepository {
    responses: HashMap<String, (u16, Vec<u8>)>,
    requests: Mutex<Vec<String>>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.into(), (status, body.into()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpSource for FakeRepository {
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some((status, body)) if (200..300).contains(status) => Ok(body.clone()),
            Some((status, _)) => Err(AppError::FetchStatus {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(AppError::FetchStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
