// FILE: crates/content-sources/src/dlsite.rs

use crate::page::parse_work_page;
use crate::{FetchTask, FetchedWork, LocatorTemplates, SourceResult, WorkSource};
use async_trait::async_trait;
use bytes::Bytes;
use dlshelf_core::WorkId;
use dlshelf_network::Client;
use log::debug;

/// DLsite work pages fetched over HTTP
#[derive(Debug, Clone)]
pub struct DlsiteSource {
    client: Client,
    locators: LocatorTemplates,
}

impl DlsiteSource {
    pub fn new(client: Client, locators: LocatorTemplates) -> Self {
        Self { client, locators }
    }
}

#[async_trait]
impl WorkSource for DlsiteSource {
    fn locator(&self, id: &WorkId) -> SourceResult<String> {
        self.locators.locator(id)
    }

    async fn fetch_work(&self, task: &FetchTask) -> SourceResult<FetchedWork> {
        let html = self.client.get_text(&task.locator).await?;
        debug!("Fetched {} ({} bytes)", task.locator, html.len());
        parse_work_page(&task.id, &html)
    }

    async fn fetch_image(&self, locator: &str) -> SourceResult<Bytes> {
        Ok(self.client.get_bytes(locator).await?)
    }
}
