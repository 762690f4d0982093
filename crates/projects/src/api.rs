//! HTTP client for the remote novel collection.
//!
//! The server is an opaque collaborator: `GET /novels` lists, `POST /novels`
//! creates and answers `{ "novel": ... }`, `DELETE /novels/{id}` removes.

use std::time::Duration;

use {
    async_trait::async_trait,
    reqwest::{Client, Response},
    tracing::debug,
};

use crate::{
    error::{Context, Error, Result},
    types::{CreateNovel, CreateNovelResponse, Novel, NovelId},
};

/// Remote operations the session store depends on.
#[async_trait]
pub trait NovelApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Novel>>;
    async fn create(&self, request: &CreateNovel) -> Result<Novel>;
    async fn delete(&self, id: &NovelId) -> Result<()>;
}

/// `reqwest`-backed [`NovelApi`].
pub struct HttpNovelApi {
    client: Client,
    base_url: String,
}

impl HttpNovelApi {
    /// `base_url` is the API root (e.g. `http://localhost:8000/api`); the
    /// request timeout is enforced by the underlying client.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client for novel API")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/novels", self.base_url)
    }

    fn item_url(&self, id: &NovelId) -> String {
        format!(
            "{}/novels/{}",
            self.base_url,
            urlencoding::encode(&id.to_string())
        )
    }

    fn ensure_success(operation: &'static str, resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(Error::status(operation, status))
        }
    }
}

#[async_trait]
impl NovelApi for HttpNovelApi {
    async fn list(&self) -> Result<Vec<Novel>> {
        let url = self.collection_url();
        debug!(url = %url, "listing novels");
        let resp = self.client.get(&url).send().await?;
        let resp = Self::ensure_success("list novels", resp)?;
        Ok(resp.json().await?)
    }

    async fn create(&self, request: &CreateNovel) -> Result<Novel> {
        let url = self.collection_url();
        debug!(url = %url, provisional_id = %request.id, "creating novel");
        let resp = self.client.post(&url).json(request).send().await?;
        let resp = Self::ensure_success("create novel", resp)?;
        let body: CreateNovelResponse = resp.json().await?;
        Ok(body.novel)
    }

    async fn delete(&self, id: &NovelId) -> Result<()> {
        let url = self.item_url(id);
        debug!(url = %url, "deleting novel");
        let resp = self.client.delete(&url).send().await?;
        Self::ensure_success("delete novel", resp)?;
        Ok(())
    }
}
