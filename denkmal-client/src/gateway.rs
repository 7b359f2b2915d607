//! HTTP access to the CMS JSON API.
//!
//! The store only sees the [`FetchGateway`] trait; [`HttpGateway`] is the
//! production implementation against `{base}/{language}/api/v2`.

use crate::config::ClientConfig;
use async_trait::async_trait;
use denkmal_core::{
    AuthorId, AuthorLevelDetail, AuthorProfile, GatewayError, Language, Level, Memorial,
    MemorialId, MemorialList, Page,
};
use serde::Serialize;
use std::time::Duration;

/// Read-only request contract against the CMS.
///
/// Every non-success status surfaces as an error, never as empty data.
#[async_trait]
pub trait FetchGateway: Send + Sync {
    async fn get_memorial(&self, id: MemorialId) -> Result<Memorial, GatewayError>;

    async fn get_author(&self, slug: &str) -> Result<AuthorProfile, GatewayError>;

    async fn get_level(&self, slug: &str, level: Level)
        -> Result<AuthorLevelDetail, GatewayError>;

    async fn get_memorials(&self, query: &MemorialsQuery) -> Result<MemorialList, GatewayError>;

    async fn get_page(&self, slug: &str) -> Result<Page, GatewayError>;
}

/// Filter parameters of the memorial listing endpoint. `None` fields are
/// left out of the query string entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemorialsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorId>,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

#[derive(Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    language: Language,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig) -> Result<Self, GatewayError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;

        Ok(Self {
            client,
            base_url: config.cms_base_url.trim_end_matches('/').to_string(),
            language: config.language,
        })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/api/v2{}", self.base_url, self.language.code(), path)
    }

    async fn get_json<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, GatewayError>
    where
        T: serde::de::DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut request = self.client.get(self.url(path));
        if let Some(query) = query {
            request = request.query(query);
        }
        let response = request.send().await.map_err(transport)?;
        parse_response(response).await
    }
}

#[async_trait]
impl FetchGateway for HttpGateway {
    async fn get_memorial(&self, id: MemorialId) -> Result<Memorial, GatewayError> {
        let path = format!("/memorials/{}", id);
        self.get_json::<Memorial, ()>(&path, None).await
    }

    async fn get_author(&self, slug: &str) -> Result<AuthorProfile, GatewayError> {
        let path = format!("/authors/{}", slug);
        self.get_json::<AuthorProfile, ()>(&path, None).await
    }

    async fn get_level(
        &self,
        slug: &str,
        level: Level,
    ) -> Result<AuthorLevelDetail, GatewayError> {
        let path = format!("/authors/{}/{}", slug, level);
        self.get_json::<AuthorLevelDetail, ()>(&path, None).await
    }

    async fn get_memorials(&self, query: &MemorialsQuery) -> Result<MemorialList, GatewayError> {
        self.get_json("/memorials", Some(query)).await
    }

    async fn get_page(&self, slug: &str) -> Result<Page, GatewayError> {
        let path = format!("/page/{}", slug);
        self.get_json::<Page, ()>(&path, None).await
    }
}

fn transport(err: reqwest::Error) -> GatewayError {
    GatewayError::Transport {
        reason: err.to_string(),
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, GatewayError> {
    let status = response.status();
    if status.is_success() {
        response.json::<T>().await.map_err(|err| GatewayError::Decode {
            reason: err.to_string(),
        })
    } else {
        let message = response.text().await.map_err(transport)?;
        Err(GatewayError::Status {
            status: status.as_u16(),
            message,
        })
    }
}
