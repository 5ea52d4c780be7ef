use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::common::{
    ApiResponse, DashboardStats, HealthBanner, MessageLog, MessageTemplate, TemplateDraft,
    TemplateId, TemplatePatch,
};

use super::error::ApiError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Thin wrapper over the AutoReplyBot REST backend.
///
/// Every call goes through [`ApiClient::send_json`], which logs failures once
/// and hands the error back unchanged. Nothing is retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = HttpClient::builder().default_headers(headers).build()?;
        Ok(Self::with_http(http, base_url))
    }

    pub fn with_http(http: HttpClient, base_url: impl AsRef<str>) -> Self {
        Self {
            http,
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_templates(&self) -> Result<Vec<MessageTemplate>, ApiError> {
        self.send_enveloped(self.http.get(self.url("/templates")))
            .await
    }

    pub async fn get_template(&self, id: TemplateId) -> Result<MessageTemplate, ApiError> {
        self.send_enveloped(self.http.get(self.url(&format!("/templates/{id}"))))
            .await
    }

    pub async fn create_template(
        &self,
        draft: &TemplateDraft,
    ) -> Result<MessageTemplate, ApiError> {
        self.send_enveloped(self.http.post(self.url("/templates")).json(draft))
            .await
    }

    pub async fn update_template(
        &self,
        id: TemplateId,
        patch: &TemplatePatch,
    ) -> Result<MessageTemplate, ApiError> {
        self.send_enveloped(
            self.http
                .put(self.url(&format!("/templates/{id}")))
                .json(patch),
        )
        .await
    }

    /// The payload of a delete is meaningless; only the envelope flag is checked.
    pub async fn delete_template(&self, id: TemplateId) -> Result<(), ApiError> {
        let envelope: ApiResponse<Value> = self
            .send_json(self.http.delete(self.url(&format!("/templates/{id}"))))
            .await?;
        if envelope.success {
            Ok(())
        } else {
            Err(report(ApiError::Rejected {
                message: envelope.message,
            }))
        }
    }

    /// One page of message history. `page` is 1-based; the backend does not
    /// report a total count.
    pub async fn list_logs(&self, page: u32, limit: u32) -> Result<Vec<MessageLog>, ApiError> {
        self.send_enveloped(
            self.http
                .get(self.url("/logs"))
                .query(&[("page", page), ("limit", limit)]),
        )
        .await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.send_enveloped(self.http.get(self.url("/stats"))).await
    }

    /// Banner served by the backend root; used as a reachability check.
    pub async fn health(&self) -> Result<String, ApiError> {
        let banner: HealthBanner = self.send_json(self.http.get(self.url("/"))).await?;
        Ok(banner.message)
    }

    async fn send_enveloped<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let envelope: ApiResponse<T> = self.send_json(builder).await?;
        unwrap_envelope(envelope).map_err(report)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(|err| report(err.into()))?;
        let status = response.status();
        log::debug!("{} {}", status.as_u16(), response.url());
        let body = response.text().await.map_err(|err| report(err.into()))?;

        if !status.is_success() {
            return Err(report(ApiError::Status {
                status: status.as_u16(),
                body,
            }));
        }

        serde_json::from_str(&body).map_err(|err| report(err.into()))
    }
}

/// `success: false` is an error even when the HTTP call itself succeeded.
pub fn unwrap_envelope<T>(envelope: ApiResponse<T>) -> Result<T, ApiError> {
    if !envelope.success {
        return Err(ApiError::Rejected {
            message: envelope.message,
        });
    }
    envelope.data.ok_or(ApiError::MissingData)
}

fn report(err: ApiError) -> ApiError {
    log::error!("API error: {}", err.log_detail());
    err
}
