//! Hosted backend REST client
//!
//! Thin wrapper over the backend's PostgREST-style API: table reads with
//! query-string filters, `rpc/` calls and exact row counts.

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// Client for the hosted backend
pub struct BackendClient {
    http: Client,
    base_url: String,
    service_key: String,
}

impl BackendClient {
    pub fn new(base_url: String, service_key: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
        }
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| BackendError::Deserialization(e.to_string()))
    }

    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), BackendError> {
        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else if status.as_u16() == 401 {
            Err(BackendError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(BackendError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(BackendError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// GET `path` (table name plus query string) and decode the JSON body
    pub async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, BackendError> {
        let resp = self
            .authorized(self.http.get(self.rest_url(path)))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// GET an inclusive row range along with the exact total row count
    pub async fn get_page<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        range: (u64, u64),
    ) -> Result<(T, i64), BackendError> {
        let resp = self
            .authorized(self.http.get(self.rest_url(path)))
            .header("Prefer", "count=exact")
            .header("Range-Unit", "items")
            .header("Range", format!("{}-{}", range.0, range.1))
            .send()
            .await?;

        let resp = Self::check_status(resp).await?;
        let total = total_from_content_range(
            resp.headers()
                .get("Content-Range")
                .and_then(|v| v.to_str().ok()),
        )?;
        let rows = resp
            .json()
            .await
            .map_err(|e| BackendError::Deserialization(e.to_string()))?;
        Ok((rows, total))
    }

    /// Exact number of rows matching `path`, without fetching them
    pub async fn count(&self, path: &str) -> Result<i64, BackendError> {
        let resp = self
            .authorized(self.http.head(self.rest_url(path)))
            .header("Prefer", "count=exact")
            .send()
            .await?;

        let resp = Self::check_status(resp).await?;
        total_from_content_range(
            resp.headers()
                .get("Content-Range")
                .and_then(|v| v.to_str().ok()),
        )
    }

    /// Call a stored procedure
    pub async fn rpc<B: Serialize + ?Sized>(&self, function: &str, args: &B) -> Result<(), BackendError> {
        let resp = self
            .authorized(self.http.post(self.rest_url(&format!("rpc/{}", function))))
            .json(args)
            .send()
            .await?;
        self.handle_empty_response(resp).await
    }

    /// Call a stored procedure and decode its result
    pub async fn rpc_returning<B, T>(&self, function: &str, args: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: for<'de> Deserialize<'de>,
    {
        let resp = self
            .authorized(self.http.post(self.rest_url(&format!("rpc/{}", function))))
            .json(args)
            .send()
            .await?;
        self.handle_response(resp).await
    }
}

/// Double-quote a filter value so reserved characters (`,.:()`) survive
/// inside logical (`or=`/`and=`) and `in.` filters
pub(super) fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Parse the total out of a `Content-Range` header like `0-9/42` or `*/0`
fn total_from_content_range(header: Option<&str>) -> Result<i64, BackendError> {
    let header = header.ok_or_else(|| {
        BackendError::Deserialization("Missing Content-Range header".to_string())
    })?;

    header
        .rsplit_once('/')
        .and_then(|(_, total)| total.trim().parse().ok())
        .ok_or_else(|| {
            BackendError::Deserialization(format!("Invalid Content-Range header: {}", header))
        })
}
