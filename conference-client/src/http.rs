//! HTTP client for the conference REST API

use http::StatusCode;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::conference::Order;

use crate::{ClientConfig, ClientError, ClientResult};

/// Listing filters (`GET /conferencias`)
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConferenceFilter {
    /// Order number
    #[serde(rename = "numero", skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Customer ID
    #[serde(rename = "cliente", skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
}

/// Listing response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConferenceList {
    #[serde(rename = "conferencias", default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub count: u64,
}

/// HTTP client for making requests to the conference API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut request = self.client.get(self.url(path));

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let mut request = self.client.get(self.url(path)).query(query);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<T> {
        let mut request = self.client.put(self.url(path)).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            tracing::debug!(status = status.as_u16(), body = %text, "Request failed");
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        let bytes = response.bytes().await?;
        // Empty bodies are read as JSON null
        let body: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        serde_json::from_slice(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    // ========== Conference API ==========

    /// Fetch one order
    pub async fn fetch_conference(&self, order_id: &str) -> ClientResult<Order> {
        self.get(&format!("conferencias/{}", order_id)).await
    }

    /// Replace one order with the write payload of `order`
    ///
    /// Server-managed fields are stripped before sending. The response body
    /// is returned as-is since it may still describe the previous state.
    pub async fn replace_conference(&self, order_id: &str, order: &Order) -> ClientResult<serde_json::Value> {
        let payload = order.replace_payload()?;
        self.put(&format!("conferencias/{}", order_id), &payload).await
    }

    /// List orders
    pub async fn list_conferences(&self, filter: &ConferenceFilter) -> ClientResult<ConferenceList> {
        self.get_with_query("conferencias", filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:3000/api/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(client.url("/conferencias/1"), "http://localhost:3000/api/conferencias/1");
        assert_eq!(client.url("conferencias"), "http://localhost:3000/api/conferencias");
    }

    #[test]
    fn test_filter_query_skips_empty() {
        let filter = ConferenceFilter {
            number: Some("1234".into()),
            customer: None,
        };
        assert_eq!(serde_json::to_value(&filter).unwrap(), serde_json::json!({ "numero": "1234" }));
    }

    #[test]
    fn test_list_defaults() {
        let list: ConferenceList = serde_json::from_str("{}").unwrap();
        assert!(list.orders.is_empty());
        assert_eq!(list.count, 0);
    }
}
