//! HTTP client for the storefront REST API.
//!
//! Every call is normalized into an [`ApiResponse`] envelope. The API
//! reports application-level failures inside a 200 body (`responseCode`
//! 400/404/405), so non-2xx statuses and error payloads are ordinary data
//! for the caller to assert on; only transport failures surface as `Err`.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value;

use crate::fixture::{site_url, RegistrationDetails};
use crate::result::ComprarResult;

/// Default base URL of the API under test
pub const DEFAULT_API_BASE: &str = "https://automationexercise.com/api";

/// Response body, tagged by whether it parsed as JSON.
///
/// The API answers some requests with HTML error pages; those degrade to
/// [`Payload::Text`] instead of failing the call.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Body parsed as JSON
    Json(Value),
    /// Raw body kept as text
    Text(String),
}

impl Payload {
    /// Tag a raw body: JSON when it parses, text otherwise
    #[must_use]
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(body),
        }
    }

    /// Whether the body parsed as JSON
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// The application-level `responseCode` field, if present
    #[must_use]
    pub fn response_code(&self) -> Option<i64> {
        self.field("responseCode").and_then(Value::as_i64)
    }

    /// The application-level `message` field, if present
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.field("message").and_then(Value::as_str)
    }

    /// A top-level JSON field
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Json(value) => value.get(key),
            Self::Text(_) => None,
        }
    }

    /// Length of a top-level JSON array field
    #[must_use]
    pub fn array_len(&self, key: &str) -> Option<usize> {
        self.field(key).and_then(Value::as_array).map(Vec::len)
    }

    /// The raw text body, when the payload did not parse as JSON
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

/// Uniform envelope around every API response.
///
/// Constructed fresh per call and immutable once returned.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status_code: u16,
    /// Parsed or raw body
    pub data: Payload,
    /// Response headers
    pub headers: BTreeMap<String, String>,
    /// Whether the HTTP status was 2xx
    pub success: bool,
}

impl ApiResponse {
    /// Shorthand for the body's `responseCode` field
    #[must_use]
    pub fn response_code(&self) -> Option<i64> {
        self.data.response_code()
    }
}

/// Thin client over the storefront REST API.
///
/// The API expects form-encoded request bodies; `post_json` exists for the
/// rare JSON-body call and the two are separate methods so a caller can
/// never send both.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Create a client against [`DEFAULT_API_BASE`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Create a client against a custom base URL
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a client honoring the `COMPRAR_BASE_URL` override
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_base_url(format!("{}/api", site_url()))
    }

    /// The base URL in use
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    /// GET an endpoint
    pub async fn get(&self, endpoint: &str) -> ComprarResult<ApiResponse> {
        let resp = self.client.get(self.url(endpoint)).send().await?;
        Self::envelope(resp).await
    }

    /// POST form-encoded fields to an endpoint (empty slice sends an empty
    /// form body)
    pub async fn post_form(
        &self,
        endpoint: &str,
        fields: &[(&str, &str)],
    ) -> ComprarResult<ApiResponse> {
        let resp = self
            .client
            .post(self.url(endpoint))
            .form(fields)
            .send()
            .await?;
        Self::envelope(resp).await
    }

    /// POST a JSON body to an endpoint
    pub async fn post_json(&self, endpoint: &str, body: &Value) -> ComprarResult<ApiResponse> {
        let resp = self
            .client
            .post(self.url(endpoint))
            .json(body)
            .send()
            .await?;
        Self::envelope(resp).await
    }

    /// PUT form-encoded fields to an endpoint
    pub async fn put_form(
        &self,
        endpoint: &str,
        fields: &[(&str, &str)],
    ) -> ComprarResult<ApiResponse> {
        let resp = self
            .client
            .put(self.url(endpoint))
            .form(fields)
            .send()
            .await?;
        Self::envelope(resp).await
    }

    /// DELETE an endpoint, optionally with form-encoded fields
    pub async fn delete_form(
        &self,
        endpoint: &str,
        fields: &[(&str, &str)],
    ) -> ComprarResult<ApiResponse> {
        let mut request = self.client.delete(self.url(endpoint));
        if !fields.is_empty() {
            request = request.form(fields);
        }
        let resp = request.send().await?;
        Self::envelope(resp).await
    }

    /// List all products
    pub async fn products_list(&self) -> ComprarResult<ApiResponse> {
        self.get("productsList").await
    }

    /// List all brands
    pub async fn brands_list(&self) -> ComprarResult<ApiResponse> {
        self.get("brandsList").await
    }

    /// Search products by term; the empty term returns the full collection
    pub async fn search_product(&self, term: &str) -> ComprarResult<ApiResponse> {
        self.post_form("searchProduct", &[("search_product", term)])
            .await
    }

    /// Register a new account from a full profile
    pub async fn create_account(
        &self,
        details: &RegistrationDetails,
    ) -> ComprarResult<ApiResponse> {
        let resp = self
            .client
            .post(self.url("createAccount"))
            .form(details)
            .send()
            .await?;
        Self::envelope(resp).await
    }

    /// Check a login pair; valid → 200, unknown → 404, missing field → 400
    pub async fn verify_login(&self, email: &str, password: &str) -> ComprarResult<ApiResponse> {
        self.post_form("verifyLogin", &[("email", email), ("password", password)])
            .await
    }

    /// Delete the account behind a login pair
    pub async fn delete_account(&self, email: &str, password: &str) -> ComprarResult<ApiResponse> {
        self.delete_form("deleteAccount", &[("email", email), ("password", password)])
            .await
    }

    async fn envelope(resp: reqwest::Response) -> ComprarResult<ApiResponse> {
        let status_code = resp.status().as_u16();
        let success = resp.status().is_success();
        let headers = resp
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = resp.text().await?;
        Ok(ApiResponse {
            status_code,
            data: Payload::from_body(body),
            headers,
            success,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod payload_tests {
        use super::*;

        #[test]
        fn test_json_body_is_tagged_json() {
            let payload =
                Payload::from_body(r#"{"responseCode": 200, "products": [1, 2, 3]}"#.to_string());
            assert!(payload.is_json());
            assert_eq!(payload.response_code(), Some(200));
            assert_eq!(payload.array_len("products"), Some(3));
        }

        #[test]
        fn test_html_body_degrades_to_text() {
            let payload = Payload::from_body("<html><body>Not Found</body></html>".to_string());
            assert!(!payload.is_json());
            assert_eq!(payload.response_code(), None);
            assert_eq!(
                payload.as_text(),
                Some("<html><body>Not Found</body></html>")
            );
        }

        #[test]
        fn test_message_extraction() {
            let payload = Payload::from_body(
                r#"{"responseCode": 405, "message": "This request method is not supported."}"#
                    .to_string(),
            );
            assert_eq!(
                payload.message(),
                Some("This request method is not supported.")
            );
        }

        #[test]
        fn test_array_len_missing_key() {
            let payload = Payload::from_body(r#"{"responseCode": 200}"#.to_string());
            assert_eq!(payload.array_len("products"), None);
        }
    }

    mod envelope_tests {
        use super::*;

        #[test]
        fn test_envelope_shorthand_reaches_into_payload() {
            let response = ApiResponse {
                status_code: 200,
                data: Payload::Json(json!({"responseCode": 405, "message": "nope"})),
                headers: BTreeMap::new(),
                success: true,
            };
            // HTTP says 200 while the application says 405; both visible
            assert_eq!(response.status_code, 200);
            assert_eq!(response.response_code(), Some(405));
        }
    }

    mod client_tests {
        use super::*;

        #[test]
        fn test_default_base_url() {
            let client = ApiClient::new();
            assert_eq!(client.base_url(), DEFAULT_API_BASE);
        }

        #[test]
        fn test_base_url_trailing_slash_stripped() {
            let client = ApiClient::with_base_url("http://localhost:8080/api/");
            assert_eq!(client.base_url(), "http://localhost:8080/api");
            assert_eq!(client.url("productsList"), "http://localhost:8080/api/productsList");
        }
    }
}
