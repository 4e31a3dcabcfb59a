use anyhow::{Context, Result};
use reqwest::Url;
use serde::{de::DeserializeOwned, Deserialize};

/// Typed client for the sortstash HTTP API.
///
/// The token is plain per-client state passed explicitly on construction;
/// there is no shared default-header mutation anywhere.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let base_url = Url::parse(base_url).context("invalid server URL")?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token: token.map(str::to_string),
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).context("failed to build API URL")
    }

    async fn send_json<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<T> {
        let req = match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            // The server reports failures as {"error": "..."}; fall back to
            // the raw body for anything else.
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            anyhow::bail!("API error ({status}): {message}");
        }
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let mut url = self.url("/register")?;
        url.query_pairs_mut()
            .append_pair("username", username)
            .append_pair("password", password);
        self.send_json(self.http.post(url)).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let mut url = self.url("/login")?;
        url.query_pairs_mut()
            .append_pair("username", username)
            .append_pair("password", password);
        self.send_json(self.http.post(url)).await
    }

    pub async fn change_password(&self, new_password: &str) -> Result<ChangePasswordResponse> {
        let mut url = self.url("/change_password")?;
        url.query_pairs_mut().append_pair("newPassword", new_password);
        self.send_json(self.http.patch(url)).await
    }

    pub async fn create_array(&self, size: i64) -> Result<ArrayResponse> {
        let mut url = self.url("/array/create")?;
        url.query_pairs_mut().append_pair("size", &size.to_string());
        self.send_json(self.http.post(url)).await
    }

    pub async fn patch_array(
        &self,
        new_size: Option<i64>,
        new_values: &[i64],
    ) -> Result<ArrayResponse> {
        let mut url = self.url("/array")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(size) = new_size {
                pairs.append_pair("newSize", &size.to_string());
            }
            for value in new_values {
                pairs.append_pair("newValues", &value.to_string());
            }
        }
        self.send_json(self.http.patch(url)).await
    }

    pub async fn get_array(&self) -> Result<GetArrayResponse> {
        let url = self.url("/array")?;
        self.send_json(self.http.get(url)).await
    }

    pub async fn sort_array(&self) -> Result<ArrayResponse> {
        let url = self.url("/array/sort/shell")?;
        self.send_json(self.http.post(url)).await
    }

    pub async fn list_history(&self) -> Result<Vec<HistoryEntry>> {
        let url = self.url("/requests_history")?;
        self.send_json(self.http.get(url)).await
    }

    pub async fn clear_history(&self) -> Result<MessageResponse> {
        let url = self.url("/requests_history")?;
        self.send_json(self.http.delete(url)).await
    }
}

// =============================================================================
// Request/response types (mirrored from server handlers)
// =============================================================================

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordResponse {
    pub message: String,
    #[serde(rename = "newToken")]
    pub new_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ArrayResponse {
    pub message: String,
    pub array: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct GetArrayResponse {
    pub array: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub endpoint: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
