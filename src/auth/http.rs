use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use url::Url;

use super::{ApiKeyInfo, ApiKeyValidator, AuthError, SessionInfo, SessionValidator};

fn parse_base(base_url: &str) -> Result<Url, AuthError> {
    let url = Url::parse(base_url)
        .map_err(|e| AuthError::Unavailable(format!("invalid service URL '{}': {}", base_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(AuthError::Unavailable(format!("invalid service URL '{}'", base_url)));
    }
    Ok(url)
}

fn join(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

fn is_rejection(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
    )
}

/// `POST {base}/api-keys/validate` with `{"api_key": "..."}`
pub struct HttpApiKeyValidator {
    client: Client,
    base_url: Url,
}

impl HttpApiKeyValidator {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AuthError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: parse_base(base_url)?,
        })
    }
}

#[async_trait]
impl ApiKeyValidator for HttpApiKeyValidator {
    async fn validate(&self, api_key: &str) -> Result<ApiKeyInfo, AuthError> {
        let response = self
            .client
            .post(join(&self.base_url, &["api-keys", "validate"]))
            .json(&json!({ "api_key": api_key }))
            .send()
            .await?;

        let status = response.status();
        if is_rejection(status) {
            return Err(AuthError::Rejected(format!("api key service returned {}", status)));
        }
        if !status.is_success() {
            return Err(AuthError::Unavailable(format!("api key service returned {}", status)));
        }
        Ok(response.json::<ApiKeyInfo>().await?)
    }
}

/// `GET {base}/sessions/{id}`
pub struct HttpSessionValidator {
    client: Client,
    base_url: Url,
}

impl HttpSessionValidator {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AuthError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: parse_base(base_url)?,
        })
    }
}

#[async_trait]
impl SessionValidator for HttpSessionValidator {
    async fn validate(&self, session_id: &str) -> Result<SessionInfo, AuthError> {
        let response = self
            .client
            .get(join(&self.base_url, &["sessions", session_id]))
            .send()
            .await?;

        let status = response.status();
        if is_rejection(status) {
            return Err(AuthError::Rejected(format!("session service returned {}", status)));
        }
        if !status.is_success() {
            return Err(AuthError::Unavailable(format!("session service returned {}", status)));
        }
        Ok(response.json::<SessionInfo>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_escaped() {
        let base = parse_base("http://auth.local/v2").unwrap();
        let url = join(&base, &["sessions", "../admin"]);
        assert_eq!(url.as_str(), "http://auth.local/v2/sessions/..%2Fadmin");
    }

    #[test]
    fn rejects_bad_base_url() {
        assert!(HttpApiKeyValidator::new("::::", Duration::from_secs(1)).is_err());
        assert!(HttpSessionValidator::new("data:text/plain,hi", Duration::from_secs(1)).is_err());
    }
}
