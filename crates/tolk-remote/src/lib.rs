use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tolk_translator::{ModelProvider, ProviderError, ProviderLanguage, ProviderMetadata, Translator};

/// Client for a companion model service on the device.
///
/// `POST {base}/models/{tag}` makes a model available (409 means it already is),
/// `POST {base}/translate` translates a JSON `{text, source, target}` body.
#[derive(Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct TranslateBody<'a> {
    text: &'a str,
    source: &'a str,
    target: &'a str,
}

#[derive(Deserialize)]
struct TranslateReply {
    text: String,
}

impl HttpProvider {
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(network_error)?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn models_url(&self, language: ProviderLanguage) -> String {
        format!("{}/models/{}", self.api_url, language.tag())
    }

    pub fn translate_url(&self) -> String {
        format!("{}/translate", self.api_url)
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.post(url);
        if self.api_key.is_empty() {
            request
        } else {
            request.bearer_auth(&self.api_key)
        }
    }
}

fn network_error(e: reqwest::Error) -> ProviderError {
    ProviderError::Network(e.to_string())
}

/// Maps non-success statuses; `None` means the call went through
fn status_error(status: StatusCode) -> Option<ProviderError> {
    if status.is_success() {
        return None;
    }

    Some(match status {
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError,
        _ => ProviderError::Api(format!("HTTP {}", status)),
    })
}

#[async_trait]
impl ModelProvider for HttpProvider {
    async fn download_model(&self, language: ProviderLanguage) -> Result<(), ProviderError> {
        let url = self.models_url(language);
        tracing::debug!("Requesting model {} from {}", language, url);

        let response = self.post(&url).send().await.map_err(network_error)?;

        // already installed
        if response.status() == StatusCode::CONFLICT {
            return Ok(());
        }

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::ModelUnavailable(language));
        }

        match status_error(response.status()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Translator for HttpProvider {
    async fn translate(
        &self,
        text: &str,
        source: ProviderLanguage,
        target: ProviderLanguage,
    ) -> Result<String, ProviderError> {
        let body = TranslateBody {
            text,
            source: source.tag(),
            target: target.tag(),
        };

        let response = self
            .post(&self.translate_url())
            .json(&body)
            .send()
            .await
            .map_err(network_error)?;

        if let Some(err) = status_error(response.status()) {
            return Err(err);
        }

        let reply: TranslateReply = response
            .json()
            .await
            .map_err(|e| ProviderError::Api(format!("Failed to parse response: {}", e)))?;

        Ok(reply.text)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "http".to_string(),
            on_device: true,
            requires_api_key: !self.api_key.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> HttpProvider {
        HttpProvider::new(
            "http://127.0.0.1:7070/".to_string(),
            String::new(),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn urls_use_provider_tags_without_double_slash() {
        let provider = provider();
        assert_eq!(
            provider.models_url(ProviderLanguage::German),
            "http://127.0.0.1:7070/models/de"
        );
        assert_eq!(provider.translate_url(), "http://127.0.0.1:7070/translate");
    }

    #[test]
    fn statuses_map_to_provider_errors() {
        assert_eq!(status_error(StatusCode::OK), None);
        assert_eq!(
            status_error(StatusCode::TOO_MANY_REQUESTS),
            Some(ProviderError::RateLimitExceeded)
        );
        assert_eq!(
            status_error(StatusCode::FORBIDDEN),
            Some(ProviderError::AuthenticationError)
        );
        assert_eq!(
            status_error(StatusCode::BAD_GATEWAY),
            Some(ProviderError::Api("HTTP 502 Bad Gateway".to_string()))
        );
    }

    #[test]
    fn translate_body_uses_tags() {
        let body = TranslateBody {
            text: "Hello",
            source: ProviderLanguage::English.tag(),
            target: ProviderLanguage::French.tag(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "text": "Hello", "source": "en", "target": "fr" })
        );

        let reply: TranslateReply = serde_json::from_str(r#"{"text":"Bonjour"}"#).unwrap();
        assert_eq!(reply.text, "Bonjour");
    }

    #[test]
    fn metadata_reflects_api_key() {
        assert!(!provider().metadata().requires_api_key);
        let keyed = HttpProvider::new(
            "http://localhost".to_string(),
            "secret".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert!(keyed.metadata().requires_api_key);
    }
}
