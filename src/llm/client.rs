use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Language-model collaborator: text in, text out, no structural guarantee
/// on the response shape. Injected into the pipeline so tests can substitute
/// a deterministic stub.
pub trait ModelClient: Send + Sync {
    fn generate(
        &self,
        system: &str,
        user: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Retry/timeout policy applied around every model call
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Caller-imposed timeout per attempt
    pub request_timeout: Duration,
    /// Maximum retries after the first attempt
    pub max_retries: u32,
    /// Base backoff between attempts, scaled linearly per retry
    pub retry_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
            max_retries: 2,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

/// Call the model with a timeout on every attempt and bounded retries.
/// A timeout is treated like any other failure.
pub async fn generate_with_retry<M: ModelClient>(
    client: &M,
    system: &str,
    user: &str,
    config: &RetryConfig,
) -> Result<String> {
    let mut last_error = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            info!("model call retry {} of {}", attempt, config.max_retries);
            tokio::time::sleep(config.retry_backoff * attempt).await;
        }

        match tokio::time::timeout(config.request_timeout, client.generate(system, user)).await {
            Ok(Ok(text)) => return Ok(text),
            Ok(Err(e)) => last_error = Some(e),
            Err(_) => {
                last_error = Some(anyhow::anyhow!(
                    "model call timed out after {:?}",
                    config.request_timeout
                ))
            }
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("model call failed")))
}

/// Configuration for the Anthropic API client
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key (from ANTHROPIC_API_KEY env var)
    pub api_key: String,
    /// Model to use (e.g., "claude-sonnet-4-20250514")
    pub model: String,
    /// Temperature (0-1, lower = more deterministic)
    pub temperature: f64,
    /// Maximum tokens in response
    pub max_tokens: u32,
}

impl AnthropicConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .context("ANTHROPIC_API_KEY environment variable not set")?;

        Ok(Self {
            api_key,
            model: "claude-sonnet-4-20250514".to_string(),
            temperature: 0.2,
            max_tokens: 2048,
        })
    }

    /// Create with custom settings
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            temperature: 0.2,
            max_tokens: 2048,
        }
    }
}

/// Anthropic API client
pub struct AnthropicClient {
    client: Client,
    config: AnthropicConfig,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn send_message(&self, system: &str, user: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
            system: Some(system.to_string()),
            messages: vec![Message {
                role: "user".to_string(),
                content: user.to_string(),
            }],
        };

        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Anthropic API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Anthropic API error: {} - {}", status, body);
        }

        let response: AnthropicResponse = response
            .json()
            .await
            .context("Failed to parse Anthropic API response")?;

        // Extract text from the first content block
        response
            .content
            .first()
            .and_then(|c| {
                if c.content_type == "text" {
                    Some(c.text.clone())
                } else {
                    None
                }
            })
            .context("No text content in response")
    }
}

impl ModelClient for AnthropicClient {
    async fn generate(&self, system: &str, user: &str) -> Result<String> {
        self.send_message(system, user).await
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FlakyModel {
        calls: AtomicU32,
        fail_first: u32,
    }

    impl ModelClient for FlakyModel {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.fail_first {
                anyhow::bail!("transient failure");
            }
            Ok("Score: 7".to_string())
        }
    }

    fn fast_retry() -> RetryConfig {
        RetryConfig {
            request_timeout: Duration::from_secs(1),
            max_retries: 2,
            retry_backoff: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_failures() {
        let model = FlakyModel {
            calls: AtomicU32::new(0),
            fail_first: 2,
        };
        let text = generate_with_retry(&model, "system", "user", &fast_retry())
            .await
            .unwrap();
        assert_eq!(text, "Score: 7");
        assert_eq!(model.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_budget() {
        let model = FlakyModel {
            calls: AtomicU32::new(0),
            fail_first: 10,
        };
        let err = generate_with_retry(&model, "system", "user", &fast_retry())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("transient failure"));
        assert_eq!(model.calls.load(Ordering::SeqCst), 3);
    }

    struct SlowModel;

    impl ModelClient for SlowModel {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn test_timeout_is_a_failure() {
        let config = RetryConfig {
            request_timeout: Duration::from_millis(10),
            max_retries: 0,
            retry_backoff: Duration::from_millis(1),
        };
        let err = generate_with_retry(&SlowModel, "system", "user", &config)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
