//! Server-side proxy for the generative model.
//!
//! Callers never see the API key: prompts are assembled here from validated
//! form fields and sent with the key held in [`AiConfig`].

mod extract;
pub mod prompt;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

pub use self::extract::json_block;
use crate::{config::AiConfig, prelude::*};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// One piece of a multimodal prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Part {
  Text { text: String },
  InlineData { inline_data: InlineData },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineData {
  pub mime_type: String,
  /// Base64 without a `data:` prefix
  pub data: String,
}

impl Part {
  pub fn text(text: impl Into<String>) -> Self {
    Self::Text { text: text.into() }
  }

  pub fn image(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
    Self::InlineData {
      inline_data: InlineData {
        mime_type: mime_type.into(),
        data: data.into(),
      },
    }
  }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
  contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
  parts: &'a [Part],
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<ReplyContent>,
}

#[derive(Debug, Deserialize)]
struct ReplyContent {
  #[serde(default)]
  parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
  text: Option<String>,
}

impl GenerateResponse {
  fn into_text(self) -> Option<String> {
    self
      .candidates
      .into_iter()
      .next()?
      .content?
      .parts
      .into_iter()
      .next()?
      .text
      .filter(|text| !text.trim().is_empty())
  }
}

pub struct Client {
  http: reqwest::Client,
  config: AiConfig,
}

impl Client {
  pub fn new(config: AiConfig) -> anyhow::Result<Self> {
    let http = reqwest::Client::builder()
      .timeout(config.timeout)
      .build()
      .context("Failed to build AI http client")?;

    Ok(Self { http, config })
  }

  fn endpoint(&self) -> String {
    format!(
      "{}/models/{}:generateContent",
      self.config.base_url.trim_end_matches('/'),
      self.config.model
    )
  }

  /// Sends the prompt and returns the model's first text reply.
  pub async fn generate(&self, parts: &[Part]) -> Result<String, Ai> {
    let key = self.config.api_key.as_deref().ok_or(Ai::NotConfigured)?;

    let mut headers = HeaderMap::new();
    headers.insert(
      API_KEY_HEADER,
      HeaderValue::from_str(key).map_err(|_| Ai::NotConfigured)?,
    );

    let body = GenerateRequest { contents: [Content { parts }] };

    debug!("Sending {} prompt part(s) to {}", parts.len(), self.config.model);
    let resp = self
      .http
      .post(self.endpoint())
      .headers(headers)
      .json(&body)
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Ai::Status(status.as_u16()));
    }

    let reply: GenerateResponse = resp.json().await?;
    reply.into_text().ok_or(Ai::EmptyReply)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn request_wire_format() {
    let parts = [Part::text("hello"), Part::image("image/png", "AAAA")];
    let body = GenerateRequest { contents: [Content { parts: &parts }] };

    assert_eq!(
      json::to_value(&body).unwrap(),
      json::json!({
        "contents": [{
          "parts": [
            { "text": "hello" },
            { "inline_data": { "mime_type": "image/png", "data": "AAAA" } }
          ]
        }]
      })
    );
  }

  #[test]
  fn reply_takes_first_text_part() {
    let reply: GenerateResponse = json::from_value(json::json!({
      "candidates": [
        { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
        { "content": { "parts": [{ "text": "other" }] } }
      ]
    }))
    .unwrap();

    assert_eq!(reply.into_text().as_deref(), Some("first"));
  }

  #[test]
  fn empty_reply_has_no_text() {
    let reply: GenerateResponse =
      json::from_value(json::json!({ "promptFeedback": {} })).unwrap();
    assert_eq!(reply.into_text(), None);

    let reply: GenerateResponse = json::from_value(json::json!({
      "candidates": [{ "content": { "parts": [{ "text": "  " }] } }]
    }))
    .unwrap();
    assert_eq!(reply.into_text(), None);
  }

  #[tokio::test]
  async fn missing_key_fails_before_network() {
    let client = Client::new(AiConfig::default()).unwrap();
    let err = client.generate(&[Part::text("hi")]).await.unwrap_err();
    assert!(matches!(err, Ai::NotConfigured));
  }

  #[test]
  fn endpoint_joins_model() {
    let client = Client::new(AiConfig {
      base_url: "http://localhost:9000/v1/".into(),
      ..AiConfig::default()
    })
    .unwrap();

    assert_eq!(
      client.endpoint(),
      "http://localhost:9000/v1/models/gemini-1.5-flash:generateContent"
    );
  }
}
