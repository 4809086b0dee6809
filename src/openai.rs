//! Blocking client for the OpenAI `audio/speech` endpoint.

use std::io::Read;
use std::time::Duration;

use tracing::debug;

use crate::synth::{SpeechRequest, SpeechSynthesizer};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("speech API returned {code}: {body}")]
    Status { code: u16, body: String },
    #[error("speech API request failed")]
    Transport(#[source] Box<ureq::Transport>),
}

impl From<ureq::Error> for SpeechError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, response) => SpeechError::Status {
                code,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(t) => SpeechError::Transport(Box::new(t)),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(600),
        }
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .finish()
    }
}

impl OpenAiConfig {
    /// Reads `OPENAI_API_KEY` and `OPENAI_BASE_URL`. Empty values count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_key: lookup(API_KEY_VAR).filter(|s| !s.is_empty()),
            base_url: lookup(BASE_URL_VAR)
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.base_url),
            ..defaults
        }
    }

    pub fn speech_url(&self) -> String {
        format!("{}/audio/speech", self.base_url.trim_end_matches('/'))
    }
}

pub struct OpenAiSpeech {
    agent: ureq::Agent,
    config: OpenAiConfig,
}

impl OpenAiSpeech {
    pub fn new(config: OpenAiConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .timeout_read(config.read_timeout)
            .build();
        Self { agent, config }
    }

    pub fn from_env() -> Self {
        Self::new(OpenAiConfig::from_env())
    }

    /// Sends the request and hands back the unread response body.
    pub fn speech(&self, request: &SpeechRequest<'_>) -> Result<Box<dyn Read + Send>, SpeechError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(SpeechError::MissingApiKey)?;
        let url = self.config.speech_url();
        debug!(
            "POST {url} model={} voice={} format={} input_chars={}",
            request.model,
            request.voice,
            request.response_format,
            request.input.chars().count()
        );

        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {api_key}"))
            .send_json(request)?;
        Ok(Box::new(response.into_reader()))
    }
}

impl SpeechSynthesizer for OpenAiSpeech {
    fn synthesize(&self, request: &SpeechRequest<'_>) -> color_eyre::Result<Box<dyn Read + Send>> {
        Ok(self.speech(request)?)
    }
}
