use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use storage::AudioCache;

use crate::error::WelcomeAudioError;

/// Name used when the learner has not given one.
pub const DEFAULT_LEARNER_NAME: &str = "friend";
pub const WELCOME_VOICE: &str = "nova";
pub const WELCOME_FORMAT: &str = "wav";

/// Spoken greeting for `name`.
#[must_use]
pub fn welcome_script(name: &str) -> String {
    format!(
        "Welcome to Fraction Fun! Hey {name}, I'm so excited to learn fractions with you today! \
         Get ready for a super fun adventure with pizzas, games, and awesome rewards! Let's do this!"
    )
}

/// Text to speak and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: &'static str,
    pub format: &'static str,
}

/// Text-to-speech provider.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Render `request` to encoded audio bytes.
    ///
    /// # Errors
    ///
    /// Returns `WelcomeAudioError` when the provider is disabled or fails.
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, WelcomeAudioError>;
}

#[derive(Clone, Debug)]
pub struct SpeechConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl SpeechConfig {
    /// Read `FRACTION_TTS_*` variables; `None` when no API key is set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("FRACTION_TTS_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("FRACTION_TTS_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("FRACTION_TTS_MODEL").unwrap_or_else(|_| "gpt-4o-mini-tts".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// OpenAI-compatible `/audio/speech` client.
#[derive(Clone)]
pub struct OpenAiSpeech {
    client: Client,
    config: Option<SpeechConfig>,
}

impl OpenAiSpeech {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(SpeechConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<SpeechConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

#[derive(Debug, Serialize)]
struct SpeechPayload<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'a str,
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeech {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, WelcomeAudioError> {
        let config = self.config.as_ref().ok_or(WelcomeAudioError::Disabled)?;

        let url = format!("{}/audio/speech", config.base_url.trim_end_matches('/'));
        let payload = SpeechPayload {
            model: &config.model,
            voice: request.voice,
            input: &request.text,
            response_format: request.format,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WelcomeAudioError::HttpStatus(response.status()));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(WelcomeAudioError::EmptyResponse);
        }
        Ok(bytes.to_vec())
    }
}

/// Generated greeting plus whether it came from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeAudio {
    pub bytes: Vec<u8>,
    pub cached: bool,
}

/// Personalized welcome greetings, synthesized once per name and cached on disk.
#[derive(Clone)]
pub struct WelcomeAudioService {
    cache: AudioCache,
    speech: Arc<dyn SpeechSynthesizer>,
}

impl WelcomeAudioService {
    #[must_use]
    pub fn new(cache: AudioCache, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { cache, speech }
    }

    #[must_use]
    pub fn cache(&self) -> &AudioCache {
        &self.cache
    }

    /// Greeting audio for `name` (defaults to "friend").
    ///
    /// # Errors
    ///
    /// Returns `WelcomeAudioError` if the cache cannot be read or written, or
    /// the speech provider fails. Nothing is retried.
    pub async fn greeting(&self, name: Option<&str>) -> Result<WelcomeAudio, WelcomeAudioError> {
        // only an absent or empty name falls back; whitespace is spoken as given
        let name = name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_LEARNER_NAME);

        if let Some(bytes) = self.cache.load(name).await? {
            return Ok(WelcomeAudio {
                bytes,
                cached: true,
            });
        }

        let request = SpeechRequest {
            text: welcome_script(name),
            voice: WELCOME_VOICE,
            format: WELCOME_FORMAT,
        };
        let bytes = self.speech.synthesize(&request).await?;
        let path = self.cache.store(name, &bytes).await?;
        log::info!("generated welcome audio: {}", path.display());

        Ok(WelcomeAudio {
            bytes,
            cached: false,
        })
    }
}
