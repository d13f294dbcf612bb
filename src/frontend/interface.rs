//! Capabilities the controller drives. A browser shell implements these over
//! the Web Speech, Clipboard and Fetch APIs; tests implement them with
//! scripted doubles.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::translate::{TranslateRequest, TranslateResponse};

/// Settings handed to a recognition engine when it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionSettings {
    pub lang: String,
    pub continuous: bool,
    pub interim_results: bool,
}

impl RecognitionSettings {
    /// One final utterance, no interim transcripts.
    pub fn single_utterance(lang: &str) -> Self {
        Self {
            lang: lang.to_string(),
            continuous: false,
            interim_results: false,
        }
    }
}

/// Events a recognition engine reports back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Transcript of the first alternative of the first result.
    Result(String),
    Error(String),
    End,
}

pub trait SpeechRecognizer {
    fn set_language(&mut self, lang: &str);

    fn start(&mut self) -> anyhow::Result<()>;

    fn stop(&mut self);
}

/// Builds recognition engines. Returns `None` when the platform has no
/// speech recognition at all.
pub trait RecognizerFactory {
    fn create(&mut self, settings: RecognitionSettings) -> Option<Box<dyn SpeechRecognizer>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    /// BCP 47 tag such as `hi-IN`.
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub voice: Option<Voice>,
    pub lang: String,
}

pub trait SpeechSynthesizer {
    /// Voices known so far; may be empty until the engine has loaded them.
    fn voices(&self) -> Vec<Voice>;

    /// Drops the current utterance and anything queued.
    fn cancel(&mut self);

    fn speak(&mut self, utterance: Utterance);
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Toast-style notifications.
pub trait Notifier {
    fn notify(&mut self, kind: NotificationKind, message: &str);
}

/// Errors reaching the translation proxy.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to translation proxy failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("translation proxy returned status {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Status { status: u16, message: Option<String> },
}

/// The network hop from the page to the proxy.
#[async_trait]
pub trait TranslateTransport: Send + Sync {
    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResponse, ClientError>;
}
