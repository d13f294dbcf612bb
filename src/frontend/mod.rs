//! Page-side controller for the translator UI.

pub mod interface;
pub mod session;
pub mod controller;
pub mod proxy_client;

pub use controller::{Capabilities, ResponseOrdering, TranslationController, ERROR_PLACEHOLDER};
pub use interface::{
    ClientError, Clipboard, NotificationKind, Notifier, RecognitionEvent, RecognitionSettings,
    RecognizerFactory, SpeechRecognizer, SpeechSynthesizer, TranslateTransport, Utterance, Voice,
};
pub use proxy_client::ProxyClient;
pub use session::{SessionState, Theme};
