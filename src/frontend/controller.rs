use std::sync::Arc;
use tracing::{debug, info, warn};

use super::interface::{
    ClientError, Clipboard, NotificationKind, Notifier, RecognitionEvent, RecognitionSettings,
    RecognizerFactory, SpeechRecognizer, SpeechSynthesizer, TranslateTransport, Utterance, Voice,
};
use super::session::SessionState;
use crate::languages;
use crate::translate::{TranslateRequest, TranslateResponse};

/// Shown in the output box when a translation cannot be fetched.
pub const ERROR_PLACEHOLDER: &str = "⚠️ Error translating text.";
/// Locale used when no installed voice matches the target language.
pub const FALLBACK_LOCALE: &str = "en-US";

const MSG_VOICE_CAPTURED: &str = "🎙️ Voice captured!";
const MSG_COPIED: &str = "✅ Translation copied!";
const MSG_RECOGNITION_UNSUPPORTED: &str = "Speech recognition not supported in this browser.";

/// How responses of overlapping translate calls are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// Whichever response resolves last overwrites the output.
    #[default]
    LastResolvedWins,
    /// Responses to anything but the most recent request are dropped.
    LatestRequestWins,
}

/// Platform services handed to the controller at mount.
pub struct Capabilities {
    pub transport: Arc<dyn TranslateTransport>,
    pub recognition: Box<dyn RecognizerFactory>,
    pub synthesis: Box<dyn SpeechSynthesizer>,
    pub clipboard: Box<dyn Clipboard>,
    pub notifier: Box<dyn Notifier>,
}

/// A translate call that has been issued but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTranslation {
    pub id: u64,
    pub request: TranslateRequest,
}

/// Owns the session state and turns user actions into capability calls.
pub struct TranslationController {
    state: SessionState,
    caps: Capabilities,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    ordering: ResponseOrdering,
    last_request_id: u64,
    unsupported_notified: bool,
}

impl TranslationController {
    pub fn mount(caps: Capabilities) -> Self {
        Self::mount_with(caps, SessionState::default(), ResponseOrdering::default())
    }

    pub fn mount_with(caps: Capabilities, state: SessionState, ordering: ResponseOrdering) -> Self {
        let mut controller = Self {
            state,
            caps,
            recognizer: None,
            ordering,
            last_request_id: 0,
            unsupported_notified: false,
        };
        controller.on_voices_changed();
        controller.rebuild_recognizer();
        controller
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn can_translate(&self) -> bool {
        !self.state.loading
    }

    pub fn mic_available(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input = text.into();
    }

    /// Codes outside the language list are ignored.
    pub fn set_source_language(&mut self, code: &str) {
        if self.state.source_lang == code || !is_selectable("source", code) {
            return;
        }
        self.state.source_lang = code.to_string();
        self.rebuild_recognizer();
    }

    pub fn set_target_language(&mut self, code: &str) {
        if is_selectable("target", code) {
            self.state.target_lang = code.to_string();
        }
    }

    pub fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggled();
    }

    /// Refreshes the voice list; an empty list from the engine is ignored.
    pub fn on_voices_changed(&mut self) {
        let voices = self.caps.synthesis.voices();
        if !voices.is_empty() {
            debug!("Loaded {} synthesis voices", voices.len());
            self.state.voices = voices;
        }
    }

    // --- translate ---

    /// Runs a full translate action against the proxy.
    pub async fn translate(&mut self) {
        let pending = self.begin_translate();
        let transport = Arc::clone(&self.caps.transport);
        let result = transport.translate(&pending.request).await;
        self.complete_translate(pending.id, result);
    }

    pub fn begin_translate(&mut self) -> PendingTranslation {
        self.state.loading = true;
        self.last_request_id += 1;
        PendingTranslation {
            id: self.last_request_id,
            request: TranslateRequest::new(&self.state.input, &self.state.source_lang, &self.state.target_lang),
        }
    }

    pub fn complete_translate(&mut self, id: u64, result: Result<TranslateResponse, ClientError>) {
        if self.ordering == ResponseOrdering::LatestRequestWins && id != self.last_request_id {
            debug!("Dropping response {} superseded by {}", id, self.last_request_id);
            return;
        }

        self.state.output = match result {
            Ok(response) => response.translated_text,
            Err(e) => {
                warn!("Translation request {} failed: {}", id, e);
                ERROR_PLACEHOLDER.to_string()
            }
        };
        self.state.loading = false;
    }

    // --- text actions ---

    pub fn swap(&mut self) {
        let state = &mut self.state;
        std::mem::swap(&mut state.source_lang, &mut state.target_lang);
        state.input = std::mem::take(&mut state.output);
        if self.state.source_lang != self.state.target_lang {
            self.rebuild_recognizer();
        }
    }

    pub fn clear(&mut self) {
        self.state.input.clear();
    }

    pub fn copy(&mut self) {
        if self.state.output.is_empty() {
            return;
        }
        match self.caps.clipboard.write_text(&self.state.output) {
            Ok(()) => self.caps.notifier.notify(NotificationKind::Success, MSG_COPIED),
            Err(e) => self
                .caps
                .notifier
                .notify(NotificationKind::Error, &format!("Copy failed: {}", e)),
        }
    }

    // --- speech ---

    /// Reads the output aloud, replacing anything still playing.
    pub fn speak(&mut self) {
        if self.state.output.is_empty() {
            return;
        }
        let voice = select_voice(&self.state.voices, &self.state.target_lang).cloned();
        let lang = voice
            .as_ref()
            .map(|v| v.lang.clone())
            .unwrap_or_else(|| FALLBACK_LOCALE.to_string());
        let utterance = Utterance {
            text: self.state.output.clone(),
            voice,
            lang,
        };

        self.caps.synthesis.cancel();
        self.caps.synthesis.speak(utterance);
    }

    pub fn toggle_mic(&mut self) {
        let Some(recognizer) = self.recognizer.as_mut() else {
            self.notify_unsupported_once();
            return;
        };

        if self.state.listening {
            recognizer.stop();
            self.state.listening = false;
            return;
        }

        recognizer.set_language(&self.state.source_lang);
        match recognizer.start() {
            Ok(()) => {
                info!("Listening ({})", self.state.source_lang);
                self.state.listening = true;
            }
            Err(e) => {
                self.caps
                    .notifier
                    .notify(NotificationKind::Error, &format!("❌ Mic error: {}", e));
            }
        }
    }

    pub fn handle_recognition_event(&mut self, event: RecognitionEvent) {
        if !self.state.listening {
            debug!("Ignoring recognition event while idle: {:?}", event);
            return;
        }

        match event {
            RecognitionEvent::Result(transcript) => {
                append_transcript(&mut self.state.input, &transcript);
                self.caps.notifier.notify(NotificationKind::Success, MSG_VOICE_CAPTURED);
            }
            RecognitionEvent::Error(code) => {
                self.caps
                    .notifier
                    .notify(NotificationKind::Error, &format!("❌ Mic error: {}", code));
            }
            RecognitionEvent::End => {}
        }
        self.state.listening = false;
    }

    fn rebuild_recognizer(&mut self) {
        if let Some(mut old) = self.recognizer.take() {
            if self.state.listening {
                old.stop();
            }
        }
        self.state.listening = false;

        let settings = RecognitionSettings::single_utterance(&self.state.source_lang);
        self.recognizer = self.caps.recognition.create(settings);
        if self.recognizer.is_none() {
            self.notify_unsupported_once();
        }
    }

    fn notify_unsupported_once(&mut self) {
        if self.unsupported_notified {
            return;
        }
        self.unsupported_notified = true;
        self.caps
            .notifier
            .notify(NotificationKind::Error, MSG_RECOGNITION_UNSUPPORTED);
    }
}

fn is_selectable(side: &str, code: &str) -> bool {
    match languages::find(code) {
        Some(language) => {
            debug!("Selected {} language {} ({})", side, language.name, language.code);
            true
        }
        None => {
            warn!("Ignoring unknown {} language code {:?}", side, code);
            false
        }
    }
}

/// First voice whose tag starts with `target`, ignoring case. Best effort:
/// many languages have no installed voice at all.
pub fn select_voice<'a>(voices: &'a [Voice], target: &str) -> Option<&'a Voice> {
    let target = target.to_lowercase();
    voices
        .iter()
        .find(|v| v.lang.to_lowercase().starts_with(&target))
}

fn append_transcript(input: &mut String, transcript: &str) {
    if !input.is_empty() {
        input.push(' ');
    }
    input.push_str(transcript);
}
