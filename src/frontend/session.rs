use super::interface::Voice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Everything the page keeps between user actions. Lives as long as the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub input: String,
    pub output: String,
    pub source_lang: String,
    pub target_lang: String,
    pub loading: bool,
    pub theme: Theme,
    pub listening: bool,
    pub voices: Vec<Voice>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            source_lang: "en".to_string(),
            target_lang: "hi".to_string(),
            loading: false,
            theme: Theme::default(),
            listening: false,
            voices: Vec::new(),
        }
    }
}
