use serde::Serialize;

/// Entry in the language selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// Languages offered for both source and target.
pub const LANGUAGES: &[Language] = &[
    Language { code: "af", name: "Afrikaans" },
    Language { code: "ar", name: "Arabic" },
    Language { code: "bn", name: "Bengali" },
    Language { code: "bg", name: "Bulgarian" },
    Language { code: "zh", name: "Chinese" },
    Language { code: "hr", name: "Croatian" },
    Language { code: "cs", name: "Czech" },
    Language { code: "da", name: "Danish" },
    Language { code: "nl", name: "Dutch" },
    Language { code: "en", name: "English" },
    Language { code: "fi", name: "Finnish" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "el", name: "Greek" },
    Language { code: "gu", name: "Gujarati" },
    Language { code: "he", name: "Hebrew" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "hu", name: "Hungarian" },
    Language { code: "id", name: "Indonesian" },
    Language { code: "it", name: "Italian" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "kn", name: "Kannada" },
    Language { code: "ko", name: "Korean" },
    Language { code: "ms", name: "Malay" },
    Language { code: "ml", name: "Malayalam" },
    Language { code: "mr", name: "Marathi" },
    Language { code: "ne", name: "Nepali" },
    Language { code: "no", name: "Norwegian" },
    Language { code: "fa", name: "Persian" },
    Language { code: "pl", name: "Polish" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "pa", name: "Punjabi" },
    Language { code: "ro", name: "Romanian" },
    Language { code: "ru", name: "Russian" },
    Language { code: "sr", name: "Serbian" },
    Language { code: "es", name: "Spanish" },
    Language { code: "sw", name: "Swahili" },
    Language { code: "sv", name: "Swedish" },
    Language { code: "ta", name: "Tamil" },
    Language { code: "te", name: "Telugu" },
    Language { code: "th", name: "Thai" },
    Language { code: "tr", name: "Turkish" },
    Language { code: "uk", name: "Ukrainian" },
    Language { code: "ur", name: "Urdu" },
    Language { code: "vi", name: "Vietnamese" },
];

pub fn find(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<_> = LANGUAGES.iter().map(|l| l.code).collect();
        assert_eq!(codes.len(), LANGUAGES.len());
    }

    #[test]
    fn default_pair_is_listed() {
        assert_eq!(find("en").map(|l| l.name), Some("English"));
        assert_eq!(find("hi").map(|l| l.name), Some("Hindi"));
        assert!(find("xx").is_none());
    }
}
