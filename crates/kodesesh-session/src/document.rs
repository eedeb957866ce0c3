//! The shared code buffer and its selected language.

use crate::language::Language;

/// Code text plus language. The file name is always derived from the
/// language and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedDocument {
    code: String,
    language: Language,
}

impl SharedDocument {
    /// A document holding the default template for `language`.
    pub fn new(language: Language) -> Self {
        Self {
            code: language.default_template().to_string(),
            language,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// `main.<ext>` for the current language.
    pub fn file_name(&self) -> String {
        self.language.file_name()
    }

    /// Overwrite the code. Returns `true` if the text changed.
    pub fn replace_code(&mut self, code: String) -> bool {
        if self.code == code {
            return false;
        }
        self.code = code;
        true
    }

    /// Switch language. Starter code for the previous language (or the
    /// placeholder) is swapped for the new language's template; anything
    /// else is kept. Returns `false` when `language` is already current.
    pub fn switch_language(&mut self, language: Language) -> bool {
        if language == self.language {
            return false;
        }
        if self.language.is_starter_code(&self.code) {
            self.code = language.default_template().to_string();
        }
        self.language = language;
        true
    }
}

impl Default for SharedDocument {
    fn default() -> Self {
        Self::new(Language::default())
    }
}
