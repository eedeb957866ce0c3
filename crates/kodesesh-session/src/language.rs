//! The closed set of languages a session can be switched to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Text shown in a brand-new buffer before any template is applied.
pub const PLACEHOLDER_CODE: &str = "// Start writing your code here!";

/// A supported execution language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    JavaScript,
    Python,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {0:?}")]
pub struct UnsupportedLanguage(pub String);

impl Language {
    pub const ALL: [Language; 2] = [Language::JavaScript, Language::Python];

    /// Wire name, as carried in `languageUpdate` payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::Python => "py",
        }
    }

    /// The file the buffer is presented as. Always derived, never stored.
    pub fn file_name(self) -> String {
        format!("main.{}", self.extension())
    }

    pub fn default_template(self) -> &'static str {
        match self {
            Language::JavaScript => "console.log(\"Hello World\");\n",
            Language::Python => "print(\"Hello World\")\n\n",
        }
    }

    /// Runtime name understood by the execution service.
    pub fn service_name(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python3",
        }
    }

    pub fn service_version(self) -> &'static str {
        match self {
            Language::JavaScript => "18.x",
            Language::Python => "3.10.0",
        }
    }

    /// Whether `code` is untouched starter text for this language.
    pub fn is_starter_code(self, code: &str) -> bool {
        code == self.default_template() || code == PLACEHOLDER_CODE
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names_only() {
        assert_eq!("javascript".parse::<Language>(), Ok(Language::JavaScript));
        assert_eq!("python".parse::<Language>(), Ok(Language::Python));
        assert!("Python".parse::<Language>().is_err());
        assert!("rust".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn file_name_follows_extension() {
        assert_eq!(Language::JavaScript.file_name(), "main.js");
        assert_eq!(Language::Python.file_name(), "main.py");
    }

    #[test]
    fn service_names_map_python_to_python3() {
        assert_eq!(Language::JavaScript.service_name(), "javascript");
        assert_eq!(Language::Python.service_name(), "python3");
    }

    #[test]
    fn starter_code_includes_placeholder() {
        assert!(Language::JavaScript.is_starter_code(PLACEHOLDER_CODE));
        assert!(Language::Python.is_starter_code("print(\"Hello World\")\n\n"));
        assert!(!Language::Python.is_starter_code("console.log(\"Hello World\");\n"));
        assert!(!Language::JavaScript.is_starter_code("x=1"));
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&Language::JavaScript).unwrap(),
            "\"javascript\""
        );
        let lang: Language = serde_json::from_str("\"python\"").unwrap();
        assert_eq!(lang, Language::Python);
    }
}
