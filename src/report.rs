//! JSON records written to stdout.

use crate::lang::Language;
use crate::scan::Match;
use serde::Serialize;
use std::path::Path;

/// Message for a found file whose declaration could not be extracted again.
pub const DECLARATION_NOT_FOUND: &str = "Class or method not found in folder";

/// The single record printed for a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Found { filepath: String, source: String },
    Error { error: String },
}

impl Report {
    pub fn found(path: &Path, source: impl Into<String>) -> Self {
        Report::Found {
            filepath: path.to_string_lossy().into_owned(),
            source: source.into(),
        }
    }

    /// No file under the root declares the name.
    pub fn no_matching_file(language: Language) -> Self {
        Report::Error {
            error: format!("No matching {} file found", language.display_name()),
        }
    }

    pub fn declaration_not_found() -> Self {
        Report::Error {
            error: DECLARATION_NOT_FOUND.to_string(),
        }
    }

    /// Report for a single-pass search.
    pub fn from_search(result: Option<&Match>, language: Language) -> Self {
        match result {
            Some(m) => Report::found(&m.path, m.source.as_str()),
            None => Report::no_matching_file(language),
        }
    }

    /// Report for a separate find step followed by an extract step.
    ///
    /// A file that was found but yielded no text maps to
    /// [`DECLARATION_NOT_FOUND`].
    pub fn from_lookup(file: Option<&Path>, extracted: Option<String>, language: Language) -> Self {
        match (file, extracted) {
            (Some(path), Some(source)) => Report::found(path, source),
            (Some(_), None) => Report::declaration_not_found(),
            (None, _) => Report::no_matching_file(language),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Report::Found { .. })
    }

    /// Serialize as a single JSON line.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ts::DeclarationKind;
    use std::path::PathBuf;

    #[test]
    fn found_record_has_two_fields() {
        let report = Report::found(Path::new("/src/Foo.java"), "class Foo {\n  \"x\"\n}");
        let json = report.to_json().unwrap();

        assert!(!json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["filepath"], "/src/Foo.java");
        assert_eq!(object["source"], "class Foo {\n  \"x\"\n}");
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            Report::no_matching_file(Language::Java).to_json().unwrap(),
            r#"{"error":"No matching Java file found"}"#
        );
        assert_eq!(
            Report::no_matching_file(Language::CSharp).to_json().unwrap(),
            r#"{"error":"No matching C# file found"}"#
        );
        assert_eq!(
            Report::declaration_not_found().to_json().unwrap(),
            r#"{"error":"Class or method not found in folder"}"#
        );
    }

    #[test]
    fn from_search() {
        let m = Match {
            path: PathBuf::from("/tree/A.java"),
            kind: DeclarationKind::Type,
            line: 1,
            source: "class A {}".to_string(),
        };

        let report = Report::from_search(Some(&m), Language::Java);
        assert!(report.is_found());
        assert_eq!(report, Report::found(Path::new("/tree/A.java"), "class A {}"));

        let report = Report::from_search(None, Language::Go);
        assert_eq!(report, Report::no_matching_file(Language::Go));
    }

    #[test]
    fn from_lookup_distinguishes_failures() {
        let path = Path::new("/tree/A.java");

        assert!(Report::from_lookup(Some(path), Some("class A {}".into()), Language::Java).is_found());
        assert_eq!(
            Report::from_lookup(Some(path), None, Language::Java),
            Report::declaration_not_found()
        );
        assert_eq!(
            Report::from_lookup(None, None, Language::Java),
            Report::no_matching_file(Language::Java)
        );
    }
}
