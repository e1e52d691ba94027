use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeSitterError {
    #[error("failed to set {language} grammar for parser")]
    LanguageSet { language: &'static str },

    #[error("failed to parse source code")]
    ParseFailed,

    #[error("syntax error detected at line {line} (byte {byte_start}..{byte_end})")]
    SyntaxError {
        byte_start: usize,
        byte_end: usize,
        line: usize,
    },

    #[error("multiple syntax errors detected: {count} ERROR nodes")]
    MultipleSyntaxErrors { count: usize },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
