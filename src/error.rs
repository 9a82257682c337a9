//! Error types for declaration-file translation

use thiserror::Error;

use crate::ast::SyntaxKind;

/// Source location information for error messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: Option<String>,
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Everything that can abort a translation.
///
/// Every variant is fatal for the file being translated: no partial
/// document is produced.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The declaration file could not be parsed.
    #[error("SyntaxError: {message} at {location}")]
    Syntax {
        message: String,
        location: SourceLocation,
    },

    /// A type position held a node kind the evaluator has no mapping for.
    #[error("unrecognized type expression: {kind}")]
    UnrecognizedType { kind: SyntaxKind },

    /// A container held a declaration kind the walker has no arm for.
    #[error("unknown declaration kind: {kind}")]
    UnknownDeclaration { kind: SyntaxKind },

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TranslateError {
    pub fn syntax_error_in(
        file: Option<&str>,
        message: impl Into<String>,
        line: u32,
        column: u32,
    ) -> Self {
        TranslateError::Syntax {
            message: message.into(),
            location: SourceLocation {
                file: file.map(str::to_string),
                line,
                column,
            },
        }
    }

    pub fn unrecognized_type(kind: SyntaxKind) -> Self {
        TranslateError::UnrecognizedType { kind }
    }

    pub fn unknown_declaration(kind: SyntaxKind) -> Self {
        TranslateError::UnknownDeclaration { kind }
    }

    /// The offending node kind, for the two tree-walk failures.
    pub fn kind(&self) -> Option<SyntaxKind> {
        match self {
            TranslateError::UnrecognizedType { kind }
            | TranslateError::UnknownDeclaration { kind } => Some(*kind),
            TranslateError::Syntax { .. } | TranslateError::Serialize(_) => None,
        }
    }
}
