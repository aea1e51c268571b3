//! Error types with rich diagnostics using miette
//!
//! Path and attribute errors carry the offending text and a span into it.
//! Geometric degeneracies never surface here: they are resolved by fallbacks
//! where they occur.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (element tag and attribute, or "<path>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Path Errors
// ============================================================================

/// Errors raised while interpreting path data
#[derive(Error, Diagnostic, Debug)]
pub enum PathError {
    #[error("invalid number: {token:?}")]
    #[diagnostic(code(cadpath::path::invalid_number))]
    InvalidNumber {
        token: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a number")]
        span: SourceSpan,
    },

    #[error("command '{command}' is missing an argument")]
    #[diagnostic(code(cadpath::path::missing_argument))]
    MissingArgument {
        command: char,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a number here")]
        span: SourceSpan,
    },

    #[error("expected a path command")]
    #[diagnostic(
        code(cadpath::path::expected_command),
        help("path data must start with a moveto command such as `M 0 0`")
    )]
    ExpectedCommand {
        #[source_code]
        src: NamedSource<String>,
        #[label("number without a command")]
        span: SourceSpan,
    },
}

// ============================================================================
// Attribute Errors
// ============================================================================

/// Errors in declarative attributes (transform lists, styles, lengths, point lists)
#[derive(Error, Diagnostic, Debug)]
pub enum AttributeError {
    #[error("malformed {attribute} attribute")]
    #[diagnostic(code(cadpath::attribute::syntax))]
    Syntax {
        attribute: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("invalid number in {attribute} attribute: {value:?}")]
    #[diagnostic(code(cadpath::attribute::invalid_number))]
    InvalidNumber {
        attribute: String,
        value: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("on this element")]
        span: SourceSpan,
    },
}

// ============================================================================
// Import Errors
// ============================================================================

/// Errors that abandon an import. No partial document is ever published.
#[derive(Error, Diagnostic, Debug)]
pub enum ImportError {
    #[error("not a well-formed XML document")]
    #[diagnostic(code(cadpath::import::xml))]
    Xml(#[from] roxmltree::Error),

    #[error("root element is <{found}>, not <svg>")]
    #[diagnostic(code(cadpath::import::not_svg))]
    NotSvg { found: String },

    #[error("input is not valid UTF-8")]
    #[diagnostic(code(cadpath::import::encoding))]
    Encoding(#[from] std::str::Utf8Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Attribute(#[from] AttributeError),

    #[error("invalid import option: {0}")]
    #[diagnostic(code(cadpath::import::options))]
    Options(#[from] NumericError),

    #[error("CAD codec failed: {message}")]
    #[diagnostic(code(cadpath::import::codec))]
    Codec { message: String },

    #[error("conversion unsuccessful ({} readers tried)", attempts.len())]
    #[diagnostic(
        code(cadpath::import::unsupported),
        help("every reader rejected the file; see `attempts` for each reason")
    )]
    Unsupported { attempts: Vec<Attempt> },
}

/// One failed reader in an import fold
#[derive(Debug)]
pub struct Attempt {
    pub reader: &'static str,
    pub error: Box<ImportError>,
}

impl ImportError {
    /// Convenience for codec adapters.
    pub fn codec(message: impl Into<String>) -> Self {
        ImportError::Codec {
            message: message.into(),
        }
    }
}
