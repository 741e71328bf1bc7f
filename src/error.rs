use miette::{Diagnostic, SourceSpan};
use std::{
    error::Error,
    fmt::{Display, Formatter, Result},
    path::PathBuf,
};

#[derive(Debug, Diagnostic)]
pub enum StatuslineError {
    #[diagnostic(
        code(statusline::color),
        help("colors are written as six hex digits, e.g. #1E1E2E")
    )]
    InvalidColorFormat {
        #[source_code]
        src: String,
        #[label("not a valid hex color")]
        err_span: SourceSpan,
        msg: String,
    },

    #[diagnostic(code(statusline::config::missing))]
    MissingConfigSection {
        section: String,
        #[source_code]
        src: String,
        #[label("section expected in this document")]
        err_span: SourceSpan,
    },

    #[diagnostic(code(statusline::config::parse))]
    Parse {
        path: PathBuf,
        #[source_code]
        src: String,
        #[label("parse error here")]
        err_span: SourceSpan,
        msg: String,
    },

    #[diagnostic(code(statusline::io))]
    Io {
        path: PathBuf,
        #[source_code]
        src: String,
        #[label("io error occurred here")]
        err_span: SourceSpan,
        msg: String,
    },

    #[diagnostic(code(statusline::command))]
    ExternalCommand {
        #[source_code]
        src: String,
        #[label("command failed")]
        err_span: SourceSpan,
        msg: String,
    },
}

pub type StatuslineResult<T> = miette::Result<T>;

impl Display for StatuslineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            StatuslineError::InvalidColorFormat { msg, .. } => {
                write!(f, "Invalid color format: {}", msg)
            }
            StatuslineError::MissingConfigSection { section, .. } => {
                write!(f, "Missing config section: {}", section)
            }
            StatuslineError::Parse { path, msg, .. } => {
                write!(f, "Parse error in {}: {}", path.display(), msg)
            }
            StatuslineError::Io { path, msg, .. } => {
                write!(f, "IO error on {}: {}", path.display(), msg)
            }
            StatuslineError::ExternalCommand { msg, .. } => {
                write!(f, "External command failed: {}", msg)
            }
        }
    }
}

impl Error for StatuslineError {}

impl StatuslineError {
    pub fn invalid_color(
        src: impl Into<String>,
        err_span: impl Into<SourceSpan>,
        msg: impl Into<String>,
    ) -> Self {
        Self::InvalidColorFormat {
            src: src.into(),
            err_span: err_span.into(),
            msg: msg.into(),
        }
    }

    pub fn missing_section(section: impl Into<String>, src: impl Into<String>) -> Self {
        Self::MissingConfigSection {
            section: section.into(),
            src: src.into(),
            err_span: (0, 0).into(),
        }
    }

    pub fn parse(
        path: impl Into<PathBuf>,
        src: impl Into<String>,
        err_span: impl Into<SourceSpan>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            src: src.into(),
            err_span: err_span.into(),
            msg: msg.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        let path = path.into();
        Self::Io {
            src: path.display().to_string(),
            err_span: (0, 0).into(),
            path,
            msg: msg.into(),
        }
    }

    pub fn external_command(command: impl Into<String>, msg: impl Into<String>) -> Self {
        let src = command.into();
        let err_span = (0, src.len());
        Self::ExternalCommand {
            src,
            err_span: err_span.into(),
            msg: msg.into(),
        }
    }

    /// Builds a [`StatuslineError::Parse`] from a YAML error, pointing the
    /// label at the reported location when there is one.
    pub fn yaml(path: impl Into<PathBuf>, src: impl Into<String>, err: &serde_yaml::Error) -> Self {
        let src = src.into();
        let offset = err.location().map_or(0, |loc| loc.index().min(src.len()));
        Self::parse(path, src, (offset, 0), err.to_string())
    }
}
