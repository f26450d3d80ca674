//! Error types for folio.
//!
//! The navigation engine itself has no recoverable I/O: bad or badly timed
//! input is reported as a [`crate::model::Rejection`], never as an error.
//! What remains are startup failures:
//!
//! - [`InitError`] - a component could not find its host anchors. Recorded
//!   per component; siblings keep working.
//! - [`AppError`] - fatal errors of the terminal preview binary (config,
//!   logging, terminal I/O).

use super::anchor::{Anchor, Component};
use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// A component disabled itself during startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    /// A required anchor is absent from the host surface.
    #[error("{component} disabled: missing {anchor}")]
    MissingAnchor {
        /// Component that was disabled.
        component: Component,
        /// First anchor found missing.
        anchor: Anchor,
    },
}

impl InitError {
    /// The component this error disabled.
    pub fn component(&self) -> Component {
        match self {
            InitError::MissingAnchor { component, .. } => *component,
        }
    }
}

/// Top-level error of the `folio` binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal setup, rendering or event polling failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DetailKind;

    #[test]
    fn missing_anchor_message_names_component_and_anchor() {
        let err = InitError::MissingAnchor {
            component: Component::DetailOverlay(DetailKind::Design),
            anchor: Anchor::OverlayClose(DetailKind::Design),
        };
        assert_eq!(
            err.to_string(),
            "design detail overlay disabled: missing design overlay close control"
        );
        assert_eq!(err.component(), Component::DetailOverlay(DetailKind::Design));
    }

    #[test]
    fn io_error_converts_to_terminal_error() {
        let err: AppError = std::io::Error::other("broken pipe").into();
        assert!(matches!(err, AppError::Terminal(_)));
        assert!(err.to_string().contains("broken pipe"));
    }
}
