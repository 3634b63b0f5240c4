//! Error handling for the Breakscreen designer.
//!
//! Two failure classes exist in the editing engine:
//! - Structural defects (a concrete render port cannot attach to its host
//!   surface): raised at construction time, not recoverable.
//! - Command failures (a widget a command targets has vanished, an id is
//!   already taken): propagated to the caller so the command manager can
//!   restore its stacks before rethrowing.
//!
//! Invalid operation *attempts* (grouping a single widget, pasting an empty
//! clipboard) are not errors: they are logged warnings and silent no-ops.

use thiserror::Error;

/// Designer error type.
#[derive(Error, Debug, Clone)]
pub enum DesignerError {
    /// The host surface required by a render port is missing or unusable.
    /// Raised at port construction time; fail fast, not recoverable.
    #[error("structural defect: {message}")]
    Structural {
        /// What was missing or unusable.
        message: String,
    },

    /// A widget id a command or accessor targets is not in the collection.
    #[error("widget not found: {id}")]
    WidgetNotFound {
        /// The missing widget id.
        id: String,
    },

    /// An insert would overwrite a live widget.
    #[error("duplicate widget id: {id}")]
    DuplicateId {
        /// The colliding widget id.
        id: String,
    },

    /// A command's apply or undo failed partway.
    #[error("command '{description}' failed: {reason}")]
    CommandFailed {
        /// The command's human-readable label.
        description: String,
        /// Why it failed.
        reason: String,
    },
}

/// Convenience result alias for designer operations.
pub type Result<T> = std::result::Result<T, DesignerError>;
