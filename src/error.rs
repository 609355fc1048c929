use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::Column;

/// Errors surfaced to the presentation shell.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The dataset could not be read. Fatal for the session.
    #[error("data unavailable ({path}): {reason}")]
    DataUnavailable { path: PathBuf, reason: String },

    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("column '{0}' is not numeric")]
    NotNumeric(Column),

    #[error("failed to export {path}: {reason}")]
    Export { path: PathBuf, reason: String },
}

impl DashboardError {
    /// Wrap an `anyhow` chain as `DataUnavailable`, keeping every context layer.
    pub fn data_unavailable(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        DashboardError::DataUnavailable {
            path: path.into(),
            reason: format!("{err:#}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
