use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NupError {
    #[error("could not open file at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },
    #[error("could not decode file at {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not write to file at {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No input documents")]
    NoInputs,
}

pub type Result<T> = std::result::Result<T, NupError>;

/// How many source pages land on one output page.
///
/// `Full` and `One` both place a single page; `Full` uses the whole
/// canvas with no border, `One` insets the page and strokes a border
/// around the scaled content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NupMode {
    /// One page on the uninset canvas, no border
    Full,
    /// One page, inset with border
    One,
    /// Two pages stacked top/bottom
    Two,
    /// Six pages in a 2 columns x 3 rows grid
    #[default]
    Six,
}

impl NupMode {
    /// Number of source pages consumed per output page
    pub fn pages_per_sheet(self) -> usize {
        match self {
            NupMode::Full | NupMode::One => 1,
            NupMode::Two => 2,
            NupMode::Six => 6,
        }
    }
}
