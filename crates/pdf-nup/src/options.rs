use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::{NupError, NupMode, Result};

/// One entry of the JSON file manifest: a source document and the layout
/// mode its pages are composed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDetail {
    pub file: PathBuf,
    #[serde(default)]
    pub nup: NupMode,
}

impl FileDetail {
    pub fn new(file: impl Into<PathBuf>, nup: NupMode) -> Self {
        Self {
            file: file.into(),
            nup,
        }
    }

    /// Section title shown in the TOC and the outline: the file name
    /// without its extension.
    pub fn title(&self) -> String {
        self.file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.display().to_string())
    }
}

/// Load a manifest (a JSON array of [`FileDetail`]) from disk
pub async fn load_manifest(path: impl AsRef<Path>) -> Result<Vec<FileDetail>> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    serde_json::from_slice(&bytes).map_err(|source| NupError::Decode { path, source })
}

/// Full configuration of one assembly run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// Input documents, in the order their sections appear in the output
    pub inputs: Vec<FileDetail>,
    /// Optional cover document; also gates TOC generation
    pub cover: Option<PathBuf>,
    /// Output file path
    pub output: PathBuf,
}

impl AssemblyOptions {
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(NupError::NoInputs);
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_round_trip() {
        let details = vec![
            FileDetail::new("slides/intro.pdf", NupMode::Six),
            FileDetail::new("slides/details.pdf", NupMode::Two),
        ];
        let json = serde_json::to_string(&details).unwrap();
        let parsed: Vec<FileDetail> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, details);
    }

    #[test]
    fn test_manifest_mode_defaults_to_six() {
        let parsed: Vec<FileDetail> =
            serde_json::from_str(r#"[{"file": "a.pdf"}, {"file": "b.pdf", "nup": "two"}]"#)
                .unwrap();
        assert_eq!(parsed[0].nup, NupMode::Six);
        assert_eq!(parsed[1].nup, NupMode::Two);
    }

    #[test]
    fn test_title_strips_extension() {
        let detail = FileDetail::new("lectures/03 memory.pdf", NupMode::One);
        assert_eq!(detail.title(), "03 memory");
    }

    #[test]
    fn test_validate_requires_inputs() {
        let options = AssemblyOptions {
            inputs: Vec::new(),
            cover: None,
            output: PathBuf::from("out.pdf"),
        };
        assert!(matches!(options.validate(), Err(NupError::NoInputs)));
    }
}
