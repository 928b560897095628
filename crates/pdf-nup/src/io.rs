//! Document I/O
//!
//! Blocking parse and serialization work runs on the blocking pool; the
//! composition core itself never touches the filesystem.

use lopdf::Document;
use std::path::Path;

use crate::options::FileDetail;
use crate::types::{NupError, Result};

/// Load a single PDF document. Any failure maps to an open error
/// carrying the offending path.
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await.map_err(|e| NupError::Open {
        path: path.clone(),
        source: lopdf::Error::IO(e),
    })?;
    tokio::task::spawn_blocking(move || {
        Document::load_mem(&bytes).map_err(|source| NupError::Open { path, source })
    })
    .await?
}

/// Load every input document named by the manifest, in order
pub async fn load_inputs(details: &[FileDetail]) -> Result<Vec<Document>> {
    let mut documents = Vec::with_capacity(details.len());
    for detail in details {
        documents.push(load_pdf(&detail.file).await?);
    }
    Ok(documents)
}

/// Save the assembled document. Nothing is written unless serialization
/// of the whole document succeeds first.
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let save_path = path.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer).map_err(|e| NupError::Save {
            path: save_path,
            source: std::io::Error::other(e),
        })?;
        Ok::<_, NupError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|source| NupError::Save { path, source })
}
