//! Definition loading from the Actions workspace.

use std::path::{Component, Path, PathBuf};

use tower_lsp::lsp_types::Url;

use crate::error::LintError;
use crate::validation::TextDocument;

/// A definition file read from the workspace
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionFile {
    /// Name as given by the user, used in report headings
    pub name: String,
    /// Resolved location on disk
    pub path: PathBuf,
    pub content: String,
}

impl DefinitionFile {
    pub fn uri(&self) -> Result<Url, LintError> {
        Url::from_file_path(&self.path).map_err(|()| LintError::InvalidDocumentUri {
            path: self.path.clone(),
        })
    }

    /// Wrap the file contents for the language service
    pub fn to_document(&self) -> Result<TextDocument, LintError> {
        Ok(TextDocument::apidom(self.uri()?, self.content.clone()))
    }
}

/// Join `definition` onto `root`.
///
/// Root and prefix components of `definition` are dropped, so an absolute
/// definition path still lands inside the workspace.
pub fn resolve_definition_path(root: &Path, definition: &Path) -> PathBuf {
    let mut path = root.to_path_buf();
    for component in definition.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => path.push(other),
        }
    }
    path
}

/// Read a definition file as UTF-8 text
pub async fn load_definition(root: &Path, definition: &str) -> Result<DefinitionFile, LintError> {
    let path = resolve_definition_path(root, Path::new(definition));
    log::debug!("Reading definition file {:?}", path);

    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| LintError::ReadDefinition {
            path: path.clone(),
            source,
        })?;

    Ok(DefinitionFile {
        name: definition.to_string(),
        path,
        content,
    })
}
