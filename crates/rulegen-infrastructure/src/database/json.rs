//! JSON-file-backed linguistic database

use std::path::{Path, PathBuf};

use rulegen_domain::{Error, FeatureForm, LinguisticDatabase, Result};
use tracing::info;

use super::memory::InMemoryDatabase;

/// A database exported to a JSON file, held in memory once loaded
#[derive(Debug, Clone)]
pub struct JsonLinguisticDatabase {
    path: PathBuf,
    data: InMemoryDatabase,
}

impl JsonLinguisticDatabase {
    /// Read and validate a database file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let data: InMemoryDatabase = serde_json::from_str(&text)?;
        data.validate().map_err(|e| match e {
            Error::Database { message } => {
                Error::database(format!("{}: {message}", path.display()))
            }
            other => other,
        })?;
        info!(
            path = %path.display(),
            project = %data.project_name,
            categories = data.categories.len(),
            "Loaded linguistic database"
        );
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &InMemoryDatabase {
        &self.data
    }
}

impl LinguisticDatabase for JsonLinguisticDatabase {
    fn project_name(&self) -> &str {
        self.data.project_name()
    }

    fn categories(&self) -> Vec<String> {
        self.data.categories()
    }

    fn subcategories(&self, category: &str) -> Vec<String> {
        self.data.subcategories(category)
    }

    fn possible_feature_values(&self, category: Option<&str>, label: &str) -> Vec<String> {
        self.data.possible_feature_values(category, label)
    }

    fn lemmas_for_feature(&self, category: &str, label: &str) -> Vec<FeatureForm> {
        self.data.lemmas_for_feature(category, label)
    }

    fn affix_glosses_for_feature(&self, category: &str, label: &str) -> Vec<FeatureForm> {
        self.data.affix_glosses_for_feature(category, label)
    }
}
