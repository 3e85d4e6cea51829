use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{QuizError, Result};
use crate::models::{Catalog, Question};

pub const CATALOG_PATH: &str = "data/index.json";

/// Reads JSON documents relative to a site root.
///
/// The catalog lives at `<root>/data/index.json` and the `file` of each topic
/// is resolved against the same root.
#[derive(Debug, Clone)]
pub struct Loader {
    root: PathBuf,
}

impl Loader {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, file: &str) -> PathBuf {
        let path = Path::new(file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = self.resolve(CATALOG_PATH);
        let catalog: Catalog = read_json(&path)?;
        tracing::info!(
            path = %path.display(),
            subjects = catalog.subjects.len(),
            topics = catalog.topic_count(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    pub fn load_questions(&self, file: &str) -> Result<Vec<Question>> {
        let path = self.resolve(file);
        let questions: Vec<Question> = read_json(&path)?;

        for (index, question) in questions.iter().enumerate() {
            question
                .validate()
                .map_err(|reason| QuizError::InvalidQuestion {
                    path: path.clone(),
                    index,
                    reason,
                })?;
        }

        tracing::info!(
            path = %path.display(),
            questions = questions.len(),
            "loaded question file"
        );
        Ok(questions)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|source| {
        tracing::warn!(path = %path.display(), error = %source, "read failed");
        QuizError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    serde_json::from_str(&text).map_err(|source| {
        tracing::warn!(path = %path.display(), error = %source, "parse failed");
        QuizError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })
}
