use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    /// The catalog or a question file could not be read.
    #[error("Failed to load {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not the JSON shape we expect.
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid question {} in {}: {reason}", .index + 1, .path.display())]
    InvalidQuestion {
        path: PathBuf,
        index: usize,
        reason: String,
    },

    #[error("The question file contains no questions")]
    EmptyQuiz,

    #[error("No topic file provided.")]
    MissingFile,

    #[error("Invalid answers: {0}")]
    InvalidAnswers(String),
}

pub type Result<T> = std::result::Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_question_is_reported_one_based() {
        let err = QuizError::InvalidQuestion {
            path: PathBuf::from("data/physics/ch1.json"),
            index: 2,
            reason: "needs at least 2 options".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid question 3 in data/physics/ch1.json: needs at least 2 options"
        );
    }

    #[test]
    fn missing_file_matches_placeholder_text() {
        assert_eq!(QuizError::MissingFile.to_string(), "No topic file provided.");
    }

    #[test]
    fn io_error_names_the_path() {
        let err = QuizError::Io {
            path: PathBuf::from("data/index.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("Failed to load data/index.json"));
    }
}
