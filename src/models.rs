use serde::{Deserialize, Serialize};

pub const DEFAULT_SUBJECT: &str = "Subject";
pub const DEFAULT_CHAPTER: &str = "Topic";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub subjects: Vec<Subject>,
}

impl Catalog {
    /// Flattens subjects into one entry per topic, keeping catalog order.
    pub fn entries(&self) -> Vec<TopicEntry> {
        self.subjects
            .iter()
            .flat_map(|subject| {
                subject.topics.iter().map(move |topic| TopicEntry {
                    subject: subject.name.clone(),
                    name: topic.name.clone(),
                    file: topic.file.clone(),
                })
            })
            .collect()
    }

    pub fn topic_count(&self) -> usize {
        self.subjects.iter().map(|s| s.topics.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    #[serde(default)]
    pub topics: Vec<TopicRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRef {
    pub name: String,
    pub file: String,
}

// A topic together with the subject it is listed under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicEntry {
    pub subject: String,
    pub name: String,
    pub file: String,
}

impl TopicEntry {
    pub fn params(&self) -> PageParams {
        PageParams {
            file: Some(self.file.clone()),
            subject: self.subject.clone(),
            chapter: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    #[serde(rename = "q")]
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(rename = "answerIndex")]
    pub answer_index: usize,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Question {
    pub fn validate(&self) -> Result<(), String> {
        if self.options.len() < 2 {
            return Err(format!(
                "needs at least 2 options, found {}",
                self.options.len()
            ));
        }
        if self.answer_index >= self.options.len() {
            return Err(format!(
                "answerIndex {} is out of range for {} options",
                self.answer_index,
                self.options.len()
            ));
        }
        Ok(())
    }

    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    pub fn correct_option(&self) -> &str {
        self.option(self.answer_index).unwrap_or_default()
    }

    /// Empty explanations count as missing.
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref().filter(|e| !e.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub score: usize,
    pub attempted: usize,
    pub total: usize,
}

impl QuizResult {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.score as f64 / self.total as f64) * 100.0
        }
    }
}

// What the practice screen is opened with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageParams {
    pub file: Option<String>,
    pub subject: String,
    pub chapter: String,
}

impl PageParams {
    pub fn new(file: Option<String>, subject: Option<String>, chapter: Option<String>) -> Self {
        Self {
            file: file.filter(|f| !f.is_empty()),
            subject: subject
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            chapter: chapter
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CHAPTER.to_string()),
        }
    }
}

// JSON output wrapper for CLI
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}
