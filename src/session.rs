//! The quiz session state machine and its scoring.
//!
//! A session starts in [`Mode::Testing`], where answers can be chosen and
//! changed. Advancing past the last question submits the attempt: the result
//! is computed once, the session switches to [`Mode::Reviewing`] and the
//! pointer goes back to the first question. Reviewing never reverts; answers
//! are locked and per-question [`Feedback`] becomes available.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{QuizError, Result};
use crate::models::{Question, QuizResult};

pub const NOT_ATTEMPTED: &str = "Not attempted";
pub const NO_EXPLANATION: &str = "No explanation available.";

/// Scores an attempt. Entries for indices past the question list are ignored.
pub fn score(questions: &[Question], answers: &BTreeMap<usize, usize>) -> QuizResult {
    let mut score = 0;
    let mut attempted = 0;

    for (index, question) in questions.iter().enumerate() {
        if let Some(&selected) = answers.get(&index) {
            attempted += 1;
            if selected == question.answer_index {
                score += 1;
            }
        }
    }

    QuizResult {
        score,
        attempted,
        total: questions.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Testing,
    Reviewing(QuizResult),
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Testing => "Test",
            Mode::Reviewing(_) => "Review",
        }
    }
}

/// What happened when the user asked for the next question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved,
    Submitted(QuizResult),
    /// Reviewing is over; the owner should leave the practice screen.
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextLabel {
    Next,
    Submit,
    Exit,
}

impl NextLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NextLabel::Next => "Next",
            NextLabel::Submit => "Submit Test",
            NextLabel::Exit => "Back to Subjects",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback<'a> {
    /// One-based question number.
    pub number: usize,
    pub correct: bool,
    pub your_answer: Option<&'a str>,
    pub correct_answer: &'a str,
    pub explanation: Option<&'a str>,
}

impl<'a> Feedback<'a> {
    pub fn verdict(&self) -> &'static str {
        if self.correct {
            "Correct"
        } else {
            "Incorrect"
        }
    }

    pub fn your_answer_label(&self) -> &'a str {
        self.your_answer.unwrap_or(NOT_ATTEMPTED)
    }

    pub fn explanation_label(&self) -> &'a str {
        self.explanation.unwrap_or(NO_EXPLANATION)
    }
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    answers: BTreeMap<usize, usize>,
    mode: Mode,
}

impl QuizSession {
    /// Starts a fresh attempt. An empty question list has nothing to test.
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuiz);
        }

        Ok(Self {
            questions,
            current: 0,
            answers: BTreeMap::new(),
            mode: Mode::Testing,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn result(&self) -> Option<QuizResult> {
        match self.mode {
            Mode::Testing => None,
            Mode::Reviewing(result) => Some(result),
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.mode, Mode::Reviewing(_))
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &BTreeMap<usize, usize> {
        &self.answers
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// The option recorded for the current question, if any.
    pub fn selected(&self) -> Option<usize> {
        self.answers.get(&self.current).copied()
    }

    /// `(question number, total)` for a "Question: n / total" line.
    pub fn progress(&self) -> (usize, usize) {
        (self.current + 1, self.questions.len())
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    pub fn can_retreat(&self) -> bool {
        self.current > 0
    }

    pub fn next_label(&self) -> NextLabel {
        match (self.is_last(), self.mode) {
            (false, _) => NextLabel::Next,
            (true, Mode::Testing) => NextLabel::Submit,
            (true, Mode::Reviewing(_)) => NextLabel::Exit,
        }
    }

    /// Records `option` for the current question, replacing any earlier
    /// choice. Ignored while reviewing or for an option the question lacks.
    pub fn select(&mut self, option: usize) -> bool {
        if self.is_locked() || option >= self.current_question().options.len() {
            return false;
        }

        self.answers.insert(self.current, option);
        tracing::debug!(question = self.current, option, "answer selected");
        true
    }

    pub fn advance(&mut self) -> Advance {
        if !self.is_last() {
            self.current += 1;
            return Advance::Moved;
        }

        match self.mode {
            Mode::Testing => {
                let result = score(&self.questions, &self.answers);
                self.mode = Mode::Reviewing(result);
                self.current = 0;
                tracing::info!(
                    score = result.score,
                    attempted = result.attempted,
                    total = result.total,
                    "attempt submitted"
                );
                Advance::Submitted(result)
            }
            Mode::Reviewing(_) => Advance::Exit,
        }
    }

    pub fn retreat(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn feedback(&self) -> Option<Feedback<'_>> {
        self.feedback_for(self.current)
    }

    /// Feedback for question `index`; only available while reviewing.
    pub fn feedback_for(&self, index: usize) -> Option<Feedback<'_>> {
        if !self.is_locked() {
            return None;
        }

        let question = self.questions.get(index)?;
        let selected = self.answers.get(&index).copied();

        Some(Feedback {
            number: index + 1,
            correct: selected == Some(question.answer_index),
            your_answer: selected.and_then(|s| question.option(s)),
            correct_answer: question.correct_option(),
            explanation: question.explanation(),
        })
    }
}
