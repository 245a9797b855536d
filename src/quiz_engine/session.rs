//! Playing a rendered quiz back one question at a time.
//!
//! The engine itself is stateless; this is the bookkeeping a front-end
//! needs on top of it: current index, whether the current question has been
//! answered, what was picked, and the running score.

use serde::{Deserialize, Serialize};

use crate::quiz_engine::{
    helpers,
    models::{Language, Quiz, RenderedQuestion},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    InProgress,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    /// The current question already has an answer; nothing changed.
    AlreadyAnswered,
    /// No question left to answer.
    Finished,
}

/// 1-based position for "question 3 of 10" displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResults {
    pub score: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent; 0 for an empty quiz.
    pub percentage: u32,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    questions: Vec<RenderedQuestion>,
    current_index: usize,
    answered: bool,
    selected_answer: Option<String>,
    score: usize,
    phase: SessionPhase,
}

impl QuizSession {
    pub fn new(questions: Vec<RenderedQuestion>) -> Self {
        let phase = if questions.is_empty() { SessionPhase::Finished } else { SessionPhase::InProgress };
        Self {
            questions,
            current_index: 0,
            answered: false,
            selected_answer: None,
            score: 0,
            phase,
        }
    }

    pub fn from_quiz(quiz: Quiz) -> Self {
        Self::new(quiz.questions)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    pub fn questions(&self) -> &[RenderedQuestion] {
        &self.questions
    }

    pub fn current(&self) -> Option<&RenderedQuestion> {
        match self.phase {
            SessionPhase::InProgress => self.questions.get(self.current_index),
            SessionPhase::Finished   => None,
        }
    }

    /// Whether `answer` is right for the current question.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.current().is_some_and(|q| q.correct_answer == answer)
    }

    /// Record the learner's pick. Only the first pick per question counts.
    pub fn select_answer(&mut self, answer: &str) -> AnswerOutcome {
        if self.current().is_none() {
            return AnswerOutcome::Finished;
        }
        if self.answered {
            return AnswerOutcome::AlreadyAnswered;
        }

        let correct = self.is_correct(answer);
        self.answered = true;
        self.selected_answer = Some(answer.to_string());
        if correct {
            self.score += 1;
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect
        }
    }

    /// Move to the next question, or finish after the last one.
    pub fn advance(&mut self) -> SessionPhase {
        if self.phase == SessionPhase::InProgress {
            if self.current_index + 1 < self.questions.len() {
                self.current_index += 1;
                self.answered = false;
                self.selected_answer = None;
            } else {
                self.phase = SessionPhase::Finished;
            }
        }
        self.phase
    }

    pub fn progress(&self) -> Progress {
        let total = self.questions.len();
        Progress { current: (self.current_index + 1).min(total), total }
    }

    pub fn results(&self, language: Language) -> QuizResults {
        let total = self.questions.len();
        let percentage = if total == 0 {
            0
        } else {
            (self.score as f64 / total as f64 * 100.0).round() as u32
        };
        QuizResults {
            score: self.score,
            total,
            percentage,
            message: helpers::result_message(percentage, language).to_string(),
        }
    }
}
