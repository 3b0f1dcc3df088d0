use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CourseId, OptionId, QuestionId};

/// Every quiz question carries exactly this many options.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("Question text cannot be empty.")]
    EmptyText,

    #[error("You must provide exactly 4 options.")]
    OptionCount { found: usize },

    #[error("All options must have text.")]
    EmptyOption { index: usize },

    #[error("You must select the correct answer.")]
    NoCorrectAnswer,
}

//
// ─── ENTITY ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OptionId>,
    #[serde(rename = "optionText")]
    pub text: String,
    #[serde(rename = "isCorrect", default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub course_id: Option<CourseId>,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Index of the first option flagged correct.
    #[must_use]
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|option| option.is_correct)
    }

    #[must_use]
    pub fn is_correct(&self, answer: usize) -> bool {
        self.correct_index() == Some(answer)
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionDraft {
    pub id: Option<OptionId>,
    pub text: String,
}

impl OptionDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
        }
    }
}

/// Question form state. `correct` indexes into `options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub options: Vec<OptionDraft>,
    pub correct: Option<usize>,
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self {
            text: String::new(),
            options: vec![OptionDraft::default(); OPTION_COUNT],
            correct: None,
        }
    }
}

/// A question whose text and options passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidQuestion {
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl QuestionDraft {
    /// Form pre-filled from an existing question, option ids kept.
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            text: question.text.clone(),
            options: question
                .options
                .iter()
                .map(|option| OptionDraft {
                    id: option.id.clone(),
                    text: option.text.clone(),
                })
                .collect(),
            correct: question.correct_index(),
        }
    }

    /// # Errors
    ///
    /// Returns the first failing rule: text, option count, option text,
    /// correct selection.
    pub fn validate(&self) -> Result<ValidQuestion, QuestionError> {
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.options.len() != OPTION_COUNT {
            return Err(QuestionError::OptionCount {
                found: self.options.len(),
            });
        }
        if let Some(index) = self
            .options
            .iter()
            .position(|option| option.text.trim().is_empty())
        {
            return Err(QuestionError::EmptyOption { index });
        }
        let correct = match self.correct {
            Some(index) if index < self.options.len() => index,
            _ => return Err(QuestionError::NoCorrectAnswer),
        };

        Ok(ValidQuestion {
            text: self.text.clone(),
            options: self
                .options
                .iter()
                .enumerate()
                .map(|(idx, option)| AnswerOption {
                    id: option.id.clone(),
                    text: option.text.clone(),
                    is_correct: idx == correct,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(text: &str, options: &[&str], correct: Option<usize>) -> QuestionDraft {
        QuestionDraft {
            text: text.into(),
            options: options.iter().map(|t| OptionDraft::new(*t)).collect(),
            correct,
        }
    }

    #[test]
    fn default_draft_has_four_blank_options() {
        let draft = QuestionDraft::default();
        assert_eq!(draft.options.len(), OPTION_COUNT);
        assert!(draft.correct.is_none());
    }

    #[test]
    fn valid_draft_marks_exactly_one_correct() {
        let valid = draft("2+2?", &["3", "4", "5", "6"], Some(1)).validate().unwrap();
        let flags: Vec<bool> = valid.options.iter().map(|o| o.is_correct).collect();
        assert_eq!(flags, [false, true, false, false]);
    }

    #[test]
    fn rules_apply_in_order() {
        let err = draft(" ", &["a"], None).validate().unwrap_err();
        assert_eq!(err.to_string(), "Question text cannot be empty.");

        let err = draft("q", &["a", "b", "c"], None).validate().unwrap_err();
        assert_eq!(err.to_string(), "You must provide exactly 4 options.");

        let err = draft("q", &["a", "", "c", "d"], None).validate().unwrap_err();
        assert_eq!(err, QuestionError::EmptyOption { index: 1 });
        assert_eq!(err.to_string(), "All options must have text.");

        let err = draft("q", &["a", "b", "c", "d"], None).validate().unwrap_err();
        assert_eq!(err.to_string(), "You must select the correct answer.");

        let err = draft("q", &["a", "b", "c", "d"], Some(4)).validate().unwrap_err();
        assert_eq!(err, QuestionError::NoCorrectAnswer);
    }

    #[test]
    fn from_question_keeps_ids_and_correct_index() {
        let question = Question {
            id: QuestionId::new("q1"),
            course_id: Some(CourseId::new("c1")),
            text: "Pick".into(),
            options: (0..4)
                .map(|i| AnswerOption {
                    id: Some(OptionId::new(format!("o{i}"))),
                    text: format!("opt {i}"),
                    is_correct: i == 2,
                })
                .collect(),
        };

        let draft = QuestionDraft::from_question(&question);
        assert_eq!(draft.correct, Some(2));
        assert_eq!(draft.options[3].id, Some(OptionId::new("o3")));

        let valid = draft.validate().unwrap();
        assert_eq!(valid.options, question.options);
    }

    #[test]
    fn question_without_correct_option_never_matches() {
        let question = Question {
            id: QuestionId::new("q1"),
            course_id: None,
            text: "?".into(),
            options: vec![
                AnswerOption {
                    id: None,
                    text: "a".into(),
                    is_correct: false,
                };
                4
            ],
        };
        assert_eq!(question.correct_index(), None);
        assert!(!(0..4).any(|i| question.is_correct(i)));
    }

    #[test]
    fn option_wire_names() {
        let option = AnswerOption {
            id: None,
            text: "4".into(),
            is_correct: true,
        };
        let json = serde_json::to_value(&option).unwrap();
        assert_eq!(json, serde_json::json!({"optionText": "4", "isCorrect": true}));
    }
}
