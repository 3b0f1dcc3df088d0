use crate::model::Question;

/// Minimum percentage that unlocks the certificate.
pub const PASS_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizVerdict {
    Passed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
}

impl QuizScore {
    /// `correct / total * 100`; an empty quiz scores zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.correct as f64 / self.total as f64) * 100.0
    }

    /// Percentage with one decimal, e.g. `66.7`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{:.1}", self.percent())
    }

    #[must_use]
    pub fn verdict(&self) -> QuizVerdict {
        if self.percent() >= PASS_THRESHOLD {
            QuizVerdict::Passed
        } else {
            QuizVerdict::Failed
        }
    }
}

/// Counts answers matching each question's correct option. Unanswered
/// questions and questions without a correct option count as wrong.
#[must_use]
pub fn score_answers(questions: &[Question], answers: &[Option<usize>]) -> QuizScore {
    let correct = questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| answer.is_some_and(|idx| question.is_correct(idx)))
        .count();

    QuizScore {
        correct,
        total: questions.len(),
    }
}

/// `0 → 'A'`, `3 → 'D'`.
#[must_use]
pub fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .map_or('?', char::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerOption, QuestionId};

    fn question(correct: Option<usize>) -> Question {
        Question {
            id: QuestionId::new("q"),
            course_id: None,
            text: "?".into(),
            options: (0..4)
                .map(|i| AnswerOption {
                    id: None,
                    text: i.to_string(),
                    is_correct: Some(i) == correct,
                })
                .collect(),
        }
    }

    #[test]
    fn score_is_exact_ratio() {
        let questions = vec![question(Some(0)), question(Some(1)), question(Some(2))];
        let score = score_answers(&questions, &[Some(0), Some(1), Some(3)]);
        assert_eq!(score, QuizScore { correct: 2, total: 3 });
        assert!((score.percent() - 200.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(score.label(), "66.7");
    }

    #[test]
    fn threshold_is_inclusive() {
        let half = QuizScore { correct: 1, total: 2 };
        assert_eq!(half.verdict(), QuizVerdict::Passed);
        let below = QuizScore { correct: 1, total: 3 };
        assert_eq!(below.verdict(), QuizVerdict::Failed);
    }

    #[test]
    fn unanswered_and_unkeyed_questions_score_zero() {
        let questions = vec![question(Some(1)), question(None)];
        let score = score_answers(&questions, &[None, Some(0)]);
        assert_eq!(score.correct, 0);
        assert_eq!(score.percent(), 0.0);
    }

    #[test]
    fn empty_quiz_fails() {
        let score = score_answers(&[], &[]);
        assert_eq!(score.percent(), 0.0);
        assert_eq!(score.verdict(), QuizVerdict::Failed);
    }

    #[test]
    fn letters() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(3), 'D');
    }
}
