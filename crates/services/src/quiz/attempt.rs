use learningstack_core::model::{CourseId, Question};
use learningstack_core::scoring::{self, QuizScore};

use crate::error::QuizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Loading,
    InProgress,
    Submitted,
}

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResult {
    pub text: String,
    pub chosen: Option<char>,
    /// `None` when the question has no option flagged correct.
    pub correct: Option<char>,
    pub is_correct: bool,
}

/// A student's pass through a course quiz.
///
/// Answers are a fixed-length list matching the questions, and the score is
/// computed once when the quiz is submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAttempt {
    course_id: CourseId,
    questions: Vec<Question>,
    answers: Vec<Option<usize>>,
    current: usize,
    phase: QuizPhase,
    score: Option<QuizScore>,
}

impl QuizAttempt {
    #[must_use]
    pub fn new(course_id: CourseId) -> Self {
        Self {
            course_id,
            questions: Vec::new(),
            answers: Vec::new(),
            current: 0,
            phase: QuizPhase::Loading,
            score: None,
        }
    }

    /// Installs the fetched questions with every answer unset.
    pub fn load(&mut self, questions: Vec<Question>) {
        self.answers = vec![None; questions.len()];
        self.questions = questions;
        self.current = 0;
        self.score = None;
        self.phase = QuizPhase::InProgress;
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<usize> {
        self.answers.get(self.current).copied().flatten()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    /// Next and Submit stay disabled until the shown question is answered.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.phase == QuizPhase::InProgress && self.current_answer().is_some()
    }

    /// # Errors
    ///
    /// Returns `QuizError::AlreadySubmitted` after submission and
    /// `QuizError::OptionOutOfRange` for an option the question lacks.
    pub fn answer(&mut self, option: usize) -> Result<(), QuizError> {
        self.ensure_in_progress()?;
        let options = self
            .current_question()
            .map_or(0, |question| question.options.len());
        if option >= options {
            return Err(QuizError::OptionOutOfRange);
        }
        self.answers[self.current] = Some(option);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizError::Unanswered` while the shown question has no answer.
    pub fn next(&mut self) -> Result<(), QuizError> {
        self.ensure_in_progress()?;
        if !self.can_advance() {
            return Err(QuizError::Unanswered);
        }
        if !self.is_last() {
            self.current += 1;
        }
        Ok(())
    }

    pub fn previous(&mut self) {
        if self.phase == QuizPhase::InProgress {
            self.current = self.current.saturating_sub(1);
        }
    }

    /// Scores the attempt and freezes it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` for an empty quiz and
    /// `QuizError::Unanswered` while the shown question has no answer.
    pub fn submit(&mut self) -> Result<QuizScore, QuizError> {
        self.ensure_in_progress()?;
        if self.questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        if self.current_answer().is_none() {
            return Err(QuizError::Unanswered);
        }
        let score = scoring::score_answers(&self.questions, &self.answers);
        self.score = Some(score);
        self.phase = QuizPhase::Submitted;
        Ok(score)
    }

    #[must_use]
    pub fn score(&self) -> Option<QuizScore> {
        self.score
    }

    /// Every question with the chosen and correct options as letters.
    #[must_use]
    pub fn results(&self) -> Vec<QuestionResult> {
        self.questions
            .iter()
            .zip(&self.answers)
            .map(|(question, answer)| QuestionResult {
                text: question.text.clone(),
                chosen: answer.map(scoring::option_letter),
                correct: question.correct_index().map(scoring::option_letter),
                is_correct: answer.is_some_and(|idx| question.is_correct(idx)),
            })
            .collect()
    }

    fn ensure_in_progress(&self) -> Result<(), QuizError> {
        match self.phase {
            QuizPhase::Submitted => Err(QuizError::AlreadySubmitted),
            QuizPhase::Loading => Err(QuizError::NoQuestions),
            QuizPhase::InProgress => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learningstack_core::model::{AnswerOption, QuestionId};
    use learningstack_core::scoring::QuizVerdict;

    fn question(id: &str, correct: usize) -> Question {
        Question {
            id: QuestionId::new(id),
            course_id: None,
            text: format!("{id}?"),
            options: (0..4)
                .map(|idx| AnswerOption {
                    id: None,
                    text: idx.to_string(),
                    is_correct: idx == correct,
                })
                .collect(),
        }
    }

    fn loaded(questions: Vec<Question>) -> QuizAttempt {
        let mut attempt = QuizAttempt::new(CourseId::new("c1"));
        attempt.load(questions);
        attempt
    }

    #[test]
    fn starts_loading_then_unanswered() {
        let mut attempt = QuizAttempt::new(CourseId::new("c1"));
        assert_eq!(attempt.phase(), QuizPhase::Loading);
        assert_eq!(attempt.answer(0), Err(QuizError::NoQuestions));
        attempt.load(vec![question("a", 0), question("b", 1)]);
        assert_eq!(attempt.phase(), QuizPhase::InProgress);
        assert_eq!(attempt.answers(), [None, None]);
        assert!(!attempt.can_advance());
    }

    #[test]
    fn next_needs_an_answer() {
        let mut attempt = loaded(vec![question("a", 0), question("b", 1)]);
        assert_eq!(attempt.next(), Err(QuizError::Unanswered));
        attempt.answer(2).unwrap();
        attempt.next().unwrap();
        assert_eq!(attempt.current_index(), 1);
        attempt.previous();
        assert_eq!(attempt.current_answer(), Some(2));
        assert_eq!(attempt.answer(4), Err(QuizError::OptionOutOfRange));
    }

    #[test]
    fn half_right_passes_and_freezes() {
        let mut attempt = loaded(vec![question("a", 0), question("b", 1)]);
        attempt.answer(0).unwrap();
        attempt.next().unwrap();
        attempt.answer(3).unwrap();
        let score = attempt.submit().unwrap();
        assert_eq!(score.label(), "50.0");
        assert_eq!(score.verdict(), QuizVerdict::Passed);
        assert_eq!(attempt.answer(1), Err(QuizError::AlreadySubmitted));

        let results = attempt.results();
        assert_eq!(results[1].chosen, Some('D'));
        assert_eq!(results[1].correct, Some('B'));
        assert!(results[0].is_correct && !results[1].is_correct);
    }

    #[test]
    fn one_of_three_fails() {
        let mut attempt = loaded(vec![question("a", 0), question("b", 0), question("c", 0)]);
        for _ in 0..3 {
            attempt.answer(1).unwrap();
            attempt.next().unwrap();
        }
        attempt.previous();
        attempt.previous();
        attempt.answer(0).unwrap();
        let score = attempt.submit().unwrap();
        assert_eq!(score.label(), "33.3");
        assert_eq!(score.verdict(), QuizVerdict::Failed);
    }

    #[test]
    fn empty_quiz_cannot_be_submitted() {
        let mut attempt = loaded(Vec::new());
        assert_eq!(attempt.submit(), Err(QuizError::NoQuestions));
        assert!(attempt.current_question().is_none());
    }
}
