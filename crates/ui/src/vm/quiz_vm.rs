use learningstack_core::scoring::option_letter;
use services::QuizAttempt;
use services::quiz::QuestionResult;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOptionVm {
    pub index: usize,
    pub letter: char,
    pub text: String,
    pub selected: bool,
}

/// The question currently on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizQuestionVm {
    pub progress_label: String,
    pub text: String,
    pub options: Vec<QuizOptionVm>,
    pub can_go_back: bool,
    pub can_advance: bool,
    pub is_last: bool,
}

impl QuizQuestionVm {
    #[must_use]
    pub fn from_attempt(attempt: &QuizAttempt) -> Option<Self> {
        let question = attempt.current_question()?;
        let chosen = attempt.current_answer();
        Some(Self {
            progress_label: format!(
                "Question {} of {}",
                attempt.current_index() + 1,
                attempt.questions().len()
            ),
            text: question.text.clone(),
            options: question
                .options
                .iter()
                .enumerate()
                .map(|(index, option)| QuizOptionVm {
                    index,
                    letter: option_letter(index),
                    text: option.text.clone(),
                    selected: chosen == Some(index),
                })
                .collect(),
            can_go_back: attempt.current_index() > 0,
            can_advance: attempt.can_advance(),
            is_last: attempt.is_last(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub text: String,
    pub chosen_label: String,
    pub correct_label: String,
    pub is_correct: bool,
}

#[must_use]
pub fn map_result_rows(results: &[QuestionResult]) -> Vec<ResultRowVm> {
    results
        .iter()
        .map(|result| ResultRowVm {
            text: result.text.clone(),
            chosen_label: result.chosen.map_or_else(|| "-".to_owned(), String::from),
            correct_label: result.correct.map_or_else(|| "-".to_owned(), String::from),
            is_correct: result.is_correct,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use learningstack_core::model::{AnswerOption, CourseId, Question, QuestionId};

    fn attempt() -> QuizAttempt {
        let question = |id: &str| Question {
            id: QuestionId::new(id),
            course_id: None,
            text: format!("{id}?"),
            options: ["3", "4", "5", "6"]
                .into_iter()
                .enumerate()
                .map(|(idx, text)| AnswerOption {
                    id: None,
                    text: text.into(),
                    is_correct: idx == 1,
                })
                .collect(),
        };
        let mut attempt = QuizAttempt::new(CourseId::new("c1"));
        attempt.load(vec![question("a"), question("b")]);
        attempt
    }

    #[test]
    fn first_question_view() {
        let mut attempt = attempt();
        let vm = QuizQuestionVm::from_attempt(&attempt).unwrap();
        assert_eq!(vm.progress_label, "Question 1 of 2");
        assert!(!vm.can_advance && !vm.can_go_back && !vm.is_last);

        attempt.answer(1).unwrap();
        let vm = QuizQuestionVm::from_attempt(&attempt).unwrap();
        assert!(vm.can_advance);
        assert!(vm.options[1].selected);
        assert_eq!(vm.options[3].letter, 'D');
    }

    #[test]
    fn result_labels_use_letters() {
        let mut attempt = attempt();
        attempt.answer(0).unwrap();
        attempt.next().unwrap();
        attempt.answer(1).unwrap();
        attempt.submit().unwrap();
        let rows = map_result_rows(&attempt.results());
        assert_eq!(rows[0].chosen_label, "A");
        assert_eq!(rows[0].correct_label, "B");
        assert!(rows[1].is_correct);
    }
}
