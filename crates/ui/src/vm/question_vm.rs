use learningstack_core::model::{Question, QuestionId};
use learningstack_core::scoring::option_letter;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRowVm {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<String>,
    pub correct_label: String,
}

impl From<&Question> for QuestionRowVm {
    fn from(question: &Question) -> Self {
        let correct_label = question.correct_index().map_or_else(
            || "No correct answer".to_owned(),
            |idx| {
                let text = question.options.get(idx).map_or("", |o| o.text.as_str());
                format!("Correct: {}) {text}", option_letter(idx))
            },
        );
        Self {
            id: question.id.clone(),
            text: question.text.clone(),
            options: question
                .options
                .iter()
                .enumerate()
                .map(|(idx, option)| format!("{}) {}", option_letter(idx), option.text))
                .collect(),
            correct_label,
        }
    }
}

#[must_use]
pub fn map_question_rows(questions: &[Question]) -> Vec<QuestionRowVm> {
    questions.iter().map(QuestionRowVm::from).collect()
}
