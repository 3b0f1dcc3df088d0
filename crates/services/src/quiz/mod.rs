mod attempt;
mod service;

pub use attempt::{QuestionResult, QuizAttempt, QuizPhase};
pub use service::QuizService;
