mod authoring_vm;
mod course_vm;
mod question_vm;
mod quiz_vm;

pub use authoring_vm::{ModuleRowVm, map_module_rows, phase_label};
pub use course_vm::{
    CourseCardVm, LessonRowVm, duration_label, map_course_cards, map_lesson_rows, media_url,
};
pub use question_vm::{QuestionRowVm, map_question_rows};
pub use quiz_vm::{QuizOptionVm, QuizQuestionVm, ResultRowVm, map_result_rows};
