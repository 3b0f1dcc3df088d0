use std::collections::HashSet;

use learningstack_core::model::{Lesson, LessonId};

pub const QUIZ_LOCKED: &str = "You have not completed all chapters to start the quiz.";

/// Client-side progress on the lesson list page. Nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonProgress {
    lessons: Vec<Lesson>,
    selected: Option<LessonId>,
    completed: HashSet<LessonId>,
    bookmarked: HashSet<LessonId>,
}

impl LessonProgress {
    /// Selects the first lesson, if any.
    #[must_use]
    pub fn new(lessons: Vec<Lesson>) -> Self {
        let selected = lessons.first().map(|lesson| lesson.id.clone());
        Self {
            lessons,
            selected,
            completed: HashSet::new(),
            bookmarked: HashSet::new(),
        }
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Lesson> {
        let id = self.selected.as_ref()?;
        self.lessons.iter().find(|lesson| lesson.id == *id)
    }

    pub fn select(&mut self, id: &LessonId) {
        if self.lessons.iter().any(|lesson| lesson.id == *id) {
            self.selected = Some(id.clone());
        }
    }

    pub fn toggle_completed(&mut self, id: &LessonId) {
        toggle(&mut self.completed, id);
    }

    pub fn toggle_bookmark(&mut self, id: &LessonId) {
        toggle(&mut self.bookmarked, id);
    }

    #[must_use]
    pub fn is_completed(&self, id: &LessonId) -> bool {
        self.completed.contains(id)
    }

    #[must_use]
    pub fn is_bookmarked(&self, id: &LessonId) -> bool {
        self.bookmarked.contains(id)
    }

    /// True when at least one lesson exists and every lesson is completed.
    #[must_use]
    pub fn quiz_unlocked(&self) -> bool {
        !self.lessons.is_empty()
            && self
                .lessons
                .iter()
                .all(|lesson| self.completed.contains(&lesson.id))
    }

    /// # Errors
    ///
    /// Returns the message shown when the quiz is still locked.
    pub fn enter_quiz(&self) -> Result<(), &'static str> {
        if self.quiz_unlocked() {
            Ok(())
        } else {
            Err(QUIZ_LOCKED)
        }
    }
}

fn toggle(set: &mut HashSet<LessonId>, id: &LessonId) {
    if !set.remove(id) {
        set.insert(id.clone());
    }
}
