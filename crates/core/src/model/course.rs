use thiserror::Error;

use crate::model::ids::CourseId;
use crate::model::lesson::Lesson;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    /// Title and/or description were blank. Both flags are reported so a form
    /// can highlight every offending field at once.
    #[error("Please fill all required fields: Course Title and Description.")]
    MissingFields { title: bool, description: bool },
}

impl CourseError {
    #[must_use]
    pub fn title_missing(&self) -> bool {
        matches!(self, CourseError::MissingFields { title: true, .. })
    }

    #[must_use]
    pub fn description_missing(&self) -> bool {
        matches!(self, CourseError::MissingFields { description: true, .. })
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated course form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
}

/// Course title and description that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetails {
    title: String,
    description: String,
}

impl CourseDetails {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl CourseDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Check that both fields carry text.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::MissingFields` naming every blank field.
    pub fn validate(&self) -> Result<CourseDetails, CourseError> {
        let title = self.title.trim().is_empty();
        let description = self.description.trim().is_empty();
        if title || description {
            return Err(CourseError::MissingFields { title, description });
        }

        Ok(CourseDetails {
            title: self.title.clone(),
            description: self.description.clone(),
        })
    }
}

//
// ─── ENTITY ────────────────────────────────────────────────────────────────────
//

/// A course as served by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub lessons: Vec<Lesson>,
}

impl Course {
    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    /// Lessons sorted by their order index.
    #[must_use]
    pub fn ordered_lessons(&self) -> Vec<&Lesson> {
        let mut lessons: Vec<&Lesson> = self.lessons.iter().collect();
        lessons.sort_by_key(|lesson| lesson.order);
        lessons
    }

    /// Sum of lesson durations in minutes.
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        self.lessons
            .iter()
            .map(|lesson| lesson.duration_minutes)
            .fold(0_u32, u32::saturating_add)
    }
}
