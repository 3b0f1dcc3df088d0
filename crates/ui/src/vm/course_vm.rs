use learningstack_core::model::{CourseId, LessonId};
use services::LessonProgress;
use services::api::CourseSummary;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub lessons_label: String,
}

impl From<&CourseSummary> for CourseCardVm {
    fn from(course: &CourseSummary) -> Self {
        let lessons_label = match course.lesson_count {
            1 => "1 lesson".to_owned(),
            n => format!("{n} lessons"),
        };
        Self {
            id: course.id.clone(),
            title: course.title.clone(),
            description: course.description.clone(),
            lessons_label,
        }
    }
}

#[must_use]
pub fn map_course_cards(courses: &[CourseSummary]) -> Vec<CourseCardVm> {
    courses.iter().map(CourseCardVm::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonRowVm {
    pub id: LessonId,
    pub title: String,
    pub duration_label: String,
    pub selected: bool,
    pub completed: bool,
    pub bookmarked: bool,
}

#[must_use]
pub fn map_lesson_rows(progress: &LessonProgress) -> Vec<LessonRowVm> {
    let selected = progress.selected().map(|lesson| lesson.id.clone());
    progress
        .lessons()
        .iter()
        .map(|lesson| LessonRowVm {
            id: lesson.id.clone(),
            title: lesson.title.clone(),
            duration_label: duration_label(lesson.duration_minutes),
            selected: selected.as_ref() == Some(&lesson.id),
            completed: progress.is_completed(&lesson.id),
            bookmarked: progress.is_bookmarked(&lesson.id),
        })
        .collect()
}

#[must_use]
pub fn duration_label(minutes: u32) -> String {
    format!("{minutes} min")
}

/// Lesson videos come back as server paths like `/uploads/x.mp4`; they are
/// served from the API host, outside the `/api` prefix.
#[must_use]
pub fn media_url(api_base_url: &str, video_url: &str) -> String {
    if video_url.starts_with("http://") || video_url.starts_with("https://") {
        return video_url.to_owned();
    }
    let base = api_base_url.trim_end_matches('/');
    let host = base.strip_suffix("/api").unwrap_or(base);
    format!("{host}/{}", video_url.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use learningstack_core::model::Lesson;

    #[test]
    fn lesson_count_label() {
        let mut course = CourseSummary {
            id: CourseId::new("c1"),
            title: "Rust".into(),
            description: "Basics".into(),
            lesson_count: 1,
        };
        assert_eq!(CourseCardVm::from(&course).lessons_label, "1 lesson");
        course.lesson_count = 0;
        assert_eq!(CourseCardVm::from(&course).lessons_label, "0 lessons");
    }

    #[test]
    fn rows_reflect_progress() {
        let lessons = ["a", "b"]
            .into_iter()
            .map(|id| Lesson {
                id: LessonId::new(id),
                title: id.into(),
                video_url: None,
                duration_minutes: 4,
                order: 1,
                is_free: false,
                course_id: None,
            })
            .collect();
        let mut progress = LessonProgress::new(lessons);
        progress.toggle_completed(&LessonId::new("b"));

        let rows = map_lesson_rows(&progress);
        assert!(rows[0].selected && !rows[0].completed);
        assert!(!rows[1].selected && rows[1].completed);
        assert_eq!(rows[1].duration_label, "4 min");
    }

    #[test]
    fn media_urls_resolve_against_api_host() {
        assert_eq!(
            media_url("http://localhost:5000/api", "/uploads/a.mp4"),
            "http://localhost:5000/uploads/a.mp4"
        );
        assert_eq!(
            media_url("http://cdn.test/api/", "https://v.test/a.mp4"),
            "https://v.test/a.mp4"
        );
    }
}
