//! JSON shapes exchanged with the backend and their conversion into domain
//! types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use learningstack_core::model::{
    AnswerOption, Course, CourseDetails, CourseId, Lesson, LessonId, Question, QuestionId, User,
    ValidQuestion,
};

use super::{CourseLessons, CourseSummary, LoginReply};

// ─── Envelopes ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Some endpoints wrap their payload in `data`, some do not.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum MaybeEnvelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> MaybeEnvelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            MaybeEnvelope::Wrapped { data } | MaybeEnvelope::Bare(data) => data,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

// ─── Auth ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct LoginBody {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    message: Option<String>,
}

impl From<LoginBody> for LoginReply {
    fn from(body: LoginBody) -> Self {
        Self {
            success: body.success,
            token: body.token.filter(|token| !token.is_empty()),
            user: body.user,
            message: body.message,
        }
    }
}

// ─── Courses ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct CoursePayload<'a> {
    title: &'a str,
    description: &'a str,
}

impl<'a> From<&'a CourseDetails> for CoursePayload<'a> {
    fn from(details: &'a CourseDetails) -> Self {
        Self {
            title: details.title(),
            description: details.description(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CourseBody {
    #[serde(rename = "_id")]
    id: CourseId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    lessons: Vec<LessonRef>,
}

/// Course listings carry lessons either populated or as bare ids.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LessonRef {
    Full(LessonBody),
    Id(serde::de::IgnoredAny),
}

impl CourseBody {
    pub fn into_summary(self) -> CourseSummary {
        CourseSummary {
            lesson_count: self.lessons.len(),
            id: self.id,
            title: self.title,
            description: self.description,
        }
    }

    /// Bare lesson ids carry nothing to show and are dropped.
    pub fn into_course(self) -> Course {
        let lessons = self
            .lessons
            .into_iter()
            .filter_map(|lesson| match lesson {
                LessonRef::Full(body) => Some(body.into_lesson()),
                LessonRef::Id(_) => None,
            })
            .collect();
        Course {
            id: self.id,
            title: self.title,
            description: self.description,
            lessons,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedCourseBody {
    #[serde(default)]
    pub message: Option<String>,
    pub data: CreatedId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedId {
    #[serde(rename = "_id")]
    pub id: String,
}

// ─── Lessons ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CourseRef {
    Embedded {
        #[serde(rename = "_id")]
        id: CourseId,
        #[serde(default)]
        title: Option<String>,
    },
    Id(CourseId),
}

#[derive(Debug, Deserialize)]
pub(crate) struct LessonBody {
    #[serde(rename = "_id")]
    id: LessonId,
    #[serde(default)]
    title: String,
    #[serde(rename = "videoUrl", default)]
    video_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    duration: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    order: u32,
    #[serde(rename = "isFree", default)]
    is_free: bool,
    #[serde(default)]
    course: Option<CourseRef>,
}

impl LessonBody {
    fn course_title(&self) -> Option<&str> {
        match &self.course {
            Some(CourseRef::Embedded { title, .. }) => title.as_deref(),
            _ => None,
        }
    }

    pub fn into_lesson(self) -> Lesson {
        let course_id = self.course.map(|course| match course {
            CourseRef::Embedded { id, .. } | CourseRef::Id(id) => id,
        });
        Lesson {
            id: self.id,
            title: self.title,
            video_url: self.video_url,
            duration_minutes: self.duration,
            order: self.order,
            is_free: self.is_free,
            course_id,
        }
    }
}

/// Title comes from the first lesson's embedded course.
pub(crate) fn course_lessons(bodies: Vec<LessonBody>) -> CourseLessons {
    let course_title = bodies
        .first()
        .and_then(LessonBody::course_title)
        .map(str::to_owned);
    CourseLessons {
        course_title,
        lessons: bodies.into_iter().map(LessonBody::into_lesson).collect(),
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UploadBody {
    #[serde(default)]
    data: Option<UploadedLesson>,
}

#[derive(Debug, Deserialize)]
struct UploadedLesson {
    #[serde(rename = "_id")]
    id: LessonId,
}

impl UploadBody {
    pub fn lesson_id(self) -> Option<LessonId> {
        self.data.map(|lesson| lesson.id)
    }
}

// ─── Questions ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionBody {
    #[serde(rename = "_id")]
    id: QuestionId,
    #[serde(rename = "questionText", default)]
    text: String,
    #[serde(rename = "courseId", default)]
    course: Option<CourseRef>,
    #[serde(default)]
    options: Vec<AnswerOption>,
}

impl QuestionBody {
    pub fn into_question(self) -> Question {
        Question {
            id: self.id,
            course_id: self.course.map(|course| match course {
                CourseRef::Embedded { id, .. } | CourseRef::Id(id) => id,
            }),
            text: self.text,
            options: self.options,
        }
    }
}

/// `GET /questions/:id` answers with the question and its options side by side.
#[derive(Debug, Deserialize)]
pub(crate) struct QuestionDetail {
    question: QuestionBody,
    #[serde(default)]
    options: Vec<AnswerOption>,
}

impl QuestionDetail {
    pub fn into_question(self) -> Question {
        let mut question = self.question.into_question();
        if !self.options.is_empty() {
            question.options = self.options;
        }
        question
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct QuestionPayload<'a> {
    #[serde(rename = "courseId", skip_serializing_if = "Option::is_none")]
    course_id: Option<&'a CourseId>,
    #[serde(rename = "questionText")]
    question_text: &'a str,
    options: &'a [AnswerOption],
}

impl<'a> QuestionPayload<'a> {
    pub fn create(course: &'a CourseId, question: &'a ValidQuestion) -> Self {
        Self {
            course_id: Some(course),
            question_text: &question.text,
            options: &question.options,
        }
    }

    pub fn update(question: &'a ValidQuestion) -> Self {
        Self {
            course_id: None,
            question_text: &question.text,
            options: &question.options,
        }
    }
}

// ─── Helpers ───────────────────────────────────────────────────────────────────

/// Numbers arrive as JSON numbers or, after multipart uploads, as strings.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map_or(0, |n| n.floor().min(f64::from(u32::MAX)) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lessons_parse_with_embedded_course() {
        let bodies: Vec<LessonBody> = serde_json::from_value(json!([
            {"_id": "l2", "title": "Two", "order": 2, "duration": "7",
             "videoUrl": "/v/2.mp4", "course": {"_id": "c1", "title": "Rust"}},
            {"_id": "l1", "title": "One", "order": 1, "duration": 5, "course": "c1"}
        ]))
        .unwrap();

        let listed = course_lessons(bodies);
        assert_eq!(listed.course_title.as_deref(), Some("Rust"));
        assert_eq!(listed.lessons[0].duration_minutes, 7);
        assert_eq!(listed.lessons[1].course_id, Some(CourseId::new("c1")));
        assert!(!listed.lessons[1].is_free);
    }

    #[test]
    fn course_listing_counts_bare_lesson_ids() {
        let body: CourseBody = serde_json::from_value(json!({
            "_id": "c1", "title": "Rust", "description": "d", "lessons": ["l1", "l2"]
        }))
        .unwrap();
        let summary = body.into_summary();
        assert_eq!(summary.lesson_count, 2);
    }

    #[test]
    fn question_detail_uses_side_options() {
        let detail: QuestionDetail = serde_json::from_value(json!({
            "question": {"_id": "q1", "questionText": "2+2?", "courseId": "c1"},
            "options": [
                {"_id": "o1", "optionText": "3", "isCorrect": false},
                {"_id": "o2", "optionText": "4", "isCorrect": true},
                {"_id": "o3", "optionText": "5", "isCorrect": false},
                {"_id": "o4", "optionText": "6", "isCorrect": false}
            ]
        }))
        .unwrap();
        let question = detail.into_question();
        assert_eq!(question.correct_index(), Some(1));
        assert_eq!(question.course_id, Some(CourseId::new("c1")));
    }

    #[test]
    fn create_payload_includes_course_but_update_does_not() {
        let valid = ValidQuestion {
            text: "2+2?".into(),
            options: vec![AnswerOption {
                id: None,
                text: "4".into(),
                is_correct: true,
            }],
        };
        let course = CourseId::new("c1");
        let create = serde_json::to_value(QuestionPayload::create(&course, &valid)).unwrap();
        assert_eq!(create["courseId"], "c1");
        assert_eq!(create["options"][0]["optionText"], "4");

        let update = serde_json::to_value(QuestionPayload::update(&valid)).unwrap();
        assert!(update.get("courseId").is_none());
        assert_eq!(update["questionText"], "2+2?");
    }
}
