use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use learningstack_core::model::{
    AnswerOption, Course, CourseDetails, CourseId, Credentials, Lesson, LessonId, LessonUpload,
    OptionId, ProfileUpdate, Question, QuestionId, SignupDraft, User, ValidQuestion,
};

use super::{CourseLessons, CourseSummary, CreatedCourse, LearningApi, LoginReply};
use crate::error::ApiError;

#[derive(Default)]
struct State {
    accounts: HashMap<String, (String, User)>,
    tokens: HashMap<String, String>,
    courses: Vec<Course>,
    lessons: Vec<Lesson>,
    questions: Vec<Question>,
    failing_uploads: HashSet<String>,
    next_id: u64,
}

impl State {
    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process backend for tests and offline prototyping. Ids are handed out
/// as `c1`, `l2`, `q3`… from one shared counter.
#[derive(Clone, Default)]
pub struct InMemoryApi {
    state: Arc<Mutex<State>>,
    requests: Arc<AtomicUsize>,
}

fn not_found(what: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        message: Some(format!("{what} not found")),
    }
}

impl InMemoryApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, ApiError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.state
            .lock()
            .map_err(|err| ApiError::Transport(err.to_string()))
    }

    /// Number of calls served so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Registers an account directly, bypassing signup.
    pub fn add_account(&self, password: &str, user: User) {
        if let Ok(mut state) = self.state.lock() {
            state
                .accounts
                .insert(user.email.clone(), (password.to_owned(), user));
        }
    }

    /// Makes uploads of lessons with this title fail with a server error.
    pub fn fail_uploads_titled(&self, title: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.failing_uploads.insert(title.to_owned());
        }
    }

    /// Current server-side lessons of a course, in insertion order.
    #[must_use]
    pub fn lessons_of(&self, course: &CourseId) -> Vec<Lesson> {
        self.state
            .lock()
            .map(|state| {
                state
                    .lessons
                    .iter()
                    .filter(|lesson| lesson.course_id.as_ref() == Some(course))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl LearningApi for InMemoryApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginReply, ApiError> {
        let mut state = self.lock()?;
        let user = match state.accounts.get(&credentials.email) {
            Some((password, user)) if *password == credentials.password => user.clone(),
            _ => {
                return Ok(LoginReply {
                    success: Some(false),
                    message: Some("Invalid credentials".into()),
                    ..LoginReply::default()
                });
            }
        };
        let token = format!("token-{}", state.next());
        state.tokens.insert(token.clone(), user.email.clone());
        Ok(LoginReply {
            success: Some(true),
            token: Some(token),
            user: Some(user),
            message: None,
        })
    }

    async fn signup(&self, draft: &SignupDraft) -> Result<Option<String>, ApiError> {
        let mut state = self.lock()?;
        if state.accounts.contains_key(&draft.email) {
            return Err(ApiError::Status {
                status: 400,
                message: Some("User already exists".into()),
            });
        }
        let user = User {
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: Some(draft.phone.clone()),
            role: "student".into(),
            ..User::default()
        };
        state
            .accounts
            .insert(draft.email.clone(), (draft.password.clone(), user));
        Ok(Some("User registered successfully".into()))
    }

    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        let mut state = self.lock()?;
        let email = state.tokens.get(token).cloned().ok_or(ApiError::Status {
            status: 401,
            message: Some("Unauthorized".into()),
        })?;
        let (_, user) = state
            .accounts
            .get_mut(&email)
            .ok_or_else(|| not_found("User"))?;
        user.name.clone_from(&update.name);
        user.phone = Some(update.phone.clone());
        Ok(user.clone())
    }

    async fn list_courses(&self) -> Result<Vec<CourseSummary>, ApiError> {
        let state = self.lock()?;
        Ok(state
            .courses
            .iter()
            .map(|course| CourseSummary {
                id: course.id.clone(),
                title: course.title.clone(),
                description: course.description.clone(),
                lesson_count: state
                    .lessons
                    .iter()
                    .filter(|lesson| lesson.course_id.as_ref() == Some(&course.id))
                    .count(),
            })
            .collect())
    }

    async fn get_course(&self, _token: Option<&str>, id: &CourseId) -> Result<Course, ApiError> {
        let state = self.lock()?;
        let course = state
            .courses
            .iter()
            .find(|course| course.id == *id)
            .ok_or_else(|| not_found("Course"))?;
        Ok(Course {
            lessons: state
                .lessons
                .iter()
                .filter(|lesson| lesson.course_id.as_ref() == Some(id))
                .cloned()
                .collect(),
            ..course.clone()
        })
    }

    async fn create_course(
        &self,
        _token: Option<&str>,
        details: &CourseDetails,
    ) -> Result<CreatedCourse, ApiError> {
        let mut state = self.lock()?;
        let id = CourseId::new(format!("c{}", state.next()));
        state.courses.push(Course {
            id: id.clone(),
            title: details.title().to_owned(),
            description: details.description().to_owned(),
            lessons: Vec::new(),
        });
        Ok(CreatedCourse {
            id,
            message: Some("Course created successfully".into()),
        })
    }

    async fn update_course(
        &self,
        _token: Option<&str>,
        id: &CourseId,
        details: &CourseDetails,
    ) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        let course = state
            .courses
            .iter_mut()
            .find(|course| course.id == *id)
            .ok_or_else(|| not_found("Course"))?;
        course.title = details.title().to_owned();
        course.description = details.description().to_owned();
        Ok(())
    }

    async fn delete_course(&self, _token: Option<&str>, id: &CourseId) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        let before = state.courses.len();
        state.courses.retain(|course| course.id != *id);
        if state.courses.len() == before {
            return Err(not_found("Course"));
        }
        state
            .lessons
            .retain(|lesson| lesson.course_id.as_ref() != Some(id));
        state
            .questions
            .retain(|question| question.course_id.as_ref() != Some(id));
        Ok(())
    }

    async fn upload_lesson(
        &self,
        _token: Option<&str>,
        upload: &LessonUpload,
    ) -> Result<Option<LessonId>, ApiError> {
        let mut state = self.lock()?;
        if state.failing_uploads.contains(&upload.title) {
            return Err(ApiError::Status {
                status: 500,
                message: Some("Upload failed".into()),
            });
        }
        if !state.courses.iter().any(|course| course.id == upload.course_id) {
            return Err(not_found("Course"));
        }
        let id = LessonId::new(format!("l{}", state.next()));
        state.lessons.push(Lesson {
            id: id.clone(),
            title: upload.title.clone(),
            video_url: Some(format!("/uploads/{}", upload.video.file_name())),
            duration_minutes: upload.duration_minutes,
            order: upload.order,
            is_free: false,
            course_id: Some(upload.course_id.clone()),
        });
        Ok(Some(id))
    }

    async fn list_lessons(
        &self,
        _token: Option<&str>,
        course: &CourseId,
    ) -> Result<CourseLessons, ApiError> {
        let state = self.lock()?;
        let course_title = state
            .courses
            .iter()
            .find(|c| c.id == *course)
            .map(|c| c.title.clone());
        let lessons: Vec<Lesson> = state
            .lessons
            .iter()
            .filter(|lesson| lesson.course_id.as_ref() == Some(course))
            .cloned()
            .collect();
        Ok(CourseLessons {
            course_title: course_title.filter(|_| !lessons.is_empty()),
            lessons,
        })
    }

    async fn delete_lesson(&self, _token: Option<&str>, id: &LessonId) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        let before = state.lessons.len();
        state.lessons.retain(|lesson| lesson.id != *id);
        if state.lessons.len() == before {
            return Err(not_found("Lesson"));
        }
        Ok(())
    }

    async fn list_questions(
        &self,
        _token: Option<&str>,
        course: &CourseId,
    ) -> Result<Vec<Question>, ApiError> {
        let state = self.lock()?;
        Ok(state
            .questions
            .iter()
            .filter(|question| question.course_id.as_ref() == Some(course))
            .cloned()
            .collect())
    }

    async fn get_question(
        &self,
        _token: Option<&str>,
        id: &QuestionId,
    ) -> Result<Question, ApiError> {
        let state = self.lock()?;
        state
            .questions
            .iter()
            .find(|question| question.id == *id)
            .cloned()
            .ok_or_else(|| not_found("Question"))
    }

    async fn create_question(
        &self,
        _token: Option<&str>,
        course: &CourseId,
        question: &ValidQuestion,
    ) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        let id = QuestionId::new(format!("q{}", state.next()));
        let options = assign_option_ids(&id, &question.options);
        state.questions.push(Question {
            id,
            course_id: Some(course.clone()),
            text: question.text.clone(),
            options,
        });
        Ok(())
    }

    async fn update_question(
        &self,
        _token: Option<&str>,
        id: &QuestionId,
        question: &ValidQuestion,
    ) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        let stored = state
            .questions
            .iter_mut()
            .find(|stored| stored.id == *id)
            .ok_or_else(|| not_found("Question"))?;
        stored.text.clone_from(&question.text);
        stored.options = assign_option_ids(id, &question.options);
        Ok(())
    }

    async fn delete_question(
        &self,
        _token: Option<&str>,
        id: &QuestionId,
    ) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        let before = state.questions.len();
        state.questions.retain(|question| question.id != *id);
        if state.questions.len() == before {
            return Err(not_found("Question"));
        }
        Ok(())
    }
}

fn assign_option_ids(question: &QuestionId, options: &[AnswerOption]) -> Vec<AnswerOption> {
    options
        .iter()
        .enumerate()
        .map(|(idx, option)| AnswerOption {
            id: option
                .id
                .clone()
                .or_else(|| Some(OptionId::new(format!("{question}-o{idx}")))),
            ..option.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use learningstack_core::model::CourseDraft;

    #[tokio::test]
    async fn ids_follow_creation_order() {
        let api = InMemoryApi::new();
        let details = CourseDraft::new("X", "Y").validate().unwrap();
        let created = api.create_course(None, &details).await.unwrap();
        assert_eq!(created.id, CourseId::new("c1"));
        assert_eq!(api.request_count(), 1);
    }

    #[tokio::test]
    async fn wrong_password_reports_failure_without_token() {
        let api = InMemoryApi::new();
        api.add_account(
            "pw",
            User {
                email: "a@b.c".into(),
                ..User::default()
            },
        );
        let reply = api
            .login(&Credentials {
                email: "a@b.c".into(),
                password: "nope".into(),
            })
            .await
            .unwrap();
        assert_eq!(reply.success, Some(false));
        assert!(reply.token.is_none());
    }

    #[tokio::test]
    async fn deleting_missing_lesson_is_404() {
        let api = InMemoryApi::new();
        let err = api
            .delete_lesson(None, &LessonId::new("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }
}
