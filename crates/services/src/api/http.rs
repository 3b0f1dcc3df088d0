use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use learningstack_core::model::{
    Course, CourseDetails, CourseId, Credentials, LessonId, LessonUpload, ProfileUpdate, Question,
    QuestionId, SignupDraft, User, ValidQuestion,
};

use super::wire::{
    CourseBody, CoursePayload, CreatedCourseBody, Envelope, LessonBody, LoginBody, MaybeEnvelope,
    MessageBody, QuestionBody, QuestionDetail, QuestionPayload, UploadBody, course_lessons,
};
use super::{CourseLessons, CourseSummary, CreatedCourse, LearningApi, LoginReply};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// `LearningApi` over HTTP with `reqwest`.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
}

impl HttpApi {
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = self.config.endpoint(path);
        debug!(%method, %url, "api request");
        let builder = self.client.request(method, url);
        match token.filter(|token| !token.is_empty()) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = ensure_success(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        ensure_success(builder.send().await?).await?;
        Ok(())
    }
}

/// Turns a non-2xx response into `ApiError::Status`, keeping its `message`.
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<MessageBody>()
        .await
        .ok()
        .and_then(|body| body.message);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

fn video_mime(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("mp4" | "m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl LearningApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginReply, ApiError> {
        let body: LoginBody = self
            .fetch(self.request(Method::POST, "auth/login", None).json(credentials))
            .await?;
        Ok(body.into())
    }

    async fn signup(&self, draft: &SignupDraft) -> Result<Option<String>, ApiError> {
        let body: MessageBody = self
            .fetch(self.request(Method::POST, "auth/signup", None).json(draft))
            .await?;
        Ok(body.message)
    }

    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        let body: MaybeEnvelope<User> = self
            .fetch(self.request(Method::PUT, "user/update", Some(token)).json(update))
            .await?;
        Ok(body.into_inner())
    }

    async fn list_courses(&self) -> Result<Vec<CourseSummary>, ApiError> {
        let body: MaybeEnvelope<Vec<CourseBody>> =
            self.fetch(self.request(Method::GET, "courses/", None)).await?;
        Ok(body
            .into_inner()
            .into_iter()
            .map(CourseBody::into_summary)
            .collect())
    }

    async fn get_course(&self, token: Option<&str>, id: &CourseId) -> Result<Course, ApiError> {
        let path = format!("courses/{id}");
        let body: MaybeEnvelope<CourseBody> =
            self.fetch(self.request(Method::GET, &path, token)).await?;
        Ok(body.into_inner().into_course())
    }

    async fn create_course(
        &self,
        token: Option<&str>,
        details: &CourseDetails,
    ) -> Result<CreatedCourse, ApiError> {
        let body: CreatedCourseBody = self
            .fetch(
                self.request(Method::POST, "courses/", token)
                    .json(&CoursePayload::from(details)),
            )
            .await?;
        let id = body
            .data
            .id
            .parse::<CourseId>()
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(CreatedCourse {
            id,
            message: body.message,
        })
    }

    async fn update_course(
        &self,
        token: Option<&str>,
        id: &CourseId,
        details: &CourseDetails,
    ) -> Result<(), ApiError> {
        let path = format!("courses/{id}");
        self.execute(
            self.request(Method::PUT, &path, token)
                .json(&CoursePayload::from(details)),
        )
        .await
    }

    async fn delete_course(&self, token: Option<&str>, id: &CourseId) -> Result<(), ApiError> {
        let path = format!("courses/{id}");
        self.execute(self.request(Method::DELETE, &path, token))
            .await
    }

    async fn upload_lesson(
        &self,
        token: Option<&str>,
        upload: &LessonUpload,
    ) -> Result<Option<LessonId>, ApiError> {
        let video = &upload.video;
        let bytes = tokio::fs::read(video.path())
            .await
            .map_err(|err| ApiError::LocalFile(format!("{}: {err}", video.path().display())))?;
        let part = Part::bytes(bytes)
            .file_name(video.file_name().to_owned())
            .mime_str(video_mime(video.file_name()))?;
        let form = Form::new()
            .text("title", upload.title.clone())
            .text("content", upload.content.clone())
            .text("course", upload.course_id.to_string())
            .text("duration", upload.duration_minutes.to_string())
            .text("order", upload.order.to_string())
            .part("video", part);

        let body: UploadBody = self
            .fetch(
                self.request(Method::POST, "lessons/uploadLesson", token)
                    .multipart(form),
            )
            .await?;
        Ok(body.lesson_id())
    }

    async fn list_lessons(
        &self,
        token: Option<&str>,
        course: &CourseId,
    ) -> Result<CourseLessons, ApiError> {
        let path = format!("lessons/course/{course}");
        let body: Envelope<Vec<LessonBody>> =
            self.fetch(self.request(Method::GET, &path, token)).await?;
        Ok(course_lessons(body.data))
    }

    async fn delete_lesson(&self, token: Option<&str>, id: &LessonId) -> Result<(), ApiError> {
        let path = format!("lessons/{id}");
        self.execute(self.request(Method::DELETE, &path, token))
            .await
    }

    async fn list_questions(
        &self,
        token: Option<&str>,
        course: &CourseId,
    ) -> Result<Vec<Question>, ApiError> {
        let path = format!("questions/course/{course}");
        let body: Envelope<Vec<QuestionBody>> =
            self.fetch(self.request(Method::GET, &path, token)).await?;
        Ok(body
            .data
            .into_iter()
            .map(QuestionBody::into_question)
            .collect())
    }

    async fn get_question(
        &self,
        token: Option<&str>,
        id: &QuestionId,
    ) -> Result<Question, ApiError> {
        let path = format!("questions/{id}");
        let body: Envelope<QuestionDetail> =
            self.fetch(self.request(Method::GET, &path, token)).await?;
        Ok(body.data.into_question())
    }

    async fn create_question(
        &self,
        token: Option<&str>,
        course: &CourseId,
        question: &ValidQuestion,
    ) -> Result<(), ApiError> {
        self.execute(
            self.request(Method::POST, "questions", token)
                .json(&QuestionPayload::create(course, question)),
        )
        .await
    }

    async fn update_question(
        &self,
        token: Option<&str>,
        id: &QuestionId,
        question: &ValidQuestion,
    ) -> Result<(), ApiError> {
        let path = format!("questions/{id}");
        self.execute(
            self.request(Method::PUT, &path, token)
                .json(&QuestionPayload::update(question)),
        )
        .await
    }

    async fn delete_question(
        &self,
        token: Option<&str>,
        id: &QuestionId,
    ) -> Result<(), ApiError> {
        let path = format!("questions/{id}");
        self.execute(self.request(Method::DELETE, &path, token))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_follows_extension() {
        assert_eq!(video_mime("intro.MP4"), "video/mp4");
        assert_eq!(video_mime("clip.mov"), "video/quicktime");
        assert_eq!(video_mime("noext"), "application/octet-stream");
    }

    #[test]
    fn client_builds_from_default_config() {
        let api = HttpApi::new(ApiConfig::default()).unwrap();
        assert_eq!(api.config().base_url, crate::config::DEFAULT_API_URL);
    }
}
