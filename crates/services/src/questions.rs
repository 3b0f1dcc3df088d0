use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use learningstack_core::model::{
    CourseId, Question, QuestionDraft, QuestionId, UNKNOWN_COURSE, ValidQuestion,
};
use storage::repository::Storage;

use crate::api::LearningApi;
use crate::error::QuestionServiceError;

// ─── Manager state ─────────────────────────────────────────────────────────────

/// State of the question manager page for one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionManager {
    course_id: CourseId,
    questions: Vec<Question>,
    form: Option<QuestionForm>,
    deleting: HashSet<QuestionId>,
}

/// The create/edit dialog. `editing` is `None` for a new question.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionForm {
    pub editing: Option<QuestionId>,
    pub draft: QuestionDraft,
    pub saving: bool,
}

impl QuestionManager {
    #[must_use]
    pub fn new(course_id: CourseId, questions: Vec<Question>) -> Self {
        Self {
            course_id,
            questions,
            form: None,
            deleting: HashSet::new(),
        }
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn form(&self) -> Option<&QuestionForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut QuestionForm> {
        self.form.as_mut()
    }

    #[must_use]
    pub fn is_deleting(&self, id: &QuestionId) -> bool {
        self.deleting.contains(id)
    }

    /// Opens an empty form with four blank options.
    pub fn open_new(&mut self) {
        self.form = Some(QuestionForm::default());
    }

    /// Opens the form pre-filled with a question loaded from the server.
    pub fn open_edit(&mut self, id: QuestionId, draft: QuestionDraft) {
        self.form = Some(QuestionForm {
            editing: Some(id),
            draft,
            saving: false,
        });
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Validates the open form and marks it saving. Returns `None` when no
    /// form is open or a save is already running.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Invalid` with the first failed rule.
    pub fn begin_save(
        &mut self,
    ) -> Result<Option<(Option<QuestionId>, ValidQuestion)>, QuestionServiceError> {
        let Some(form) = self.form.as_mut() else {
            return Ok(None);
        };
        if form.saving {
            return Ok(None);
        }
        let valid = form.draft.validate()?;
        form.saving = true;
        Ok(Some((form.editing.clone(), valid)))
    }

    /// A successful save closes the form and replaces the list with the
    /// reloaded questions; a failed one keeps the form open.
    pub fn finish_save(&mut self, reloaded: Option<Vec<Question>>) {
        match reloaded {
            Some(questions) => {
                self.questions = questions;
                self.form = None;
            }
            None => {
                if let Some(form) = self.form.as_mut() {
                    form.saving = false;
                }
            }
        }
    }

    /// Returns `false` when the delete is already running.
    pub fn begin_delete(&mut self, id: &QuestionId) -> bool {
        self.deleting.insert(id.clone())
    }

    /// The question leaves the list only once the server confirmed.
    pub fn finish_delete(&mut self, id: &QuestionId, deleted: bool) {
        self.deleting.remove(id);
        if deleted {
            self.questions.retain(|question| question.id != *id);
        }
    }
}

// ─── Service ───────────────────────────────────────────────────────────────────

/// Backend calls of the question manager.
#[derive(Clone)]
pub struct QuestionService {
    api: Arc<dyn LearningApi>,
    storage: Storage,
}

impl QuestionService {
    #[must_use]
    pub fn new(api: Arc<dyn LearningApi>, storage: Storage) -> Self {
        Self { api, storage }
    }

    async fn token(&self) -> Result<Option<String>, QuestionServiceError> {
        Ok(self.storage.token().await?)
    }

    /// # Errors
    ///
    /// Returns `QuestionServiceError::Request` when the fetch fails.
    pub async fn list(&self, course: &CourseId) -> Result<Vec<Question>, QuestionServiceError> {
        let token = self.token().await?;
        Ok(self
            .api
            .list_questions(token.as_deref(), course)
            .await
            .map_err(|err| err.with_fallback("Failed to fetch questions"))?)
    }

    /// Header title for the manager page.
    pub async fn course_title(&self, course: &CourseId) -> String {
        let token = self.storage.token().await.ok().flatten();
        self.api
            .get_course(token.as_deref(), course)
            .await
            .ok()
            .map(|course| course.title)
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_COURSE.to_owned())
    }

    /// Loads one question into an editable draft.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Request` when the fetch fails.
    pub async fn load_draft(&self, id: &QuestionId) -> Result<QuestionDraft, QuestionServiceError> {
        let token = self.token().await?;
        let question = self
            .api
            .get_question(token.as_deref(), id)
            .await
            .map_err(|err| err.with_fallback("Failed to fetch question details"))?;
        Ok(QuestionDraft::from_question(&question))
    }

    /// Updates `editing` when set, else creates a question in `course`, then
    /// reloads the course's questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Request` when the save or the reload
    /// fails.
    pub async fn save(
        &self,
        course: &CourseId,
        editing: Option<&QuestionId>,
        question: &ValidQuestion,
    ) -> Result<Vec<Question>, QuestionServiceError> {
        let token = self.token().await?;
        match editing {
            Some(id) => {
                self.api
                    .update_question(token.as_deref(), id, question)
                    .await
                    .map_err(|err| err.with_fallback("Failed to update question"))?;
                info!(question = %id, "question updated");
            }
            None => {
                self.api
                    .create_question(token.as_deref(), course, question)
                    .await
                    .map_err(|err| err.with_fallback("Failed to create question"))?;
                info!(course = %course, "question created");
            }
        }
        self.list(course).await
    }

    /// # Errors
    ///
    /// Returns `QuestionServiceError::Request` when the server refuses.
    pub async fn delete(&self, id: &QuestionId) -> Result<(), QuestionServiceError> {
        let token = self.token().await?;
        self.api
            .delete_question(token.as_deref(), id)
            .await
            .map_err(|err| err.with_fallback("Failed to delete question"))?;
        info!(question = %id, "question deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryApi;
    use learningstack_core::model::{CourseDraft, QuestionError};

    fn filled_draft() -> QuestionDraft {
        let mut draft = QuestionDraft::default();
        draft.text = "2+2?".into();
        for (option, text) in draft.options.iter_mut().zip(["3", "4", "5", "6"]) {
            option.text = text.into();
        }
        draft.correct = Some(1);
        draft
    }

    async fn setup() -> (QuestionService, CourseId) {
        let api = InMemoryApi::new();
        let details = CourseDraft::new("Math", "Sums").validate().unwrap();
        let course = api.create_course(None, &details).await.unwrap().id;
        (QuestionService::new(Arc::new(api), Storage::in_memory()), course)
    }

    #[test]
    fn invalid_form_stays_open_and_unsaved() {
        let mut manager = QuestionManager::new(CourseId::new("c1"), Vec::new());
        manager.open_new();
        let err = manager.begin_save().unwrap_err();
        assert!(matches!(
            err,
            QuestionServiceError::Invalid(QuestionError::EmptyText)
        ));
        assert!(!manager.form().unwrap().saving);
    }

    #[test]
    fn failed_save_keeps_form() {
        let mut manager = QuestionManager::new(CourseId::new("c1"), Vec::new());
        manager.open_new();
        manager.form_mut().unwrap().draft = filled_draft();
        assert!(manager.begin_save().unwrap().is_some());
        assert!(manager.begin_save().unwrap().is_none());
        manager.finish_save(None);
        assert!(manager.form().is_some_and(|form| !form.saving));
    }

    #[tokio::test]
    async fn create_then_edit_then_delete() {
        let (service, course) = setup().await;
        let mut manager = QuestionManager::new(course.clone(), Vec::new());

        manager.open_new();
        manager.form_mut().unwrap().draft = filled_draft();
        let (editing, valid) = manager.begin_save().unwrap().unwrap();
        let reloaded = service.save(&course, editing.as_ref(), &valid).await.unwrap();
        manager.finish_save(Some(reloaded));
        assert!(manager.form().is_none());
        assert_eq!(manager.questions().len(), 1);
        assert_eq!(manager.questions()[0].correct_index(), Some(1));

        let id = manager.questions()[0].id.clone();
        let mut draft = service.load_draft(&id).await.unwrap();
        assert_eq!(draft.correct, Some(1));
        draft.text = "3+1?".into();
        manager.open_edit(id.clone(), draft);
        let (editing, valid) = manager.begin_save().unwrap().unwrap();
        assert_eq!(editing.as_ref(), Some(&id));
        let reloaded = service.save(&course, editing.as_ref(), &valid).await.unwrap();
        manager.finish_save(Some(reloaded));
        assert_eq!(manager.questions()[0].text, "3+1?");

        assert!(manager.begin_delete(&id));
        service.delete(&id).await.unwrap();
        manager.finish_delete(&id, true);
        assert!(manager.questions().is_empty());
    }

    #[tokio::test]
    async fn unknown_course_title_falls_back() {
        let (service, course) = setup().await;
        assert_eq!(service.course_title(&course).await, "Math");
        assert_eq!(
            service.course_title(&CourseId::new("missing")).await,
            UNKNOWN_COURSE
        );
    }
}
