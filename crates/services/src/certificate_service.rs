use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::Rng;
use tracing::info;

use learningstack_core::Clock;
use learningstack_core::model::{
    CERTIFICATE_ID_ALPHABET, CERTIFICATE_ID_LEN, Certificate, CertificateError, CertificateId,
    CourseId, UNKNOWN_COURSE,
};
use storage::repository::Storage;

use crate::api::LearningApi;
use crate::error::CertificateServiceError;

/// Builds completion certificates on the client. Nothing is recorded on the
/// server.
#[derive(Clone)]
pub struct CertificateService {
    api: Arc<dyn LearningApi>,
    storage: Storage,
    clock: Clock,
    download_dir: PathBuf,
}

/// Eight random characters from the certificate alphabet, prefixed.
///
/// # Errors
///
/// Returns `CertificateError::InvalidId` if the body is rejected.
pub fn generate_certificate_id<R: Rng + ?Sized>(
    rng: &mut R,
) -> Result<CertificateId, CertificateError> {
    let body: String = (0..CERTIFICATE_ID_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CERTIFICATE_ID_ALPHABET.len());
            char::from(CERTIFICATE_ID_ALPHABET[idx])
        })
        .collect();
    CertificateId::from_body(&body)
}

impl CertificateService {
    #[must_use]
    pub fn new(
        api: Arc<dyn LearningApi>,
        storage: Storage,
        clock: Clock,
        download_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            api,
            storage,
            clock,
            download_dir: download_dir.into(),
        }
    }

    #[must_use]
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// New certificate for `course`, dated today, with the signed-in
    /// student's name filled in when known. An unreachable course is
    /// named "Unknown Course".
    ///
    /// # Errors
    ///
    /// Returns `CertificateServiceError::Certificate` if no id can be made.
    pub async fn issue(&self, course: &CourseId) -> Result<Certificate, CertificateServiceError> {
        let token = self.storage.token().await.ok().flatten();
        let course_name = self
            .api
            .get_course(token.as_deref(), course)
            .await
            .ok()
            .map(|course| course.title)
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_COURSE.to_owned());

        let id = generate_certificate_id(&mut rand::rng())?;
        let mut certificate = Certificate::new(course_name, self.clock.today(), id);
        if let Ok(Some(user)) = self.storage.user().await {
            certificate.student_name = user.name;
        }
        info!(course = %course, certificate = %certificate.id, "certificate issued");
        Ok(certificate)
    }

    /// Writes the SVG into the download directory.
    ///
    /// # Errors
    ///
    /// Returns `CertificateServiceError::Certificate` while a name is missing
    /// and `CertificateServiceError::Io` when the file cannot be written.
    /// A file name that does not land directly in the download directory is
    /// `CertificateServiceError::OutsideDownloadDir`.
    pub async fn save(&self, certificate: &Certificate) -> Result<PathBuf, CertificateServiceError> {
        certificate.ensure_downloadable()?;
        let path = self.download_dir.join(certificate.file_name());
        if path.parent() != Some(self.download_dir.as_path()) {
            return Err(CertificateServiceError::OutsideDownloadDir(path));
        }
        tokio::fs::create_dir_all(&self.download_dir).await?;
        tokio::fs::write(&path, certificate.render_svg()).await?;
        info!(path = %path.display(), "certificate saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryApi;
    use learningstack_core::model::{CourseDraft, User};
    use learningstack_core::time::fixed_clock;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_ids_parse_back() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let id = generate_certificate_id(&mut rng).unwrap();
            assert_eq!(id.as_str().len(), 3 + CERTIFICATE_ID_LEN);
            assert_eq!(id.as_str().parse::<CertificateId>().unwrap(), id);
        }
    }

    #[tokio::test]
    async fn issue_and_save_with_stored_student() {
        let api = InMemoryApi::new();
        let details = CourseDraft::new("Rust", "Basics").validate().unwrap();
        let course = api.create_course(None, &details).await.unwrap().id;
        let storage = Storage::in_memory();
        storage
            .save_user(&User {
                name: "Ada".into(),
                ..User::default()
            })
            .await
            .unwrap();
        let dir = std::env::temp_dir().join(format!("learningstack-cert-{}", std::process::id()));
        let service = CertificateService::new(Arc::new(api), storage, fixed_clock(), &dir);

        let certificate = service.issue(&course).await.unwrap();
        assert_eq!(certificate.course_name, "Rust");
        assert_eq!(certificate.date_label(), "2023-11-14");

        let path = service.save(&certificate).await.unwrap();
        assert!(path.ends_with("Ada-Certificate.svg"));
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Ada"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn hostile_student_names_save_inside_download_dir() {
        let dir = std::env::temp_dir()
            .join(format!("learningstack-cert-names-{}", std::process::id()))
            .join("downloads");
        let service = CertificateService::new(
            Arc::new(InMemoryApi::new()),
            Storage::in_memory(),
            fixed_clock(),
            &dir,
        );
        let mut certificate = service.issue(&CourseId::new("gone")).await.unwrap();

        for name in ["AC/DC", "../escaped", "/tmp/abs"] {
            certificate.student_name = name.into();
            let path = service.save(&certificate).await.unwrap();
            assert_eq!(path.parent(), Some(dir.as_path()), "for {name:?}");
            assert!(path.is_file(), "for {name:?}");
        }
        let _ = std::fs::remove_dir_all(dir.parent().unwrap());
    }

    #[tokio::test]
    async fn unknown_course_and_missing_student() {
        let service = CertificateService::new(
            Arc::new(InMemoryApi::new()),
            Storage::in_memory(),
            fixed_clock(),
            std::env::temp_dir(),
        );
        let certificate = service.issue(&CourseId::new("gone")).await.unwrap();
        assert_eq!(certificate.course_name, UNKNOWN_COURSE);
        assert!(matches!(
            service.save(&certificate).await,
            Err(CertificateServiceError::Certificate(
                CertificateError::MissingStudentName
            ))
        ));
    }
}
