use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the REST backend lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub download_dir: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            download_dir: PathBuf::from("."),
        }
    }
}

impl ApiConfig {
    /// Reads `LEARNSTACK_API_URL`, `LEARNSTACK_API_TIMEOUT_SECS` and
    /// `LEARNSTACK_DOWNLOAD_DIR`, falling back to defaults for anything unset
    /// or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = env::var("LEARNSTACK_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.base_url);
        let timeout = env::var("LEARNSTACK_API_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.trim().parse::<u64>().ok())
            .map_or(defaults.timeout, Duration::from_secs);
        let download_dir = env::var_os("LEARNSTACK_DOWNLOAD_DIR")
            .map_or(defaults.download_dir, PathBuf::from);

        Self {
            base_url,
            timeout,
            download_dir,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Joins `path` onto the base URL with exactly one slash between them.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_with_single_slash() {
        let config = ApiConfig::default().with_base_url("http://host/api/");
        assert_eq!(config.endpoint("/courses/"), "http://host/api/courses/");
        assert_eq!(config.endpoint("lessons/uploadLesson"), "http://host/api/lessons/uploadLesson");
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
