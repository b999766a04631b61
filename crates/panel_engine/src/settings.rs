use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::{FailureKind, TransferError};

/// Header/token pair the server expects on every state-changing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken {
    pub header: String,
    pub token: String,
}

pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct EngineSettings {
    pub server_url: String,
    pub project_id: u64,
    pub csrf: Option<CsrfToken>,
    /// Only bounds connection setup; the request itself may run indefinitely.
    pub connect_timeout: Duration,
    /// Read granularity of the upload stream, which sets how often progress is reported.
    pub progress_chunk_size: usize,
    /// Source of the timestamp embedded in default task names.
    pub now_utc: Clock,
}

impl EngineSettings {
    pub fn new(server_url: impl Into<String>, project_id: u64) -> Self {
        Self {
            server_url: server_url.into(),
            project_id,
            csrf: None,
            connect_timeout: Duration::from_secs(10),
            progress_chunk_size: 64 * 1024,
            now_utc: Arc::new(crate::iso_timestamp_now),
        }
    }

    /// `{server_url}/api/projects/{project_id}/tasks/import`
    pub fn endpoint(&self) -> Result<Url, TransferError> {
        let base = Url::parse(&self.server_url)
            .map_err(|err| TransferError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(TransferError::new(
                FailureKind::InvalidEndpoint,
                format!("{} cannot be used as a base url", self.server_url),
            ));
        }
        let path = format!(
            "{}/api/projects/{}/tasks/import",
            base.path().trim_end_matches('/'),
            self.project_id
        );
        let mut endpoint = base;
        endpoint.set_path(&path);
        endpoint.set_query(None);
        Ok(endpoint)
    }

    pub(crate) fn default_task_name(&self) -> String {
        crate::default_task_name(&(self.now_utc)())
    }
}

impl fmt::Debug for EngineSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineSettings")
            .field("server_url", &self.server_url)
            .field("project_id", &self.project_id)
            .field("csrf_header", &self.csrf.as_ref().map(|csrf| &csrf.header))
            .field("connect_timeout", &self.connect_timeout)
            .field("progress_chunk_size", &self.progress_chunk_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_project_scoped() {
        let settings = EngineSettings::new("http://localhost:8000", 12);
        assert_eq!(
            settings.endpoint().unwrap().as_str(),
            "http://localhost:8000/api/projects/12/tasks/import"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let settings = EngineSettings::new("https://example.com/panel/", 3);
        assert_eq!(
            settings.endpoint().unwrap().as_str(),
            "https://example.com/panel/api/projects/3/tasks/import"
        );
    }

    #[test]
    fn invalid_base_is_reported() {
        let settings = EngineSettings::new("not a url", 1);
        assert_eq!(
            settings.endpoint().unwrap_err().kind,
            FailureKind::InvalidEndpoint
        );

        let settings = EngineSettings::new("mailto:someone@example.com", 1);
        assert_eq!(
            settings.endpoint().unwrap_err().kind,
            FailureKind::InvalidEndpoint
        );
    }

    #[test]
    fn default_name_uses_injected_clock() {
        let mut settings = EngineSettings::new("http://localhost", 1);
        settings.now_utc = Arc::new(|| "2020-01-02T03:04:05.006Z".to_string());
        assert_eq!(
            settings.default_task_name(),
            "Task of 2020-01-02T03:04:05.006Z"
        );
    }
}
