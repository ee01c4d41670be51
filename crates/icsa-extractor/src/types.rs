use serde::{Deserialize, Serialize};

/// Body posted to start an export run.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRequest {
    #[serde(rename = "postUrl")]
    pub post_url: String,
    pub format: String,
}

/// Wrapper the export API places around payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

/// Export run metadata.
///
/// The download link has gone by several names across service versions;
/// all the known ones are captured and tried in preference order.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportJob {
    pub id: String,
    pub status: String,
    #[serde(rename = "downloadUrl")]
    pub download_url: Option<String>,
    #[serde(rename = "fileUrl")]
    pub file_url: Option<String>,
    #[serde(rename = "resultUrl")]
    pub result_url: Option<String>,
}

impl ExportJob {
    /// First populated download link, in preference order.
    #[must_use]
    pub fn download_link(&self) -> Option<&str> {
        self.download_url
            .as_deref()
            .or(self.file_url.as_deref())
            .or(self.result_url.as_deref())
    }
}

/// Client timing knobs: request timeout, poll deadline, poll cadence.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub request_timeout_secs: u64,
    pub poll_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        PollSettings {
            request_timeout_secs: 30,
            poll_timeout_secs: 60,
            poll_interval_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(download: Option<&str>, file: Option<&str>, result: Option<&str>) -> ExportJob {
        ExportJob {
            id: "run-1".to_string(),
            status: "completed".to_string(),
            download_url: download.map(str::to_string),
            file_url: file.map(str::to_string),
            result_url: result.map(str::to_string),
        }
    }

    #[test]
    fn download_link_prefers_fields_in_order() {
        assert_eq!(
            job(Some("/a"), Some("/b"), Some("/c")).download_link(),
            Some("/a")
        );
        assert_eq!(job(None, Some("/b"), Some("/c")).download_link(), Some("/b"));
        assert_eq!(job(None, None, Some("/c")).download_link(), Some("/c"));
        assert_eq!(job(None, None, None).download_link(), None);
    }
}
