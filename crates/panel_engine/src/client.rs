use std::path::Path;

use futures_util::StreamExt;
use panel_logging::{panel_debug, panel_info};
use reqwest::multipart::{Form, Part};
use tokio::sync::mpsc::unbounded_channel;
use tokio_util::io::ReaderStream;
use tokio_util::sync::CancellationToken;

use crate::{
    EngineEvent, EngineSettings, FailureKind, ServerReply, TransferError, TransferId,
    UploadProgress, UploadRequest,
};

const ZIP_CONTENT_TYPE: &str = "application/zip";

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// The two ways of getting assets into a project.
#[async_trait::async_trait]
pub trait ImportClient: Send + Sync {
    /// Streams a zip file as a single multipart request.
    async fn upload(
        &self,
        id: TransferId,
        request: &UploadRequest,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<ServerReply, TransferError>;

    /// Asks the server to fetch the assets from `url` itself.
    async fn import_url(&self, id: TransferId, url: &str) -> Result<ServerReply, TransferError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestImportClient {
    settings: EngineSettings,
}

impl ReqwestImportClient {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, TransferError> {
        // No overall timeout: large archives go up in one long request.
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .build()
            .map_err(|err| TransferError::new(FailureKind::Network, err.to_string()))
    }

    fn post(&self, client: &reqwest::Client) -> Result<reqwest::RequestBuilder, TransferError> {
        let endpoint = self.settings.endpoint()?;
        let mut builder = client.post(endpoint);
        if let Some(csrf) = &self.settings.csrf {
            builder = builder.header(csrf.header.as_str(), csrf.token.as_str());
        }
        Ok(builder)
    }
}

#[async_trait::async_trait]
impl ImportClient for ReqwestImportClient {
    async fn upload(
        &self,
        id: TransferId,
        request: &UploadRequest,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<ServerReply, TransferError> {
        let client = self.build_client()?;
        let builder = self.post(&client)?;

        let file = tokio::fs::File::open(&request.path)
            .await
            .map_err(|err| file_error(&request.path, err))?;
        let total_bytes = file
            .metadata()
            .await
            .map_err(|err| file_error(&request.path, err))?
            .len();

        // Pre-send: every import needs a task name.
        let name = request
            .name
            .clone()
            .unwrap_or_else(|| self.settings.default_task_name());
        let file_name = request
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("assets.zip")
            .to_string();

        let (progress_tx, mut progress_rx) = unbounded_channel::<u64>();
        let mut bytes_read = 0u64;
        let stream = ReaderStream::with_capacity(file, self.settings.progress_chunk_size.max(1))
            .map(move |chunk| {
                if let Ok(bytes) = &chunk {
                    bytes_read += bytes.len() as u64;
                    let _ = progress_tx.send(bytes_read);
                }
                chunk
            });
        let part = Part::stream_with_length(reqwest::Body::wrap_stream(stream), total_bytes)
            .file_name(file_name)
            .mime_str(ZIP_CONTENT_TYPE)
            .map_err(map_reqwest_error)?;
        let form = Form::new().text("name", name.clone()).part("file", part);

        panel_info!(
            "Upload {} sending {:?} ({} bytes) as {:?}",
            id,
            request.path,
            total_bytes,
            name
        );
        sink.emit(EngineEvent::UploadSending { id });
        sink.emit(progress_event(id, 0, total_bytes));

        let send = builder.multipart(form).send();
        tokio::pin!(send);
        let response = loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(TransferError::new(FailureKind::Cancelled, "upload cancelled"));
                }
                Some(bytes_sent) = progress_rx.recv() => {
                    sink.emit(progress_event(id, bytes_sent, total_bytes));
                }
                result = &mut send => break result.map_err(map_reqwest_error)?,
            }
        };
        while let Ok(bytes_sent) = progress_rx.try_recv() {
            sink.emit(progress_event(id, bytes_sent, total_bytes));
        }

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = tokio::select! {
            _ = cancel.cancelled() => {
                return Err(TransferError::new(FailureKind::Cancelled, "upload cancelled"));
            }
            body = response.text() => body.map_err(map_reqwest_error)?,
        };
        panel_debug!("Upload {} finished with status {}", id, status);
        Ok(ServerReply {
            status: status.as_u16(),
            body,
        })
    }

    async fn import_url(&self, id: TransferId, url: &str) -> Result<ServerReply, TransferError> {
        let client = self.build_client()?;
        let payload = serde_json::json!({
            "url": url,
            "name": self.settings.default_task_name(),
        });
        panel_info!("URL import {} posting url_len={}", id, url.len());

        let response = self
            .post(&client)?
            .json(&payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        Ok(ServerReply {
            status: status.as_u16(),
            body,
        })
    }
}

fn progress_event(id: TransferId, bytes_sent: u64, total_bytes: u64) -> EngineEvent {
    let percent = if total_bytes == 0 {
        100.0
    } else {
        bytes_sent as f64 * 100.0 / total_bytes as f64
    };
    EngineEvent::UploadProgress(UploadProgress {
        id,
        percent,
        bytes_sent,
        total_bytes,
    })
}

fn file_error(path: &Path, err: std::io::Error) -> TransferError {
    TransferError::new(FailureKind::FileRead, format!("{}: {err}", path.display()))
}

fn map_reqwest_error(err: reqwest::Error) -> TransferError {
    if err.is_timeout() {
        return TransferError::new(FailureKind::Timeout, err.to_string());
    }
    if let Some(status) = err.status() {
        return TransferError::new(FailureKind::HttpStatus(status.as_u16()), err.to_string());
    }
    TransferError::new(FailureKind::Network, err.to_string())
}
