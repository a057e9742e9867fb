use std::sync::{mpsc, Arc};
use std::thread;

use shell_logging::{shell_debug, shell_error, shell_info, shell_warn};

use crate::decode::{decode_body, media_type_of};
use crate::fetch::{ChannelProgressSink, FetchSettings, Fetcher, ReqwestFetcher};
use crate::{
    DocumentRenderer, EngineEvent, FailureKind, FetchError, FetchOutput, FetchRequest,
    FrameDocument, FramePage, LoadId, LoadProgress, Stage,
};

enum EngineCommand {
    Load { load_id: LoadId, request: FetchRequest },
}

/// Loads pages for the embedded frame on a background runtime.
///
/// Completions arrive in whatever order the network finishes them; callers match
/// on `load_id` and drop anything they no longer care about.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Self {
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(settings)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    shell_error!("Frame engine could not start its runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn load(&self, load_id: LoadId, request: FetchRequest) {
        shell_info!("Frame load {} -> {}", load_id, request.url);
        let _ = self.cmd_tx.send(EngineCommand::Load { load_id, request });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    fetcher: &dyn Fetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Load { load_id, request } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let _ = event_tx.send(EngineEvent::Progress(LoadProgress {
                load_id,
                stage: Stage::Queued,
                bytes: None,
            }));
            let result = fetcher
                .fetch(load_id, &request, &sink)
                .await
                .and_then(|output| {
                    let _ = event_tx.send(EngineEvent::Progress(LoadProgress {
                        load_id,
                        stage: Stage::Decoding,
                        bytes: Some(output.metadata.byte_len),
                    }));
                    build_frame_page(output)
                });
            match &result {
                Ok(page) => {
                    shell_debug!("Frame load {} rendered {}", load_id, page.final_url);
                    let _ = event_tx.send(EngineEvent::Progress(LoadProgress {
                        load_id,
                        stage: Stage::Done,
                        bytes: Some(page.byte_len),
                    }));
                }
                Err(err) => shell_warn!("Frame load {} failed: {}", load_id, err),
            }
            let _ = event_tx.send(EngineEvent::LoadCompleted { load_id, result });
        }
    }
}

/// Turns a finished download into something the frame can show.
///
/// Non-2xx responses are failures here; HTML is rendered to text with links
/// resolved against the final URL, anything else is shown verbatim.
pub fn build_frame_page(output: FetchOutput) -> Result<FramePage, FetchError> {
    let metadata = output.metadata;
    if !(200..300).contains(&metadata.status) {
        return Err(FetchError::new(
            FailureKind::HttpStatus(metadata.status),
            format!("upstream answered {}", metadata.status),
        ));
    }

    let decoded = decode_body(&output.bytes, metadata.content_type.as_deref());
    let is_html = metadata
        .content_type
        .as_deref()
        .map(media_type_of)
        .map_or(true, |media| media == "text/html" || media == "application/xhtml+xml");
    let document = if is_html {
        DocumentRenderer::new().render(&decoded.text, Some(&metadata.final_url))
    } else if is_textual(metadata.content_type.as_deref()) {
        FrameDocument::plain(decoded.text)
    } else {
        return Err(FetchError::new(
            FailureKind::ProcessingError,
            format!(
                "cannot display {}",
                metadata.content_type.as_deref().unwrap_or("binary content")
            ),
        ));
    };

    Ok(FramePage {
        final_url: metadata.final_url,
        content_type: metadata.content_type,
        encoding_label: decoded.encoding_label,
        lossy: decoded.lossy,
        redirect_count: metadata.redirect_count,
        byte_len: metadata.byte_len,
        document,
    })
}

fn is_textual(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return true;
    };
    let media = media_type_of(content_type);
    media.starts_with("text/")
        || media == "application/json"
        || media == "application/xml"
        || media.ends_with("+json")
        || media.ends_with("+xml")
}
