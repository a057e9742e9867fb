//! The embedded frame: loads whatever the view state points it at and keeps its
//! own navigation history of one. Nothing here reports back into `AppState`.

use anonykeys_core::NavigationId;
use anonykeys_engine::{
    EngineEvent, EngineHandle, FetchError, FetchRequest, FetchSettings, FramePage, LoadId, Stage,
};
use shell_logging::{shell_debug, shell_trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameStatus {
    Loading { stage: Stage, bytes: Option<u64> },
    Loaded(FramePage),
    Failed(FetchError),
}

#[derive(Debug)]
struct FrameLoad {
    navigation_id: NavigationId,
    load_id: LoadId,
    url: String,
    status: FrameStatus,
}

pub struct FramePane {
    engine: EngineHandle,
    next_load_id: LoadId,
    current: Option<FrameLoad>,
}

impl FramePane {
    pub fn new(settings: FetchSettings) -> Self {
        Self::from_engine(EngineHandle::new(settings))
    }

    #[cfg(test)]
    pub fn with_fetcher(fetcher: std::sync::Arc<dyn anonykeys_engine::Fetcher>) -> Self {
        Self::from_engine(EngineHandle::with_fetcher(fetcher))
    }

    fn from_engine(engine: EngineHandle) -> Self {
        Self {
            engine,
            next_load_id: 1,
            current: None,
        }
    }

    /// Starts showing `url` for `navigation_id`, replacing whatever was loaded.
    pub fn load(&mut self, navigation_id: NavigationId, url: String) {
        let load_id = self.allocate_load_id();
        self.engine.load(load_id, FetchRequest::new(url.clone()));
        self.current = Some(FrameLoad {
            navigation_id,
            load_id,
            url,
            status: FrameStatus::Loading {
                stage: Stage::Queued,
                bytes: None,
            },
        });
    }

    /// Drops the page if it still belongs to `navigation_id`.
    pub fn unload(&mut self, navigation_id: NavigationId) {
        if self.navigation_id() == Some(navigation_id) {
            shell_debug!("Frame unloaded for navigation {}", navigation_id);
            self.current = None;
        }
    }

    /// Follows a link inside the frame. The navigation id stays the same, so the
    /// view state keeps showing the URL the user originally asked for.
    pub fn follow(&mut self, url: String) {
        if let Some(navigation_id) = self.navigation_id() {
            shell_debug!("Frame follows link to {}", url);
            self.load(navigation_id, url);
        }
    }

    /// Applies finished engine work. Returns true while a load is still running.
    pub fn poll(&mut self) -> bool {
        while let Some(event) = self.engine.try_recv() {
            self.apply(event);
        }
        matches!(
            self.current.as_ref().map(|load| &load.status),
            Some(FrameStatus::Loading { .. })
        )
    }

    pub fn navigation_id(&self) -> Option<NavigationId> {
        self.current.as_ref().map(|load| load.navigation_id)
    }

    /// Status of the page shown for `navigation_id`, if that is what the frame holds.
    pub fn status_for(&self, navigation_id: NavigationId) -> Option<&FrameStatus> {
        self.current
            .as_ref()
            .filter(|load| load.navigation_id == navigation_id)
            .map(|load| &load.status)
    }

    /// URL the frame is currently on, which differs from the target after a followed link.
    pub fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|load| load.url.as_str())
    }

    fn apply(&mut self, event: EngineEvent) {
        let Some(load) = self.current.as_mut() else {
            return;
        };
        match event {
            EngineEvent::Progress(progress) if progress.load_id == load.load_id => {
                if let FrameStatus::Loading { stage, bytes } = &mut load.status {
                    *stage = progress.stage;
                    *bytes = progress.bytes.or(*bytes);
                }
            }
            EngineEvent::LoadCompleted { load_id, result } if load_id == load.load_id => {
                load.status = match result {
                    Ok(page) => {
                        load.url = page.final_url.clone();
                        FrameStatus::Loaded(page)
                    }
                    Err(err) => FrameStatus::Failed(err),
                };
            }
            _ => shell_trace!("Frame ignored an event for a superseded load"),
        }
    }

    fn allocate_load_id(&mut self) -> LoadId {
        let id = self.next_load_id;
        self.next_load_id += 1;
        id
    }
}
