use crate::{Language, NavigationId, TextDirection, Toggles, Translations};

/// Sandbox permissions granted to the embedded frame. Fixed; not user-configurable.
pub const FRAME_SANDBOX: &str = "allow-same-origin allow-scripts allow-popups allow-forms";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub query: String,
    pub language: Language,
    pub direction: TextDirection,
    pub labels: &'static Translations,
    pub toggles: Toggles,
    pub settings_open: bool,
    pub content: ContentView,
    pub dirty: bool,
}

/// What the main area shows. Results and a frame are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentView {
    Idle { hint: &'static str },
    Results(Vec<ResultRowView>),
    Frame(FrameView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub index: usize,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameView {
    pub navigation_id: NavigationId,
    pub url: String,
    /// The close transition is running; the frame is fading out.
    pub closing: bool,
}
