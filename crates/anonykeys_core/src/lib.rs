//! AnonyKeys core: pure view state, input classification and translation tables.
mod classify;
mod effect;
mod language;
mod msg;
mod state;
mod update;
mod view_model;

pub use classify::{
    classify, has_http_scheme, normalize_target, placeholder_results, InputIntent, SearchResult,
    PLACEHOLDER_RESULT_COUNT,
};
pub use effect::Effect;
pub use language::{Language, PlaceholderTemplates, TextDirection, Translations};
pub use msg::Msg;
pub use state::{AppState, NavigationId, StateOptions, Toggles, DEFAULT_CLOSE_TRANSITION};
pub use update::update;
pub use view_model::{AppViewModel, ContentView, FrameView, ResultRowView, FRAME_SANDBOX};
