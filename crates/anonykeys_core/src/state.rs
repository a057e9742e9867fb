use std::time::Duration;

use crate::view_model::{AppViewModel, ContentView, FrameView, ResultRowView};
use crate::{Language, SearchResult};

pub type NavigationId = u64;

/// Length of the close animation before the target is actually cleared.
pub const DEFAULT_CLOSE_TRANSITION: Duration = Duration::from_millis(300);

/// The settings drawer switches. They only ever change their own value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Toggles {
    pub incognito: bool,
    pub ad_block: bool,
    pub vpn: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateOptions {
    pub language: Language,
    /// Zero clears the target as soon as close is clicked.
    pub close_transition: Duration,
}

impl Default for StateOptions {
    fn default() -> Self {
        Self {
            language: Language::default(),
            close_transition: DEFAULT_CLOSE_TRANSITION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveTarget {
    navigation_id: NavigationId,
    url: String,
    closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    query: String,
    target: Option<ActiveTarget>,
    results: Vec<SearchResult>,
    toggles: Toggles,
    language: Language,
    settings_open: bool,
    close_transition: Duration,
    next_navigation_id: NavigationId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_options(StateOptions::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: StateOptions) -> Self {
        Self {
            query: String::new(),
            target: None,
            results: Vec::new(),
            toggles: Toggles::default(),
            language: options.language,
            settings_open: false,
            close_transition: options.close_transition,
            next_navigation_id: 1,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let labels = self.language.translations();
        let content = match (&self.target, self.results.is_empty()) {
            (Some(target), _) => ContentView::Frame(FrameView {
                navigation_id: target.navigation_id,
                url: target.url.clone(),
                closing: target.closing,
            }),
            (None, false) => ContentView::Results(
                self.results
                    .iter()
                    .enumerate()
                    .map(|(index, result)| ResultRowView {
                        index,
                        title: result.title.clone(),
                        url: result.url.clone(),
                    })
                    .collect(),
            ),
            (None, true) => ContentView::Idle { hint: labels.search },
        };

        AppViewModel {
            query: self.query.clone(),
            language: self.language,
            direction: self.language.direction(),
            labels,
            toggles: self.toggles,
            settings_open: self.settings_open,
            content,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn target_url(&self) -> Option<&str> {
        self.target.as_ref().map(|target| target.url.as_str())
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn toggles(&self) -> Toggles {
        self.toggles
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_closing(&self) -> bool {
        self.target.as_ref().is_some_and(|target| target.closing)
    }

    pub(crate) fn close_transition(&self) -> Duration {
        self.close_transition
    }

    pub(crate) fn set_query(&mut self, text: String) {
        if self.query != text {
            self.query = text;
            self.mark_dirty();
        }
    }

    /// Points the frame at `url`, replacing any current target and dropping results.
    pub(crate) fn navigate(&mut self, url: String) -> NavigationId {
        let navigation_id = self.next_navigation_id;
        self.next_navigation_id += 1;
        self.results.clear();
        self.target = Some(ActiveTarget {
            navigation_id,
            url,
            closing: false,
        });
        self.mark_dirty();
        navigation_id
    }

    /// Replaces the result list. Returns the navigation that was displaced, if any.
    pub(crate) fn show_results(&mut self, results: Vec<SearchResult>) -> Option<NavigationId> {
        let displaced = self.target.take().map(|target| target.navigation_id);
        self.results = results;
        self.mark_dirty();
        displaced
    }

    pub(crate) fn result_url(&self, index: usize) -> Option<String> {
        self.results.get(index).map(|result| result.url.clone())
    }

    /// Flags the active target as closing. Returns its id when a close actually started.
    pub(crate) fn begin_close(&mut self) -> Option<NavigationId> {
        let target = self.target.as_mut()?;
        if target.closing {
            return None;
        }
        target.closing = true;
        let navigation_id = target.navigation_id;
        self.mark_dirty();
        Some(navigation_id)
    }

    /// Clears the target if it is still `navigation_id`.
    pub(crate) fn clear_target(&mut self, navigation_id: NavigationId) -> bool {
        match &self.target {
            Some(target) if target.navigation_id == navigation_id => {
                self.target = None;
                self.mark_dirty();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn closing_navigation(&self) -> Option<NavigationId> {
        self.target
            .as_ref()
            .filter(|target| target.closing)
            .map(|target| target.navigation_id)
    }

    pub(crate) fn update_toggles(&mut self, apply: impl FnOnce(&mut Toggles)) {
        let before = self.toggles;
        apply(&mut self.toggles);
        if before != self.toggles {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_language(&mut self, language: Language) {
        if self.language != language {
            self.language = language;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_settings_open(&mut self, open: bool) {
        if self.settings_open != open {
            self.settings_open = open;
            self.mark_dirty();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
