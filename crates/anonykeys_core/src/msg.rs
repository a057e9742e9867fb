use crate::{Language, NavigationId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the address bar.
    InputChanged(String),
    /// User pressed Enter or the search button.
    Submitted,
    /// User picked an entry from the placeholder result list.
    ResultSelected { index: usize },
    /// User clicked the close button on the frame header.
    CloseClicked,
    /// The close transition for `navigation_id` has finished.
    CloseCommitted { navigation_id: NavigationId },
    IncognitoToggled(bool),
    AdBlockToggled(bool),
    VpnToggled(bool),
    LanguageSelected(Language),
    SettingsOpened,
    SettingsClosed,
}
