//! egui panels. Each `show` reads the view model and returns the messages the
//! user produced this frame; none of them touch `AppState` directly.
pub mod content;
pub mod settings;
pub mod theme;
pub mod toolbar;

use anonykeys_core::TextDirection;
use eframe::egui::{self, Align, Layout, Ui};

/// One row laid out in the reading direction of the current language.
pub fn direction_row<R>(
    ui: &mut Ui,
    direction: TextDirection,
    add_contents: impl FnOnce(&mut Ui) -> R,
) -> R {
    let layout = match direction {
        TextDirection::LeftToRight => Layout::left_to_right(Align::Center),
        TextDirection::RightToLeft => Layout::right_to_left(Align::Center),
    };
    let size = egui::vec2(ui.available_width(), ui.spacing().interact_size.y);
    ui.allocate_ui_with_layout(size, layout, add_contents).inner
}
