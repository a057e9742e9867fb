use anonykeys_core::{AppViewModel, Msg};
use eframe::egui::{self, Button, Frame, Key, Margin, RichText, TextEdit};

use super::theme;

/// Both buttons are icons, so their width does not depend on the language.
const ICON_BUTTON_SIZE: egui::Vec2 = egui::vec2(36.0, 28.0);
const SEARCH_ICON: &str = "🔍";
const SETTINGS_ICON: &str = "⚙";
const MIN_INPUT_WIDTH: f32 = 120.0;

/// Address bar, search button and the settings switch.
pub fn show(ctx: &egui::Context, view: &AppViewModel) -> Vec<Msg> {
    let mut msgs = Vec::new();

    egui::TopBottomPanel::top("toolbar")
        .frame(
            Frame::new()
                .fill(theme::SURFACE)
                .inner_margin(Margin::symmetric(12, 8)),
        )
        .show(ctx, |ui| {
            super::direction_row(ui, view.direction, |ui| {
                ui.label(RichText::new("AnonyKeys").strong().color(theme::ACCENT));

                let mut query = view.query.clone();
                let input_width = input_width(ui.available_width(), ui.spacing().item_spacing.x);
                let input = ui.add(
                    TextEdit::singleline(&mut query)
                        .hint_text(view.labels.search_placeholder)
                        .desired_width(input_width),
                );
                let search = ui
                    .add(
                        Button::new(SEARCH_ICON)
                            .fill(theme::ACCENT)
                            .min_size(ICON_BUTTON_SIZE),
                    )
                    .on_hover_text(view.labels.search);
                let settings_text = RichText::new(SETTINGS_ICON);
                let settings = ui
                    .add(
                        Button::new(if view.settings_open {
                            settings_text.color(theme::ACCENT)
                        } else {
                            settings_text
                        })
                        .min_size(ICON_BUTTON_SIZE),
                    )
                    .on_hover_text(view.labels.settings);

                if input.changed() {
                    msgs.push(Msg::InputChanged(query));
                }
                let entered = input.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                if entered || search.clicked() {
                    msgs.push(Msg::Submitted);
                }
                if settings.clicked() {
                    msgs.push(if view.settings_open {
                        Msg::SettingsClosed
                    } else {
                        Msg::SettingsOpened
                    });
                }
            });
        });

    msgs
}

/// Room left for the address bar once both icon buttons and their gaps are placed.
fn input_width(available: f32, spacing: f32) -> f32 {
    (available - 2.0 * (ICON_BUTTON_SIZE.x + spacing)).max(MIN_INPUT_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_leaves_room_for_both_buttons() {
        let available = 600.0;
        let spacing = 8.0;
        let used = input_width(available, spacing) + 2.0 * (ICON_BUTTON_SIZE.x + spacing);
        assert!(used <= available);
    }

    #[test]
    fn narrow_toolbar_keeps_a_usable_input() {
        assert_eq!(input_width(100.0, 8.0), MIN_INPUT_WIDTH);
    }

    #[test]
    fn button_labels_are_single_glyphs() {
        assert_eq!(SEARCH_ICON.chars().count(), 1);
        assert_eq!(SETTINGS_ICON.chars().count(), 1);
    }
}
