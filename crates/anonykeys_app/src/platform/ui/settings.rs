use anonykeys_core::{AppViewModel, Language, Msg, TextDirection, Toggles};
use eframe::egui::{self, Frame, Margin, RichText};

use super::theme;

/// The drawer with the three switches and the language picker.
///
/// Opens on the trailing edge for the current reading direction.
pub fn show(ctx: &egui::Context, view: &AppViewModel) -> Vec<Msg> {
    let mut msgs = Vec::new();
    let panel = match view.direction {
        TextDirection::LeftToRight => egui::SidePanel::right("settings_drawer"),
        TextDirection::RightToLeft => egui::SidePanel::left("settings_drawer"),
    };

    panel
        .resizable(false)
        .default_width(260.0)
        .frame(
            Frame::new()
                .fill(theme::SURFACE)
                .inner_margin(Margin::same(16)),
        )
        .show_animated(ctx, view.settings_open, |ui| {
            let labels = view.labels;
            super::direction_row(ui, view.direction, |ui| {
                ui.heading(labels.settings);
                if ui.small_button("×").clicked() {
                    msgs.push(Msg::SettingsClosed);
                }
            });
            ui.separator();

            msgs.extend(toggle_rows(ui, view));

            ui.add_space(12.0);
            super::direction_row(ui, view.direction, |ui| {
                ui.label(RichText::new(labels.language).color(theme::TEXT_MUTED));
            });
            super::direction_row(ui, view.direction, |ui| {
                for language in Language::ALL {
                    if ui
                        .selectable_label(view.language == language, language.native_name())
                        .clicked()
                        && view.language != language
                    {
                        msgs.push(Msg::LanguageSelected(language));
                    }
                }
            });
        });

    msgs
}

fn toggle_rows(ui: &mut egui::Ui, view: &AppViewModel) -> Vec<Msg> {
    let labels = view.labels;
    let Toggles {
        mut incognito,
        mut ad_block,
        mut vpn,
    } = view.toggles;
    let mut msgs = Vec::new();

    super::direction_row(ui, view.direction, |ui| {
        if ui.checkbox(&mut incognito, labels.incognito).changed() {
            msgs.push(Msg::IncognitoToggled(incognito));
        }
    });
    super::direction_row(ui, view.direction, |ui| {
        if ui.checkbox(&mut ad_block, labels.ad_block).changed() {
            msgs.push(Msg::AdBlockToggled(ad_block));
        }
    });
    super::direction_row(ui, view.direction, |ui| {
        if ui.checkbox(&mut vpn, labels.vpn).changed() {
            msgs.push(Msg::VpnToggled(vpn));
        }
    });

    msgs
}
