use anonykeys_core::{AppViewModel, ContentView, FrameView, Msg, ResultRowView, FRAME_SANDBOX};
use anonykeys_engine::{FramePage, LinkKind, Stage};
use eframe::egui::{self, Frame, Margin, RichText, ScrollArea};

use super::theme;
use crate::platform::frame::{FramePane, FrameStatus};

/// Seconds the frame takes to fade out once close is clicked.
const FADE_SECONDS: f32 = 0.25;

/// What the user did in the main area this frame.
#[derive(Debug, Default)]
pub struct ContentOutput {
    pub msgs: Vec<Msg>,
    /// A link clicked inside the frame; handled by the frame, not the view state.
    pub follow: Option<String>,
}

pub fn show(ctx: &egui::Context, view: &AppViewModel, frame: &FramePane) -> ContentOutput {
    let mut output = ContentOutput::default();

    egui::CentralPanel::default()
        .frame(Frame::new().fill(theme::BACKGROUND).inner_margin(Margin::same(16)))
        .show(ctx, |ui| match &view.content {
            ContentView::Idle { hint } => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new(*hint).size(28.0).color(theme::TEXT_MUTED));
                });
            }
            ContentView::Results(rows) => {
                output.msgs.extend(results(ui, view, rows));
            }
            ContentView::Frame(frame_view) => {
                output = frame_area(ui, view, frame_view, frame);
            }
        });

    output
}

fn results(ui: &mut egui::Ui, view: &AppViewModel, rows: &[ResultRowView]) -> Vec<Msg> {
    let mut msgs = Vec::new();
    ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for row in rows {
                Frame::new()
                    .fill(theme::SURFACE)
                    .corner_radius(theme::RADIUS)
                    .inner_margin(Margin::same(12))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        super::direction_row(ui, view.direction, |ui| {
                            if ui.link(RichText::new(&row.title).size(18.0)).clicked() {
                                msgs.push(Msg::ResultSelected { index: row.index });
                            }
                        });
                        super::direction_row(ui, view.direction, |ui| {
                            ui.label(RichText::new(&row.url).monospace().color(theme::TEXT_MUTED));
                        });
                    });
                ui.add_space(8.0);
            }
        });
    msgs
}

fn frame_area(
    ui: &mut egui::Ui,
    view: &AppViewModel,
    frame_view: &FrameView,
    pane: &FramePane,
) -> ContentOutput {
    let mut output = ContentOutput::default();

    let opacity = ui.ctx().animate_bool_with_time(
        egui::Id::new(("frame_fade", frame_view.navigation_id)),
        !frame_view.closing,
        FADE_SECONDS,
    );
    ui.set_opacity(opacity);

    Frame::new()
        .fill(theme::SURFACE)
        .corner_radius(theme::RADIUS)
        .inner_margin(Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            super::direction_row(ui, view.direction, |ui| {
                if ui
                    .add_enabled(!frame_view.closing, egui::Button::new(view.labels.close))
                    .clicked()
                {
                    output.msgs.push(Msg::CloseClicked);
                }
                let shown = pane.current_url().unwrap_or(&frame_view.url);
                ui.label(RichText::new(shown).monospace());
            });
            ui.label(
                RichText::new(format!("sandbox: {FRAME_SANDBOX}"))
                    .small()
                    .color(theme::TEXT_MUTED),
            );
        });
    ui.add_space(8.0);

    match pane.status_for(frame_view.navigation_id) {
        None => {
            ui.centered_and_justified(|ui| ui.spinner());
        }
        Some(FrameStatus::Loading { stage, bytes }) => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new(loading_line(*stage, *bytes)).color(theme::TEXT_MUTED));
            });
        }
        Some(FrameStatus::Failed(err)) => {
            ui.colored_label(theme::ERROR, err.to_string());
        }
        Some(FrameStatus::Loaded(page)) => {
            output.follow = page_body(ui, page);
        }
    }

    output
}

/// Draws a rendered page; returns the link the user clicked, if any.
fn page_body(ui: &mut egui::Ui, page: &FramePage) -> Option<String> {
    let mut follow = None;
    ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            if let Some(title) = &page.document.title {
                ui.heading(title);
            }
            ui.label(RichText::new(page_summary(page)).small().color(theme::TEXT_MUTED));
            ui.add_space(6.0);
            ui.add(egui::Label::new(&page.document.text).selectable(true));

            let hyperlinks = page
                .document
                .links
                .iter()
                .enumerate()
                .filter(|(_, link)| link.kind == LinkKind::Hyperlink)
                .collect::<Vec<_>>();
            if hyperlinks.is_empty() {
                return;
            }
            ui.add_space(12.0);
            ui.separator();
            for (index, link) in hyperlinks {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("[{}]", index + 1)).monospace());
                    let text = link.text.as_deref().unwrap_or(&link.url);
                    if ui.link(text).on_hover_text(&link.url).clicked() {
                        follow = Some(link.url.clone());
                    }
                });
            }
        });
    follow
}

fn loading_line(stage: Stage, bytes: Option<u64>) -> String {
    let stage = match stage {
        Stage::Queued => "queued",
        Stage::Downloading => "downloading",
        Stage::Decoding => "decoding",
        Stage::Done => "done",
    };
    match bytes {
        Some(bytes) => format!("{stage} · {}", format_bytes(bytes)),
        None => stage.to_string(),
    }
}

/// One muted line under the title: media type, charset, size and how we got there.
fn page_summary(page: &FramePage) -> String {
    let mut parts = vec![
        page.content_type
            .as_deref()
            .unwrap_or("unknown type")
            .to_string(),
        page.encoding_label.clone(),
        format_bytes(page.byte_len),
    ];
    match page.redirect_count {
        0 => {}
        1 => parts.push("1 redirect".to_string()),
        n => parts.push(format!("{n} redirects")),
    }
    if page.lossy {
        parts.push("some bytes could not be decoded".to_string());
    }
    parts.join(" · ")
}

fn format_bytes(bytes: u64) -> String {
    match bytes {
        0..=1023 => format!("{bytes} B"),
        1024..=1_048_575 => format!("{:.1} KiB", bytes as f64 / 1024.0),
        _ => format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0)),
    }
}

#[cfg(test)]
mod tests {
    use anonykeys_engine::FrameDocument;

    use super::*;

    #[test]
    fn byte_counts_are_humanized() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MiB");
    }

    #[test]
    fn loading_line_names_the_stage() {
        assert_eq!(loading_line(Stage::Queued, None), "queued");
        assert_eq!(loading_line(Stage::Downloading, Some(2048)), "downloading · 2.0 KiB");
    }

    #[test]
    fn summary_lists_fetch_details() {
        let mut page = FramePage {
            final_url: "https://example.com/".to_string(),
            content_type: Some("text/html; charset=windows-1251".to_string()),
            encoding_label: "windows-1251".to_string(),
            lossy: false,
            redirect_count: 0,
            byte_len: 512,
            document: FrameDocument::plain("hello"),
        };
        assert_eq!(
            page_summary(&page),
            "text/html; charset=windows-1251 · windows-1251 · 512 B"
        );

        page.content_type = None;
        page.redirect_count = 2;
        page.lossy = true;
        assert_eq!(
            page_summary(&page),
            "unknown type · windows-1251 · 512 B · 2 redirects · some bytes could not be decoded"
        );
    }
}
