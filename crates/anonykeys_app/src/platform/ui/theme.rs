use eframe::egui::{self, Color32, CornerRadius, Stroke};

pub const BACKGROUND: Color32 = Color32::from_rgb(0x1a, 0x1a, 0x1a);
pub const SURFACE: Color32 = Color32::from_rgb(0x2d, 0x2d, 0x2d);
pub const SURFACE_RAISED: Color32 = Color32::from_rgb(0x3d, 0x3d, 0x3d);
pub const ACCENT: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
pub const TEXT: Color32 = Color32::from_rgb(0xe5, 0xe5, 0xe5);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf);
pub const ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71);

pub const RADIUS: u8 = 8;

pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = SURFACE;
    visuals.extreme_bg_color = SURFACE;
    visuals.override_text_color = Some(TEXT);
    visuals.hyperlink_color = ACCENT;
    visuals.selection.bg_fill = ACCENT;
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);

    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.corner_radius = CornerRadius::same(RADIUS);
    }
    visuals.widgets.inactive.bg_fill = SURFACE;
    visuals.widgets.inactive.weak_bg_fill = SURFACE;
    visuals.widgets.hovered.bg_fill = SURFACE_RAISED;
    visuals.widgets.hovered.weak_bg_fill = SURFACE_RAISED;
    visuals.widgets.active.bg_fill = ACCENT;
    visuals.widgets.active.weak_bg_fill = ACCENT;

    ctx.set_theme(egui::Theme::Dark);
    ctx.set_visuals_of(egui::Theme::Dark, visuals);
}
