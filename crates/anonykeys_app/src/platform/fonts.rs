use std::path::PathBuf;

use eframe::egui;
use shell_logging::{shell_info, shell_warn};

/// Registers the configured font files ahead of egui's defaults.
///
/// egui's bundled fonts carry no Arabic glyphs, so an Arabic UI needs at least one
/// font with that coverage here. Unreadable files are skipped with a warning.
pub fn install(ctx: &egui::Context, paths: &[PathBuf]) {
    if paths.is_empty() {
        return;
    }

    let mut fonts = egui::FontDefinitions::default();
    let mut inserted = Vec::new();
    for (index, path) in paths.iter().enumerate() {
        match std::fs::read(path) {
            Ok(bytes) => {
                let name = format!("configured-{index}");
                fonts
                    .font_data
                    .insert(name.clone(), egui::FontData::from_owned(bytes).into());
                inserted.push(name);
                shell_info!("Loaded font {}", path.display());
            }
            Err(err) => shell_warn!("Skipping font {}: {}", path.display(), err),
        }
    }

    if inserted.is_empty() {
        return;
    }
    if let Some(proportional) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
        for name in inserted.iter().rev() {
            proportional.insert(0, name.clone());
        }
    }
    if let Some(monospace) = fonts.families.get_mut(&egui::FontFamily::Monospace) {
        monospace.extend(inserted);
    }

    ctx.set_fonts(fonts);
}
