use std::sync::mpsc;
use std::time::Duration;

use anonykeys_core::{update, AppState, Msg};
use eframe::egui;
use shell_logging::{shell_info, shell_warn};

use super::config::{self, AppConfig};
use super::effects::EffectRunner;
use super::frame::FramePane;
use super::{fonts, logging, ui};

/// How often the UI wakes up while the frame is still loading.
const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app() -> eframe::Result<()> {
    let (config, config_error) = match config::load() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    logging::initialize(config.log_destination, config.level_filter());
    if let Some(err) = config_error {
        shell_warn!("Using default configuration: {}", err);
    }
    shell_info!(
        "Starting AnonyKeys (language={}, close transition={}ms)",
        config.language,
        config.close_transition_ms
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([560.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "anonykeys",
        options,
        Box::new(move |cc| Ok(Box::new(BrowserShell::new(cc, &config)))),
    )
}

struct BrowserShell {
    state: AppState,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
    effects: EffectRunner,
    frame: FramePane,
}

impl BrowserShell {
    fn new(cc: &eframe::CreationContext<'_>, config: &AppConfig) -> Self {
        ui::theme::apply(&cc.egui_ctx);
        fonts::install(&cc.egui_ctx, &config.font_paths);

        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            state: AppState::with_options(config.state_options()),
            effects: EffectRunner::new(msg_tx.clone(), cc.egui_ctx.clone()),
            msg_tx,
            msg_rx,
            frame: FramePane::new(config.fetch_settings()),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.run(effects, &mut self.frame);
    }

    /// Messages posted from outside the UI thread (close timers).
    fn drain_inbox(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
        }
    }
}

impl eframe::App for BrowserShell {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_inbox();
        if self.frame.poll() {
            ctx.request_repaint_after(LOAD_POLL_INTERVAL);
        }

        let view = self.state.view();
        let mut msgs = ui::toolbar::show(ctx, &view);
        msgs.extend(ui::settings::show(ctx, &view));
        let content = ui::content::show(ctx, &view, &self.frame);
        msgs.extend(content.msgs);

        for msg in msgs {
            let _ = self.msg_tx.send(msg);
        }
        self.drain_inbox();
        if let Some(url) = content.follow {
            self.frame.follow(url);
        }

        if self.state.consume_dirty() {
            ctx.request_repaint();
        }
    }
}
