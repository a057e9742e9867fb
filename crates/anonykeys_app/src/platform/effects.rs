use std::sync::mpsc;
use std::thread;

use anonykeys_core::{Effect, Msg};
use eframe::egui;
use shell_logging::{shell_debug, shell_info};

use super::frame::FramePane;

/// Carries out the effects returned by `update`.
///
/// Frame effects go straight to the pane; the staged close is a timer thread that
/// posts `CloseCommitted` back into the message queue and wakes the UI.
pub struct EffectRunner {
    msg_tx: mpsc::Sender<Msg>,
    repaint: egui::Context,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>, repaint: egui::Context) -> Self {
        Self { msg_tx, repaint }
    }

    pub fn run(&self, effects: Vec<Effect>, frame: &mut FramePane) {
        for effect in effects {
            match effect {
                Effect::LoadFrame { navigation_id, url } => {
                    shell_info!("LoadFrame navigation_id={} url={}", navigation_id, url);
                    frame.load(navigation_id, url);
                }
                Effect::UnloadFrame { navigation_id } => {
                    frame.unload(navigation_id);
                }
                Effect::ScheduleCloseCommit {
                    navigation_id,
                    delay,
                } => {
                    shell_debug!(
                        "Close of navigation {} commits in {:?}",
                        navigation_id,
                        delay
                    );
                    let msg_tx = self.msg_tx.clone();
                    let repaint = self.repaint.clone();
                    thread::spawn(move || {
                        thread::sleep(delay);
                        if msg_tx.send(Msg::CloseCommitted { navigation_id }).is_ok() {
                            repaint.request_repaint();
                        }
                    });
                }
            }
        }
    }
}
