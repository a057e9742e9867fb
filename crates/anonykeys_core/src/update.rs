use std::time::Duration;

use shell_logging::{shell_debug, shell_trace};

use crate::{classify, placeholder_results, AppState, Effect, InputIntent, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_query(text);
            Vec::new()
        }
        Msg::Submitted => submit(&mut state),
        Msg::ResultSelected { index } => match state.result_url(index) {
            Some(url) => {
                let navigation_id = state.navigate(url.clone());
                shell_debug!("Result {} selected, navigation {} -> {}", index, navigation_id, url);
                vec![Effect::LoadFrame { navigation_id, url }]
            }
            None => Vec::new(),
        },
        Msg::CloseClicked => {
            let delay = state.close_transition();
            match state.begin_close() {
                Some(navigation_id) if delay == Duration::ZERO => {
                    state.clear_target(navigation_id);
                    shell_debug!("Navigation {} closed", navigation_id);
                    vec![Effect::UnloadFrame { navigation_id }]
                }
                Some(navigation_id) => {
                    shell_debug!("Navigation {} closing in {:?}", navigation_id, delay);
                    vec![Effect::ScheduleCloseCommit {
                        navigation_id,
                        delay,
                    }]
                }
                None => Vec::new(),
            }
        }
        Msg::CloseCommitted { navigation_id } => {
            // A newer navigation may have replaced the one that started closing.
            if state.closing_navigation() == Some(navigation_id)
                && state.clear_target(navigation_id)
            {
                shell_debug!("Navigation {} closed", navigation_id);
                vec![Effect::UnloadFrame { navigation_id }]
            } else {
                shell_trace!("Ignoring stale close commit for {}", navigation_id);
                Vec::new()
            }
        }
        Msg::IncognitoToggled(on) => {
            state.update_toggles(|toggles| toggles.incognito = on);
            Vec::new()
        }
        Msg::AdBlockToggled(on) => {
            state.update_toggles(|toggles| toggles.ad_block = on);
            Vec::new()
        }
        Msg::VpnToggled(on) => {
            state.update_toggles(|toggles| toggles.vpn = on);
            Vec::new()
        }
        Msg::LanguageSelected(language) => {
            state.set_language(language);
            Vec::new()
        }
        Msg::SettingsOpened => {
            state.set_settings_open(true);
            Vec::new()
        }
        Msg::SettingsClosed => {
            state.set_settings_open(false);
            Vec::new()
        }
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    match classify(state.query()) {
        InputIntent::Empty => Vec::new(),
        InputIntent::Navigate(url) => {
            let navigation_id = state.navigate(url.clone());
            shell_debug!("Navigation {} -> {}", navigation_id, url);
            vec![Effect::LoadFrame { navigation_id, url }]
        }
        InputIntent::Search(query) => {
            let results = placeholder_results(&query, state.language());
            shell_debug!("Search for {:?} produced {} results", query, results.len());
            match state.show_results(results) {
                Some(navigation_id) => vec![Effect::UnloadFrame { navigation_id }],
                None => Vec::new(),
            }
        }
    }
}
