use std::sync::Once;
use std::time::Duration;

use anonykeys_core::{
    update, AppState, ContentView, Effect, Language, Msg, StateOptions, PLACEHOLDER_RESULT_COUNT,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(shell_logging::initialize_for_tests);
}

fn immediate_close_state() -> AppState {
    AppState::with_options(StateOptions {
        language: Language::English,
        close_transition: Duration::ZERO,
    })
}

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::Submitted)
}

#[test]
fn bare_host_navigates_with_https_prefix() {
    init_logging();
    let (mut state, effects) = submit(AppState::new(), "  example.com ");

    assert_eq!(state.target_url(), Some("https://example.com"));
    assert!(state.results().is_empty());
    assert_eq!(
        effects,
        vec![Effect::LoadFrame {
            navigation_id: 1,
            url: "https://example.com".to_string(),
        }]
    );
    assert!(state.consume_dirty());
}

#[test]
fn schemed_input_navigates_unchanged() {
    init_logging();
    for input in ["http://example.com/path", "https://example.com/?q=1"] {
        let (state, _effects) = submit(AppState::new(), input);
        assert_eq!(state.target_url(), Some(input));
    }
}

#[test]
fn query_text_survives_submission() {
    init_logging();
    let (state, _effects) = submit(AppState::new(), " example.com ");
    assert_eq!(state.query(), " example.com ");
}

#[test]
fn whitespace_submission_changes_nothing() {
    init_logging();
    let (state, _effects) = submit(AppState::new(), "example.com");
    let (mut state, _effects) = update(state, Msg::InputChanged("   \t".to_string()));
    state.consume_dirty();
    let before = state.clone();

    let (mut next, effects) = update(state, Msg::Submitted);

    assert_eq!(next, before);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}

#[test]
fn non_url_input_shows_placeholder_results() {
    init_logging();
    let state = immediate_close_state();
    let (state, effects) = submit(state, "electric kettle");

    assert!(effects.is_empty());
    assert_eq!(state.target_url(), None);
    match state.view().content {
        ContentView::Results(rows) => {
            assert_eq!(rows.len(), PLACEHOLDER_RESULT_COUNT);
            assert_eq!(rows[0].title, "electric kettle");
            assert_eq!(rows[2].title, "Buy electric kettle");
            assert_eq!(rows[2].url, "https://amazon.com");
        }
        other => panic!("expected results, got {other:?}"),
    }
}

#[test]
fn search_replaces_an_active_target() {
    init_logging();
    let (state, _effects) = submit(AppState::new(), "example.com");
    let (state, effects) = submit(state, "what is rust");

    assert_eq!(state.target_url(), None);
    assert_eq!(state.results().len(), PLACEHOLDER_RESULT_COUNT);
    assert_eq!(effects, vec![Effect::UnloadFrame { navigation_id: 1 }]);
}

#[test]
fn url_replaces_results() {
    init_logging();
    let (state, _effects) = submit(AppState::new(), "what is rust");
    let (state, effects) = submit(state, "rust-lang.org");

    assert!(state.results().is_empty());
    assert_eq!(state.target_url(), Some("https://rust-lang.org"));
    assert_eq!(effects.len(), 1);
}

#[test]
fn selecting_a_result_navigates_and_clears_results() {
    init_logging();
    let (state, _effects) = submit(immediate_close_state(), "electric kettle");
    let chosen = state.results()[1].url.clone();

    let (state, effects) = update(state, Msg::ResultSelected { index: 1 });

    assert!(state.results().is_empty());
    assert_eq!(state.target_url(), Some(chosen.as_str()));
    assert_eq!(
        effects,
        vec![Effect::LoadFrame {
            navigation_id: 1,
            url: "https://en.wikipedia.org".to_string(),
        }]
    );
    assert!(matches!(state.view().content, ContentView::Frame(_)));
}

#[test]
fn selecting_out_of_range_result_is_ignored() {
    init_logging();
    let (mut state, _effects) = submit(AppState::new(), "electric kettle");
    state.consume_dirty();
    let before = state.clone();

    let (next, effects) = update(state, Msg::ResultSelected { index: 99 });

    assert_eq!(next, before);
    assert!(effects.is_empty());
}

#[test]
fn results_and_target_are_never_both_present() {
    init_logging();
    let inputs = [
        "example.com",
        "two words",
        "https://rust-lang.org",
        "more words here",
    ];
    let mut state = AppState::new();
    for input in inputs {
        let (next, _effects) = submit(state, input);
        assert!(next.target_url().is_none() || next.results().is_empty());
        state = next;
    }
    let (state, _effects) = update(state, Msg::ResultSelected { index: 0 });
    assert!(state.results().is_empty());
    assert!(state.target_url().is_some());
}

#[test]
fn navigation_ids_increase() {
    init_logging();
    let (state, first) = submit(AppState::new(), "a.example");
    let (_state, second) = submit(state, "b.example");

    let ids: Vec<_> = first
        .iter()
        .chain(second.iter())
        .filter_map(|effect| match effect {
            Effect::LoadFrame { navigation_id, .. } => Some(*navigation_id),
            _ => None,
        })
        .collect();
    assert_eq!(ids, vec![1, 2]);
}
