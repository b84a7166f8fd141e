use publisher_core::{update, AppState, Effect, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn start_requests_initial_loads() {
    let (_state, effects) = update(AppState::new(), Msg::Started);
    assert_eq!(
        effects,
        vec![
            Effect::LoadProfiles,
            Effect::LoadDirectory { request: 1 },
            Effect::LoadFiles { request: 1 },
        ]
    );
}
