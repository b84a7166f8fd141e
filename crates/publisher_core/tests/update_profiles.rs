use publisher_core::{update, AppState, Effect, Msg, NewProfile, NoticeLevel, Profile};

fn profile(name: &str) -> Profile {
    Profile {
        name: name.to_string(),
        url: format!("https://{name}.example.com"),
        username: "editor".to_string(),
    }
}

fn connected(name: &str) -> AppState {
    let (state, _) = update(AppState::new(), Msg::ProfileChosen(name.to_string()));
    let (state, _) = update(
        state,
        Msg::ProfileLoaded {
            name: name.to_string(),
            result: Ok(profile(name)),
        },
    );
    state
}

#[test]
fn startup_requests_profiles_directory_and_files() {
    let (_, effects) = update(AppState::new(), Msg::Started);
    assert_eq!(
        effects,
        vec![
            Effect::LoadProfiles,
            Effect::LoadDirectory { request: 1 },
            Effect::LoadFiles { request: 1 },
        ]
    );
}

#[test]
fn loaded_profiles_are_listed() {
    let (state, _) = update(
        AppState::new(),
        Msg::ProfilesLoaded(Ok(vec![profile("blog-A"), profile("blog-B")])),
    );
    let names: Vec<_> = state.view().profiles.into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["blog-A", "blog-B"]);
}

#[test]
fn selecting_a_profile_refreshes_its_catalog() {
    let (state, effects) = update(AppState::new(), Msg::ProfileChosen("blog-A".into()));
    assert_eq!(effects, vec![Effect::LoadProfile { name: "blog-A".into() }]);
    assert!(state.current_profile().is_none());

    let (state, effects) = update(
        state,
        Msg::ProfileLoaded {
            name: "blog-A".into(),
            result: Ok(profile("blog-A")),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::RefreshCatalog {
            profile: "blog-A".into(),
            request: 1,
        }]
    );
    assert_eq!(state.current_profile().map(|p| p.name.as_str()), Some("blog-A"));
    assert!(state.catalog().belongs_to("blog-A"));
}

#[test]
fn superseded_profile_load_is_ignored() {
    let (state, _) = update(AppState::new(), Msg::ProfileChosen("blog-A".into()));
    let (state, _) = update(state, Msg::ProfileChosen("blog-B".into()));
    let (state, effects) = update(
        state,
        Msg::ProfileLoaded {
            name: "blog-A".into(),
            result: Ok(profile("blog-A")),
        },
    );
    assert!(effects.is_empty());
    assert!(state.current_profile().is_none());
}

#[test]
fn empty_name_clears_the_profile() {
    let (state, effects) = update(connected("blog-A"), Msg::ProfileChosen("  ".into()));
    assert!(effects.is_empty());
    assert!(state.current_profile().is_none());
    assert_eq!(state.catalog().profile(), None);
}

#[test]
fn create_profile_validates_then_reloads_list() {
    let incomplete = NewProfile {
        name: "blog-C".into(),
        url: String::new(),
        username: "ann".into(),
        app_password: "secret".into(),
    };
    let (mut state, effects) = update(AppState::new(), Msg::ProfileCreateRequested(incomplete));
    assert!(effects.is_empty());
    assert_eq!(state.take_notices()[0].level, NoticeLevel::Warning);

    let complete = NewProfile {
        name: "blog-C".into(),
        url: "https://c.example.com".into(),
        username: "ann".into(),
        app_password: "secret".into(),
    };
    let (state, effects) = update(state, Msg::ProfileCreateRequested(complete.clone()));
    assert_eq!(effects, vec![Effect::CreateProfile(complete)]);

    let (_, effects) = update(
        state,
        Msg::ProfileCreated {
            name: "blog-C".into(),
            result: Ok(()),
        },
    );
    assert_eq!(effects, vec![Effect::LoadProfiles]);
}

#[test]
fn deleting_the_current_profile_clears_it() {
    let (state, effects) = update(
        connected("blog-A"),
        Msg::ProfileDeleteRequested("blog-A".into()),
    );
    assert_eq!(effects, vec![Effect::DeleteProfile { name: "blog-A".into() }]);

    let (state, effects) = update(
        state,
        Msg::ProfileDeleted {
            name: "blog-A".into(),
            result: Ok(()),
        },
    );
    assert_eq!(effects, vec![Effect::LoadProfiles]);
    assert!(state.current_profile().is_none());
}

#[test]
fn deleting_another_profile_keeps_the_current_one() {
    let (state, _) = update(
        connected("blog-A"),
        Msg::ProfileDeleted {
            name: "blog-B".into(),
            result: Ok(()),
        },
    );
    assert_eq!(state.current_profile().map(|p| p.name.as_str()), Some("blog-A"));
}

#[test]
fn connection_test_reports_outcome() {
    let (state, effects) = update(AppState::new(), Msg::ConnectionTestRequested("blog-A".into()));
    assert_eq!(effects, vec![Effect::TestConnection { name: "blog-A".into() }]);

    let (mut state, _) = update(
        state,
        Msg::ConnectionTested {
            name: "blog-A".into(),
            result: Err("bad credentials".into()),
        },
    );
    let notices = state.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].message.contains("bad credentials"));
}
