use std::path::PathBuf;

use defprof_terminal::engine::TeamFilter;
use defprof_terminal::metrics::MetricId;
use defprof_terminal::registry::{SeasonRegistry, SeasonStore};
use defprof_terminal::state::{AppState, TOP_N_DEFAULT, TOP_N_MAX, TOP_N_MIN};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn fixture_store() -> SeasonStore {
    let seasons = vec![
        (
            "2025".to_string(),
            fixture_path("defensive_metrics_sample.csv"),
        ),
        (
            "2024".to_string(),
            fixture_path("defensive_metrics_legacy.csv"),
        ),
    ];
    SeasonStore::new(SeasonRegistry::with_seasons(seasons))
}

#[test]
fn new_state_loads_first_season_and_selects_first_player() {
    let state = AppState::new(fixture_store());
    assert_eq!(state.season_label(), Some("2025"));
    assert_eq!(state.table().len(), 10);
    // Options are sorted; the first alphabetical player is preselected.
    assert_eq!(state.player.as_deref(), Some("Bobby Witt Jr."));
    assert!(state.logs.iter().any(|l| l.starts_with("[INFO]")));
}

#[test]
fn profile_player_options_derive_from_profile_filter() {
    let mut state = AppState::new(fixture_store());
    // Teams sort to BAL first; one cycle moves off "(All)".
    state.cycle_profile_team();
    assert_eq!(state.profile_team, TeamFilter::Team("BAL".to_string()));
    assert_eq!(state.player_options(), vec!["Gunnar Henderson"]);
    // The selection snapped into the new scope along with the options.
    let record = state.selected_record().expect("player resolves in scope");
    assert_eq!(record.team, "BAL");
}

#[test]
fn leaderboard_filter_is_independent_of_profile_selection() {
    let mut state = AppState::new(fixture_store());
    let before = state.player.clone();
    state.cycle_lb_team();
    assert_eq!(state.lb_team, TeamFilter::Team("BAL".to_string()));
    assert_eq!(state.profile_team, TeamFilter::All);
    assert_eq!(state.player, before);
    assert!(state.leaderboard_rows().iter().all(|r| r.team == "BAL"));
}

#[test]
fn season_cycle_keeps_player_present_in_both_seasons() {
    let mut state = AppState::new(fixture_store());
    state.player = Some("Matt Chapman".to_string());
    state.cycle_season();
    assert_eq!(state.season_label(), Some("2024"));
    assert_eq!(state.player.as_deref(), Some("Matt Chapman"));
}

#[test]
fn season_cycle_snaps_player_missing_from_new_season() {
    let mut state = AppState::new(fixture_store());
    state.player = Some("Derek Hill".to_string());
    state.cycle_season();
    assert_eq!(state.season_label(), Some("2024"));
    // Hill has no 2024 row; the cursor snaps to the first 2024 option.
    assert_eq!(state.player.as_deref(), Some("Andres Gimenez"));
}

#[test]
fn season_cycle_failure_keeps_previous_season_active() {
    let seasons = vec![
        (
            "2025".to_string(),
            fixture_path("defensive_metrics_sample.csv"),
        ),
        ("2024".to_string(), fixture_path("no_such_season.csv")),
    ];
    let mut state = AppState::new(SeasonStore::new(SeasonRegistry::with_seasons(seasons)));
    assert_eq!(state.season_label(), Some("2025"));
    state.cycle_season();
    assert_eq!(state.season_label(), Some("2025"));
    assert_eq!(state.table().len(), 10);
    assert!(state.logs.back().is_some_and(|l| l.starts_with("[WARN]")));
}

#[test]
fn revisited_season_hits_the_session_cache() {
    let mut state = AppState::new(fixture_store());
    state.cycle_season();
    state.cycle_season();
    assert_eq!(state.season_label(), Some("2025"));
    assert!(state.store().is_cached("2025"));
    assert!(state.store().is_cached("2024"));
    assert!(
        state
            .logs
            .back()
            .is_some_and(|l| l.contains("from session cache"))
    );
}

#[test]
fn season_cycle_drops_team_filter_missing_from_new_season() {
    let mut state = AppState::new(fixture_store());
    // SDP exists only in the 2025 fixture.
    state.profile_team = TeamFilter::Team("SDP".to_string());
    state.cycle_season();
    assert_eq!(state.profile_team, TeamFilter::All);
}

#[test]
fn top_n_is_clamped_to_its_range() {
    let mut state = AppState::new(fixture_store());
    assert_eq!(state.top_n, TOP_N_DEFAULT);
    for _ in 0..10 {
        state.decrease_top_n();
    }
    assert_eq!(state.top_n, TOP_N_MIN);
    for _ in 0..30 {
        state.increase_top_n();
    }
    assert_eq!(state.top_n, TOP_N_MAX);
}

#[test]
fn leaderboard_rows_exclude_players_missing_the_metric() {
    let state = AppState::new(fixture_store());
    assert_eq!(state.sort_metric, MetricId::Oaa);
    let rows = state.leaderboard_rows();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0].player, "Bobby Witt Jr.");
    assert!(!rows.iter().any(|r| r.player == "Patrick Bailey"));
    assert!(rows.windows(2).all(|w| w[0].value >= w[1].value));
}

#[test]
fn player_cycling_wraps_in_both_directions() {
    let mut state = AppState::new(fixture_store());
    let options = state.player_options();
    state.select_prev_player();
    assert_eq!(state.player.as_deref(), options.last().map(String::as_str));
    state.select_next_player();
    assert_eq!(state.player.as_deref(), options.first().map(String::as_str));
}
