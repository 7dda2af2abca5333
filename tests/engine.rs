use defprof_terminal::dataset::PlayerRecord;
use defprof_terminal::engine::{
    EngineError, TeamFilter, available_percentile_metrics, best_worst, filter_by_team, leaderboard,
    player_options, resolve_player, team_options,
};
use defprof_terminal::metrics::MetricId;

fn record(player: &str, team: &str, percentiles: [Option<f64>; 6]) -> PlayerRecord {
    PlayerRecord::new(player, team, 900, 27.0, [None; 6], percentiles)
}

fn sample_table() -> Vec<PlayerRecord> {
    vec![
        record(
            "Ana",
            "TeamX",
            [Some(90.0), Some(40.0), Some(70.0), None, Some(55.0), None],
        ),
        record(
            "Ben",
            "TeamX",
            [Some(90.0), Some(80.0), None, None, None, Some(60.0)],
        ),
        record("Cruz", "TeamY", [Some(40.0), None, None, None, None, None]),
        record("Dia", "TeamY", [None; 6]),
    ]
}

#[test]
fn team_filter_partitions_the_table() {
    let table = sample_table();
    let x = filter_by_team(&table, &TeamFilter::Team("TeamX".to_string()));
    let y = filter_by_team(&table, &TeamFilter::Team("TeamY".to_string()));
    assert!(x.iter().all(|r| r.team == "TeamX"));
    assert!(y.iter().all(|r| r.team == "TeamY"));
    assert_eq!(x.len() + y.len(), table.len());

    let all = filter_by_team(&table, &TeamFilter::All);
    assert_eq!(all.len(), table.len());
}

#[test]
fn unknown_team_yields_empty_rows_not_error() {
    let table = sample_table();
    let none = filter_by_team(&table, &TeamFilter::Team("TeamZ".to_string()));
    assert!(none.is_empty());
}

#[test]
fn resolve_player_is_exact_and_idempotent() {
    let table = sample_table();
    let rows = filter_by_team(&table, &TeamFilter::All);
    let first = resolve_player(&rows, "Ben").expect("Ben exists");
    let second = resolve_player(&rows, "Ben").expect("Ben exists");
    assert_eq!(first, second);
    assert_eq!(first.team, "TeamX");

    let missing = resolve_player(&rows, "ben");
    assert!(matches!(
        missing,
        Err(EngineError::PlayerNotFound { .. })
    ));
}

#[test]
fn available_metrics_follow_canonical_order() {
    let r = record(
        "Ana",
        "TeamX",
        [Some(10.0), None, None, Some(20.0), None, Some(30.0)],
    );
    assert_eq!(
        available_percentile_metrics(&r),
        vec![MetricId::Oaa, MetricId::Drp, MetricId::Frv]
    );
}

#[test]
fn best_worst_tie_prefers_first_canonical_metric() {
    let r = record("Ana", "TeamX", [Some(50.0); 6]);
    let available = available_percentile_metrics(&r);
    assert_eq!(available.len(), 6);
    assert_eq!(
        best_worst(&r, &available),
        Some((MetricId::Oaa, MetricId::Oaa))
    );
}

#[test]
fn best_worst_single_metric_is_both() {
    let r = record("Ana", "TeamX", [None, Some(75.0), None, None, None, None]);
    let available = available_percentile_metrics(&r);
    assert_eq!(available, vec![MetricId::Drs]);
    assert_eq!(
        best_worst(&r, &available),
        Some((MetricId::Drs, MetricId::Drs))
    );
}

#[test]
fn best_worst_empty_is_none() {
    let r = record("Dia", "TeamY", [None; 6]);
    assert_eq!(best_worst(&r, &[]), None);
}

#[test]
fn best_worst_only_returns_available_metrics() {
    let r = record(
        "Ana",
        "TeamX",
        [Some(90.0), Some(40.0), Some(70.0), None, Some(55.0), None],
    );
    let available = available_percentile_metrics(&r);
    let (best, worst) = best_worst(&r, &available).expect("metrics available");
    assert!(available.contains(&best));
    assert!(available.contains(&worst));
    assert_eq!(best, MetricId::Oaa);
    assert_eq!(worst, MetricId::Drs);
}

#[test]
fn leaderboard_sorts_descending_and_drops_missing() {
    let table = sample_table();
    let rows = leaderboard(&table, &TeamFilter::All, MetricId::Oaa, 10);
    // Dia has no OAA percentile and is excluded entirely.
    assert_eq!(rows.len(), 3);
    assert!(rows.windows(2).all(|w| w[0].value >= w[1].value));
    assert!(!rows.iter().any(|r| r.player == "Dia"));
}

#[test]
fn leaderboard_ties_keep_table_order() {
    // Ana and Ben tie at 90; Cruz trails at 40. The top-2 cut keeps the
    // tied pair in their original relative order and drops Cruz on count,
    // not on the tie.
    let table = sample_table();
    let rows = leaderboard(&table, &TeamFilter::All, MetricId::Oaa, 2);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].player, "Ana");
    assert_eq!(rows[1].player, "Ben");
}

#[test]
fn leaderboard_respects_team_filter_and_carries_disagreement() {
    let table = sample_table();
    let rows = leaderboard(
        &table,
        &TeamFilter::Team("TeamY".to_string()),
        MetricId::Oaa,
        10,
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].player, "Cruz");
    // Single percentile present: the systems cannot disagree.
    assert_eq!(rows[0].disagreement_index, Some(0.0));
}

#[test]
fn empty_leaderboard_is_a_valid_result() {
    let table = sample_table();
    let rows = leaderboard(
        &table,
        &TeamFilter::Team("TeamZ".to_string()),
        MetricId::Oaa,
        10,
    );
    assert!(rows.is_empty());
}

#[test]
fn selector_options_are_sorted_and_unique() {
    let table = sample_table();
    assert_eq!(team_options(&table), vec!["TeamX", "TeamY"]);

    let rows = filter_by_team(&table, &TeamFilter::All);
    assert_eq!(player_options(&rows), vec!["Ana", "Ben", "Cruz", "Dia"]);
}
