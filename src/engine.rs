use std::cmp::Ordering;

use crate::dataset::PlayerRecord;
use crate::metrics::{CANONICAL_METRICS, MetricId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("player {name:?} not found in the current scope")]
    PlayerNotFound { name: String },
}

/// Team scope for a view. `All` is the "(All)" entry in the selectors. The
/// profile and leaderboard screens each hold their own filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TeamFilter {
    #[default]
    All,
    Team(String),
}

impl TeamFilter {
    pub fn matches(&self, record: &PlayerRecord) -> bool {
        match self {
            TeamFilter::All => true,
            TeamFilter::Team(team) => record.team == *team,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TeamFilter::All => "(All)",
            TeamFilter::Team(team) => team,
        }
    }
}

/// Rows in scope for a filter. An empty result is a valid empty state, not
/// an error; callers render "no players" messaging.
pub fn filter_by_team<'t>(table: &'t [PlayerRecord], filter: &TeamFilter) -> Vec<&'t PlayerRecord> {
    table.iter().filter(|r| filter.matches(r)).collect()
}

/// First row whose player name matches exactly, within already-filtered
/// rows. Selection lists derive from the same rows, so a miss means the
/// caller's scope and selection went out of sync.
pub fn resolve_player<'t>(
    rows: &[&'t PlayerRecord],
    name: &str,
) -> Result<&'t PlayerRecord, EngineError> {
    rows.iter()
        .find(|r| r.player == name)
        .copied()
        .ok_or_else(|| EngineError::PlayerNotFound {
            name: name.to_string(),
        })
}

/// The percentile metrics present for a record, in canonical order. May be
/// empty; that is the "no percentile data" state, not an error.
pub fn available_percentile_metrics(record: &PlayerRecord) -> Vec<MetricId> {
    CANONICAL_METRICS
        .iter()
        .copied()
        .filter(|id| record.percentile(*id).is_some())
        .collect()
}

/// Highest and lowest percentile metric among those available. Ties keep the
/// earlier metric in canonical order (first occurrence wins on a plain
/// max/min scan). Returns None when no metrics are available.
pub fn best_worst(record: &PlayerRecord, available: &[MetricId]) -> Option<(MetricId, MetricId)> {
    let mut best: Option<(MetricId, f64)> = None;
    let mut worst: Option<(MetricId, f64)> = None;
    for id in available {
        let Some(value) = record.percentile(*id) else {
            continue;
        };
        match best {
            Some((_, top)) if value <= top => {}
            _ => best = Some((*id, value)),
        }
        match worst {
            Some((_, bottom)) if value >= bottom => {}
            _ => worst = Some((*id, value)),
        }
    }
    match (best, worst) {
        (Some((b, _)), Some((w, _))) => Some((b, w)),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderRow {
    pub player: String,
    pub team: String,
    pub value: f64,
    pub disagreement_index: Option<f64>,
}

/// Top players by one percentile metric within a team scope. Players with no
/// value for the metric are dropped entirely, not shown with a placeholder.
/// The sort is stable: rows that tie keep their post-filter table order.
/// `top_n` bounds are the caller's concern (the UI clamps to its input
/// range); zero matching rows yields an empty, displayable result.
pub fn leaderboard(
    table: &[PlayerRecord],
    filter: &TeamFilter,
    sort_metric: MetricId,
    top_n: usize,
) -> Vec<LeaderRow> {
    let mut pool: Vec<(&PlayerRecord, f64)> = table
        .iter()
        .filter(|r| filter.matches(r))
        .filter_map(|r| r.percentile(sort_metric).map(|value| (r, value)))
        .collect();
    pool.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    pool.truncate(top_n);
    pool.into_iter()
        .map(|(r, value)| LeaderRow {
            player: r.player.clone(),
            team: r.team.clone(),
            value,
            disagreement_index: r.disagreement_index,
        })
        .collect()
}

/// Sorted unique team names for the team selectors.
pub fn team_options(table: &[PlayerRecord]) -> Vec<String> {
    let mut teams: Vec<String> = table.iter().map(|r| r.team.clone()).collect();
    teams.sort();
    teams.dedup();
    teams
}

/// Sorted unique player names within an already-filtered scope. Resolution
/// and selection must both run against the same rows.
pub fn player_options(rows: &[&PlayerRecord]) -> Vec<String> {
    let mut names: Vec<String> = rows.iter().map(|r| r.player.clone()).collect();
    names.sort();
    names.dedup();
    names
}
