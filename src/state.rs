use std::collections::VecDeque;

use crate::dataset::PlayerRecord;
use crate::engine::{self, LeaderRow, TeamFilter};
use crate::metrics::{CANONICAL_METRICS, MetricId};
use crate::registry::SeasonStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Profile,
    Leaderboard,
}

pub const TOP_N_MIN: usize = 5;
pub const TOP_N_MAX: usize = 100;
pub const TOP_N_STEP: usize = 5;
pub const TOP_N_DEFAULT: usize = 20;

const LOG_CAPACITY: usize = 50;

/// All interactive state. Every derived view (player options, selected
/// record, leaderboard rows) is recomputed from the active table on demand;
/// only cursors and filters persist between renders.
pub struct AppState {
    pub screen: Screen,
    store: SeasonStore,
    pub season_idx: usize,
    pub profile_team: TeamFilter,
    pub lb_team: TeamFilter,
    pub player: Option<String>,
    pub sort_metric: MetricId,
    pub top_n: usize,
    pub lb_scroll: usize,
    pub help_overlay: bool,
    pub glossary_overlay: bool,
    pub logs: VecDeque<String>,
}

impl AppState {
    pub fn new(store: SeasonStore) -> Self {
        let mut state = Self {
            screen: Screen::Profile,
            store,
            season_idx: 0,
            profile_team: TeamFilter::All,
            lb_team: TeamFilter::All,
            player: None,
            sort_metric: MetricId::Oaa,
            top_n: TOP_N_DEFAULT,
            lb_scroll: 0,
            help_overlay: false,
            glossary_overlay: false,
            logs: VecDeque::new(),
        };
        state.load_active();
        state.snap_player();
        state
    }

    pub fn store(&self) -> &SeasonStore {
        &self.store
    }

    pub fn season_label(&self) -> Option<&str> {
        self.store.registry().label(self.season_idx)
    }

    /// Active season's table; empty while no season has loaded.
    pub fn table(&self) -> &[PlayerRecord] {
        self.season_label()
            .and_then(|label| self.store.get(label))
            .unwrap_or(&[])
    }

    /// Rows in the profile screen's team scope. Player options and player
    /// resolution both derive from these rows, so a selection can never
    /// reference a player outside its own scope.
    pub fn profile_rows(&self) -> Vec<&PlayerRecord> {
        engine::filter_by_team(self.table(), &self.profile_team)
    }

    pub fn player_options(&self) -> Vec<String> {
        engine::player_options(&self.profile_rows())
    }

    pub fn selected_record(&self) -> Option<&PlayerRecord> {
        let name = self.player.as_deref()?;
        engine::resolve_player(&self.profile_rows(), name).ok()
    }

    pub fn leaderboard_rows(&self) -> Vec<LeaderRow> {
        engine::leaderboard(self.table(), &self.lb_team, self.sort_metric, self.top_n)
    }

    /// Load the active season through the session cache, logging the
    /// outcome. Returns false when the season's file is unavailable.
    fn load_active(&mut self) -> bool {
        let Some(label) = self.season_label().map(str::to_string) else {
            self.push_log("[WARN] No seasons configured");
            return false;
        };
        if self.store.is_cached(&label) {
            self.push_log(format!("[INFO] Season {label} from session cache"));
            return true;
        }
        let loaded = self.store.load(&label).map(|rows| rows.len());
        match loaded {
            Ok(count) => {
                self.push_log(format!("[INFO] Season {label} loaded ({count} players)"));
                true
            }
            Err(err) => {
                self.push_log(format!("[WARN] Season {label} unavailable: {err}"));
                false
            }
        }
    }

    /// Advance the season selector. A season whose file fails to load is
    /// skipped back to the previous selection; the old table stays active.
    pub fn cycle_season(&mut self) {
        let total = self.store.registry().len();
        if total < 2 {
            return;
        }
        let previous = self.season_idx;
        self.season_idx = (self.season_idx + 1) % total;
        if !self.load_active() {
            self.season_idx = previous;
            return;
        }
        self.snap_filters();
        self.snap_player();
        self.lb_scroll = 0;
    }

    pub fn cycle_profile_team(&mut self) {
        let options = self.team_filter_options();
        self.profile_team = next_filter(&options, &self.profile_team);
        self.snap_player();
    }

    pub fn cycle_lb_team(&mut self) {
        let options = self.team_filter_options();
        self.lb_team = next_filter(&options, &self.lb_team);
        self.lb_scroll = 0;
    }

    pub fn cycle_sort_metric(&mut self) {
        let pos = CANONICAL_METRICS
            .iter()
            .position(|id| *id == self.sort_metric)
            .unwrap_or(0);
        self.sort_metric = CANONICAL_METRICS[(pos + 1) % CANONICAL_METRICS.len()];
        self.lb_scroll = 0;
    }

    pub fn increase_top_n(&mut self) {
        self.top_n = (self.top_n + TOP_N_STEP).min(TOP_N_MAX);
    }

    pub fn decrease_top_n(&mut self) {
        self.top_n = self.top_n.saturating_sub(TOP_N_STEP).max(TOP_N_MIN);
        self.lb_scroll = 0;
    }

    pub fn select_next_player(&mut self) {
        self.step_player(1);
    }

    pub fn select_prev_player(&mut self) {
        self.step_player(-1);
    }

    fn step_player(&mut self, delta: isize) {
        let options = self.player_options();
        if options.is_empty() {
            self.player = None;
            return;
        }
        let total = options.len() as isize;
        let pos = self
            .player
            .as_deref()
            .and_then(|name| options.iter().position(|p| p == name))
            .unwrap_or(0) as isize;
        let next = (pos + delta).rem_euclid(total) as usize;
        self.player = Some(options[next].clone());
    }

    /// Keep the selected player when the name survives the current scope,
    /// else snap to the first option.
    fn snap_player(&mut self) {
        let options = self.player_options();
        let keep = self
            .player
            .as_deref()
            .is_some_and(|name| options.iter().any(|p| p == name));
        if !keep {
            self.player = options.first().cloned();
        }
    }

    /// Team filters referencing a team absent from the active table fall
    /// back to "(All)". Happens when the season changes underneath them.
    fn snap_filters(&mut self) {
        let teams = engine::team_options(self.table());
        let gone =
            |filter: &TeamFilter| matches!(filter, TeamFilter::Team(team) if !teams.contains(team));
        if gone(&self.profile_team) {
            self.profile_team = TeamFilter::All;
        }
        if gone(&self.lb_team) {
            self.lb_team = TeamFilter::All;
        }
    }

    fn team_filter_options(&self) -> Vec<TeamFilter> {
        let mut options = vec![TeamFilter::All];
        options.extend(
            engine::team_options(self.table())
                .into_iter()
                .map(TeamFilter::Team),
        );
        options
    }

    pub fn scroll_lb_down(&mut self) {
        let total = self.leaderboard_rows().len();
        if self.lb_scroll + 1 < total {
            self.lb_scroll += 1;
        }
    }

    pub fn scroll_lb_up(&mut self) {
        self.lb_scroll = self.lb_scroll.saturating_sub(1);
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > LOG_CAPACITY {
            self.logs.pop_front();
        }
    }
}

fn next_filter(options: &[TeamFilter], current: &TeamFilter) -> TeamFilter {
    let pos = options.iter().position(|o| o == current).unwrap_or(0);
    options[(pos + 1) % options.len()].clone()
}
