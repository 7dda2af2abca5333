/// The six defensive metric systems shown by the dashboard, in the canonical
/// display order used everywhere: profile callouts, the percentile chart, the
/// raw-vs-percentile table, and the leaderboard metric selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricId {
    Oaa,
    Drs,
    TotalZone,
    Drp,
    FieldingPct,
    Frv,
}

pub const CANONICAL_METRICS: [MetricId; 6] = [
    MetricId::Oaa,
    MetricId::Drs,
    MetricId::TotalZone,
    MetricId::Drp,
    MetricId::FieldingPct,
    MetricId::Frv,
];

/// One row of the metric schema: a raw source column, its percentile
/// counterpart, and the display labels. Binding the pair in a single entry
/// keeps the raw and percentile columns from drifting apart if the schema is
/// ever reordered.
#[derive(Debug, Clone, Copy)]
pub struct MetricSpec {
    pub id: MetricId,
    pub raw_column: &'static str,
    pub percentile_column: &'static str,
    pub label: &'static str,
    pub pct_label: &'static str,
}

pub const METRIC_SPECS: [MetricSpec; 6] = [
    MetricSpec {
        id: MetricId::Oaa,
        raw_column: "outs_above_average",
        percentile_column: "outs_above_average_percentile",
        label: "OAA",
        pct_label: "OAA (pct)",
    },
    MetricSpec {
        id: MetricId::Drs,
        raw_column: "Rdrs",
        percentile_column: "Rdrs_percentile",
        label: "DRS",
        pct_label: "DRS (pct)",
    },
    MetricSpec {
        id: MetricId::TotalZone,
        raw_column: "Rtot",
        percentile_column: "Rtot_percentile",
        label: "Total Zone",
        pct_label: "Total Zone (pct)",
    },
    MetricSpec {
        id: MetricId::Drp,
        raw_column: "DRP",
        percentile_column: "DRP_percentile",
        label: "DRP",
        pct_label: "DRP (pct)",
    },
    MetricSpec {
        id: MetricId::FieldingPct,
        raw_column: "Fld%",
        percentile_column: "Fld%_percentile",
        label: "Fielding %",
        pct_label: "Fielding % (pct)",
    },
    MetricSpec {
        id: MetricId::Frv,
        raw_column: "FRV",
        percentile_column: "FRV_percentile",
        label: "FRV",
        pct_label: "FRV (pct)",
    },
];

impl MetricId {
    /// Position in canonical order, also the row index into the per-record
    /// metric arrays.
    pub const fn index(self) -> usize {
        self as usize
    }
}

pub fn spec(id: MetricId) -> &'static MetricSpec {
    &METRIC_SPECS[id.index()]
}

pub fn metric_label(id: MetricId) -> &'static str {
    spec(id).label
}

pub fn metric_pct_label(id: MetricId) -> &'static str {
    spec(id).pct_label
}

pub fn glossary_entry(id: MetricId) -> &'static str {
    match id {
        MetricId::Oaa => {
            "OAA (Outs Above Average) - Statcast. Outs saved relative to an \
             average fielder, from tracked batted-ball data. Accounts for \
             launch angle, exit velocity, direction, and starting position; \
             mostly a range and reaction metric."
        }
        MetricId::Drs => {
            "DRS (Defensive Runs Saved) - Sports Info Solutions. Converts \
             defensive plays into runs saved or cost versus league average; \
             covers range, arm, double plays, and positioning."
        }
        MetricId::TotalZone => {
            "Total Zone (Rtot) - Baseball Reference. Runs saved or allowed \
             versus an average defender, estimated from balls hit into the \
             player's zone. Play-by-play based, so it reaches back decades."
        }
        MetricId::Drp => {
            "DRP (Defensive Runs Prevented) - Baseball Prospectus. Runs \
             prevented versus league average from contextual play modeling; \
             often diverges from the Statcast-based systems."
        }
        MetricId::FieldingPct => {
            "Fielding % - traditional. (Putouts + Assists) / chances. Simple \
             to read but blind to range: a fielder who never reaches hard \
             balls can still post a perfect mark."
        }
        MetricId::Frv => {
            "FRV (Fielding Run Value) - Statcast. OAA-style tracking data \
             expressed on a run-value scale; directionally close to OAA."
        }
    }
}

/// The derived column is not one of the six systems, so its glossary text
/// lives outside the per-metric table.
pub const DISAGREEMENT_GLOSSARY: &str =
    "Disagreement Index - computed here. Standard deviation across a player's \
     available percentile metrics; higher means the systems disagree more \
     about the player's defense.";
