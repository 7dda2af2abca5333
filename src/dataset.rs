use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::metrics::MetricId;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("season data unavailable at {path}: {source}")]
    Unavailable {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed season file {path}: {source}")]
    Malformed { path: String, source: csv::Error },

    #[error("unknown season {label:?}")]
    UnknownSeason { label: String },
}

/// One player-season of defensive data. Raw and percentile values are stored
/// per metric in canonical order; either side of a pair may be missing
/// because not every provider covers every player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub player: String,
    pub team: String,
    pub innings: u32,
    pub age: f64,
    raw: [Option<f64>; 6],
    percentiles: [Option<f64>; 6],
    pub disagreement_index: Option<f64>,
}

impl PlayerRecord {
    /// The derived column is fixed at construction; records are never
    /// mutated after load.
    pub fn new(
        player: impl Into<String>,
        team: impl Into<String>,
        innings: u32,
        age: f64,
        raw: [Option<f64>; 6],
        percentiles: [Option<f64>; 6],
    ) -> Self {
        let disagreement_index = disagreement_index(&percentiles);
        Self {
            player: player.into(),
            team: team.into(),
            innings,
            age,
            raw,
            percentiles,
            disagreement_index,
        }
    }

    pub fn raw(&self, id: MetricId) -> Option<f64> {
        self.raw[id.index()]
    }

    pub fn percentile(&self, id: MetricId) -> Option<f64> {
        self.percentiles[id.index()]
    }
}

/// Population standard deviation (N denominator) across the percentile
/// values present in a row. Missing values are excluded, not zeroed. One
/// value present means the systems cannot disagree, so 0.0; none present
/// means the index is undefined.
pub fn disagreement_index(percentiles: &[Option<f64>; 6]) -> Option<f64> {
    let values: Vec<f64> = percentiles.iter().filter_map(|v| *v).collect();
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    Some(var.sqrt())
}

// Serde view of one CSV row. Player/Team/Inn/Age are required; every metric
// column is optional so older or newer file schemas that drop a provider
// still load. An empty cell in a present column deserializes to None.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Player")]
    player: String,
    #[serde(rename = "Team")]
    team: String,
    // Innings show up both as "1023" and as "1023.1" (thirds of an inning);
    // accept either and keep whole innings.
    #[serde(rename = "Inn")]
    innings: f64,
    #[serde(rename = "Age")]
    age: f64,
    #[serde(rename = "outs_above_average", default)]
    oaa: Option<f64>,
    #[serde(rename = "outs_above_average_percentile", default)]
    oaa_pct: Option<f64>,
    #[serde(rename = "Rdrs", default)]
    drs: Option<f64>,
    #[serde(rename = "Rdrs_percentile", default)]
    drs_pct: Option<f64>,
    #[serde(rename = "Rtot", default)]
    total_zone: Option<f64>,
    #[serde(rename = "Rtot_percentile", default)]
    total_zone_pct: Option<f64>,
    #[serde(rename = "DRP", default)]
    drp: Option<f64>,
    #[serde(rename = "DRP_percentile", default)]
    drp_pct: Option<f64>,
    #[serde(rename = "Fld%", default)]
    fielding_pct: Option<f64>,
    #[serde(rename = "Fld%_percentile", default)]
    fielding_pct_pct: Option<f64>,
    #[serde(rename = "FRV", default)]
    frv: Option<f64>,
    #[serde(rename = "FRV_percentile", default)]
    frv_pct: Option<f64>,
}

impl RawRow {
    fn into_record(self) -> PlayerRecord {
        let raw = [
            self.oaa,
            self.drs,
            self.total_zone,
            self.drp,
            self.fielding_pct,
            self.frv,
        ];
        let percentiles = [
            self.oaa_pct,
            self.drs_pct,
            self.total_zone_pct,
            self.drp_pct,
            self.fielding_pct_pct,
            self.frv_pct,
        ];
        PlayerRecord::new(
            self.player.trim().to_string(),
            self.team.trim().to_string(),
            self.innings.max(0.0) as u32,
            self.age,
            raw,
            percentiles,
        )
    }
}

/// Parse a season CSV. Unparseable rows abort the load; a bad file is
/// surfaced to the caller, never silently truncated.
pub fn load_table_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawRow>() {
        rows.push(result?.into_record());
    }
    Ok(rows)
}

pub fn load_table(path: &Path) -> Result<Vec<PlayerRecord>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Unavailable {
        path: path.display().to_string(),
        source,
    })?;
    load_table_from_reader(file).map_err(|source| DatasetError::Malformed {
        path: path.display().to_string(),
        source,
    })
}
