use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::{ChannelLanguageTable, Day, ParseReport, ScheduleTable};

// ── Server info ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub ip: String,
    pub port: u16,
    pub url: String,
}

// ── Admin regeneration ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RegenerateRequest {
    #[serde(rename = "scheduleText")]
    pub schedule_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseStats {
    pub total_matches: usize,
    pub total_channels: usize,
    pub matches_by_day: BTreeMap<Day, usize>,
    #[serde(default)]
    pub skipped_lines: usize,
}

impl From<&ParseReport> for ParseStats {
    fn from(report: &ParseReport) -> Self {
        Self {
            total_matches: report.total_matches(),
            total_channels: report.channels.total_channels(),
            matches_by_day: report
                .schedule
                .iter()
                .map(|(day, records)| (*day, records.len()))
                .collect(),
            skipped_lines: report.skipped_lines,
        }
    }
}

// ── Channel lookup ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelLanguage {
    pub day: Day,
    pub channel: String,
    pub language: String,
}

// ── Persistence ────────────────────────────────────────────────────────────────

/// Root of the persisted JSON file. Published snapshots are never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshot {
    pub revision: u64,
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub schedule: ScheduleTable,
    #[serde(default)]
    pub channels: ChannelLanguageTable,
    #[serde(default)]
    pub stats: ParseStats,
}

impl ScheduleSnapshot {
    /// The snapshot that follows `previous` once `report` is accepted.
    pub fn next(previous: &ScheduleSnapshot, report: ParseReport) -> Self {
        let stats = ParseStats::from(&report);
        Self {
            revision: previous.revision + 1,
            generated_at: Some(Utc::now()),
            schedule: report.schedule,
            channels: report.channels,
            stats,
        }
    }
}
