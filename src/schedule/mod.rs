pub mod classify;
pub mod group;
pub mod parser;
pub mod view;
pub mod window;

use std::collections::BTreeMap;
use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

pub use classify::{classify_sport, sort_sports, Sport};
pub use group::{group_matches, partition_by_sport, source_label, GroupedMatch, Source, SportSection};
pub use parser::{parse_schedule, ParseReport};
pub use window::{live_matches, upcoming_today, upcoming_within_24h, UpcomingMatch};

// ── Day ────────────────────────────────────────────────────────────────────────

/// Weekday as published in the schedule text. Sunday sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Day::Sunday => "Sunday",
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }

    /// Upper-case marker searched for in schedule lines.
    pub fn marker(self) -> &'static str {
        match self {
            Day::Sunday => "SUNDAY",
            Day::Monday => "MONDAY",
            Day::Tuesday => "TUESDAY",
            Day::Wednesday => "WEDNESDAY",
            Day::Thursday => "THURSDAY",
            Day::Friday => "FRIDAY",
            Day::Saturday => "SATURDAY",
        }
    }

    /// Case-insensitive lookup by full English name.
    pub fn from_name(name: &str) -> Option<Day> {
        let upper = name.trim().to_uppercase();
        Day::ALL.into_iter().find(|d| d.marker() == upper)
    }

    pub fn next(self) -> Day {
        Day::from(Weekday::from(self).succ())
    }

    pub fn previous(self) -> Day {
        Day::from(Weekday::from(self).pred())
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => Day::Sunday,
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
            Weekday::Sat => Day::Saturday,
        }
    }
}

impl From<Day> for Weekday {
    fn from(day: Day) -> Self {
        match day {
            Day::Sunday => Weekday::Sun,
            Day::Monday => Weekday::Mon,
            Day::Tuesday => Weekday::Tue,
            Day::Wednesday => Weekday::Wed,
            Day::Thursday => Weekday::Thu,
            Day::Friday => Weekday::Fri,
            Day::Saturday => Weekday::Sat,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Tables ─────────────────────────────────────────────────────────────────────

/// One broadcast source of a match, as read from a schedule line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub time: String,
    pub name: String,
    pub url: String,
}

pub type ScheduleTable = BTreeMap<Day, Vec<MatchRecord>>;

/// Channel id → language label for every day. Ids are kept upper-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelLanguageTable(BTreeMap<Day, BTreeMap<String, String>>);

impl ChannelLanguageTable {
    pub fn reset_day(&mut self, day: Day) {
        self.0.insert(day, BTreeMap::new());
    }

    pub fn insert(&mut self, day: Day, channel: &str, language: &str) {
        self.0
            .entry(day)
            .or_default()
            .insert(channel.to_uppercase(), language.to_string());
    }

    pub fn language(&self, day: Day, channel: &str) -> Option<&str> {
        self.0
            .get(&day)?
            .get(&channel.trim().to_uppercase())
            .map(String::as_str)
    }

    pub fn day(&self, day: Day) -> Option<&BTreeMap<String, String>> {
        self.0.get(&day)
    }

    pub fn total_channels(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }
}
