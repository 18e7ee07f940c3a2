use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::group::{group_matches, partition_by_sport, SportSection};
use super::window::live_matches;
use super::{ChannelLanguageTable, Day, ScheduleTable};

/// Everything the day selector renders for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayView {
    pub day: Day,
    pub channels: BTreeMap<String, String>,
    pub sections: Vec<SportSection>,
}

pub fn day_view(schedule: &ScheduleTable, channels: &ChannelLanguageTable, day: Day) -> DayView {
    let records = schedule.get(&day).map(Vec::as_slice).unwrap_or_default();
    DayView {
        day,
        channels: channels.day(day).cloned().unwrap_or_default(),
        sections: partition_by_sport(group_matches(records)),
    }
}

/// Sport sections of the matches being played at `now`.
pub fn live_view(schedule: &ScheduleTable, now: NaiveDateTime) -> Vec<SportSection> {
    partition_by_sport(group_matches(&live_matches(schedule, now)))
}
