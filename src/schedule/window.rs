use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::{Day, MatchRecord, ScheduleTable};

pub const DEFAULT_MATCH_MINUTES: i64 = 100;
/// Extra time and penalties.
pub const CHAMPIONS_LEAGUE_MATCH_MINUTES: i64 = 150;

const MINUTES_PER_DAY: i64 = 24 * 60;
/// Only matches starting from 21:00 can still be running after midnight.
const CARRY_OVER_EARLIEST_START: i64 = 21 * 60;
/// Carry-over is ignored from 04:00 on.
const CARRY_OVER_CUTOFF: i64 = 4 * 60;

const UPCOMING_SCAN_CAP: usize = 50;
const UPCOMING_LIMIT: usize = 30;

const CHAMPIONS_LEAGUE_KEYWORDS: &[&str] = &[
    "champions league",
    "champions-league",
    "championsleague",
    "ligue des champions",
    "liga dos campeões",
    "liga dos campeoes",
    "liga de campeones",
    "uefa champions",
    "ucl",
];

/// Longest a match can run, used to decide whether it is still live.
pub fn match_duration(name: &str) -> i64 {
    let lower = name.to_lowercase();
    if CHAMPIONS_LEAGUE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        CHAMPIONS_LEAGUE_MATCH_MINUTES
    } else {
        DEFAULT_MATCH_MINUTES
    }
}

/// `"HH:MM"` → minutes since midnight. Out-of-range minutes are accepted as is;
/// non-numeric or overflowing input yields `None` and the match drops out of
/// every time window.
pub fn time_to_minutes(time: &str) -> Option<i64> {
    let (hours, minutes) = time.trim().split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    // u32 parts keep all later window arithmetic well inside i64.
    i64::from(hours)
        .checked_mul(60)?
        .checked_add(i64::from(minutes))
}

pub fn minutes_of_day(now: NaiveDateTime) -> i64 {
    i64::from(now.hour()) * 60 + i64::from(now.minute())
}

pub fn is_live_same_day(start: i64, now: i64, duration: i64) -> bool {
    let elapsed = now - start;
    (0..=duration).contains(&elapsed)
}

/// Live check for a match listed under the previous day.
pub fn is_live_carried_over(start: i64, now: i64, duration: i64) -> bool {
    now < CARRY_OVER_CUTOFF
        && start >= CARRY_OVER_EARLIEST_START
        && (MINUTES_PER_DAY - start) + now <= duration
}

/// Records being played at `now`: today's first, then late kick-offs from
/// yesterday that are still running.
pub fn live_matches(schedule: &ScheduleTable, now: NaiveDateTime) -> Vec<MatchRecord> {
    let today = Day::from(now.weekday());
    let now_minutes = minutes_of_day(now);
    let mut live = Vec::new();

    for record in schedule.get(&today).into_iter().flatten() {
        let Some(start) = time_to_minutes(&record.time) else {
            continue;
        };
        if is_live_same_day(start, now_minutes, match_duration(&record.name)) {
            live.push(record.clone());
        }
    }

    for record in schedule.get(&today.previous()).into_iter().flatten() {
        let Some(start) = time_to_minutes(&record.time) else {
            continue;
        };
        if is_live_carried_over(start, now_minutes, match_duration(&record.name)) {
            live.push(record.clone());
        }
    }

    live
}

/// Today's records starting at or after `now`, in kick-off order.
pub fn upcoming_today(schedule: &ScheduleTable, now: NaiveDateTime) -> Vec<MatchRecord> {
    let today = Day::from(now.weekday());
    let now_minutes = minutes_of_day(now);

    let mut upcoming: Vec<(i64, MatchRecord)> = schedule
        .get(&today)
        .into_iter()
        .flatten()
        .filter_map(|r| time_to_minutes(&r.time).map(|start| (start, r.clone())))
        .filter(|(start, _)| *start >= now_minutes)
        .collect();
    upcoming.sort_by_key(|(start, _)| *start);
    upcoming.into_iter().map(|(_, r)| r).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingMatch {
    pub day: Day,
    pub time: String,
    pub name: String,
    pub url: String,
    /// Negative for today's matches that already kicked off.
    pub starts_in_minutes: i64,
}

impl UpcomingMatch {
    fn new(day: Day, record: &MatchRecord, starts_in_minutes: i64) -> Self {
        Self {
            day,
            time: record.time.clone(),
            name: record.name.clone(),
            url: record.url.clone(),
            starts_in_minutes,
        }
    }
}

/// Matches for the "next 24 hours" rail: today's remaining matches, the
/// following days up to a scan cap, trimmed to the first entries in time order.
///
/// Today's already-started matches pass the wrap-around test for every
/// `start < now`, so they are listed too.
pub fn upcoming_within_24h(schedule: &ScheduleTable, now: NaiveDateTime) -> Vec<UpcomingMatch> {
    let mut collected = upcoming_candidates(schedule, now);
    collected.sort_by_key(|m| m.starts_in_minutes);
    collected.truncate(UPCOMING_LIMIT);
    collected
}

/// Raw candidates in scan order, stopping once the scan cap is reached.
fn upcoming_candidates(schedule: &ScheduleTable, now: NaiveDateTime) -> Vec<UpcomingMatch> {
    let today = Day::from(now.weekday());
    let now_minutes = minutes_of_day(now);
    let mut collected: Vec<UpcomingMatch> = Vec::new();

    for record in schedule.get(&today).into_iter().flatten() {
        let Some(start) = time_to_minutes(&record.time) else {
            continue;
        };
        let later_today = start >= now_minutes;
        let wraps_before_midnight =
            start < now_minutes && start + (MINUTES_PER_DAY - now_minutes) < MINUTES_PER_DAY;
        if later_today || wraps_before_midnight {
            collected.push(UpcomingMatch::new(today, record, start - now_minutes));
        }
    }

    let mut day = today;
    'days: for offset in 1..7i64 {
        day = day.next();
        for record in schedule.get(&day).into_iter().flatten() {
            if collected.len() >= UPCOMING_SCAN_CAP {
                break 'days;
            }
            let Some(start) = time_to_minutes(&record.time) else {
                continue;
            };
            let starts_in = offset * MINUTES_PER_DAY + start - now_minutes;
            collected.push(UpcomingMatch::new(day, record, starts_in));
        }
    }

    collected
}
