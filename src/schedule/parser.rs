use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{ChannelLanguageTable, Day, MatchRecord, ScheduleTable};

static CHANNEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i:(HD[0-9]+|BR[0-9]+))\s+(.+)$").expect("valid channel regex"));

// Lazy name capture: stop at the first " | ".
static MATCH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2}:[0-9]{2})\s+(.+?)\s+\|\s+(https?://.+)$").expect("valid match regex")
});

/// Everything one parse produces. Each parse replaces the previous tables wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub schedule: ScheduleTable,
    pub channels: ChannelLanguageTable,
    /// Non-blank lines that matched no rule, or came before any day marker.
    pub skipped_lines: usize,
}

impl ParseReport {
    pub fn total_matches(&self) -> usize {
        self.schedule.values().map(Vec::len).sum()
    }
}

enum Line<'a> {
    Day(Day),
    Channel { id: &'a str, language: &'a str },
    Match(MatchRecord),
    Noise,
}

fn classify_line(line: &str) -> Line<'_> {
    let upper = line.to_uppercase();
    if let Some(day) = Day::ALL.into_iter().find(|d| upper.contains(d.marker())) {
        return Line::Day(day);
    }

    if let Some(caps) = CHANNEL_RE.captures(line) {
        if let (Some(id), Some(language)) = (caps.get(1), caps.get(2)) {
            return Line::Channel {
                id: id.as_str(),
                language: language.as_str(),
            };
        }
    }

    if let Some(caps) = MATCH_RE.captures(line) {
        if let (Some(time), Some(name), Some(url)) = (caps.get(1), caps.get(2), caps.get(3)) {
            return Line::Match(MatchRecord {
                time: time.as_str().to_string(),
                name: name.as_str().to_string(),
                url: url.as_str().to_string(),
            });
        }
    }

    Line::Noise
}

/// Parse a pasted schedule. Unrecognized lines are dropped, never rejected.
pub fn parse_schedule(text: &str) -> ParseReport {
    let mut report = ParseReport::default();
    let mut current_day: Option<Day> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match (classify_line(line), current_day) {
            (Line::Day(day), _) => {
                current_day = Some(day);
                report.schedule.insert(day, Vec::new());
                report.channels.reset_day(day);
            }
            (Line::Channel { id, language }, Some(day)) => {
                report.channels.insert(day, id, language);
            }
            (Line::Match(record), Some(day)) => {
                report.schedule.entry(day).or_default().push(record);
            }
            (_, _) => {
                debug!(line = index + 1, content = line, "skipping schedule line");
                report.skipped_lines += 1;
            }
        }
    }

    report
}
