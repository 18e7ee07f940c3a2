use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::classify::{classify_sport, compare_sport_labels, Sport};
use super::MatchRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    pub label: String,
}

/// A match with every feed that broadcasts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedMatch {
    pub time: String,
    pub name: String,
    pub sport: Sport,
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportSection {
    pub sport: Sport,
    pub matches: Vec<GroupedMatch>,
}

static HD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"HD([0-9]+)").expect("valid regex"));
static BR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"BR([0-9]+)").expect("valid regex"));
static SPORTTV_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"SPORTTV([0-9]+)").expect("valid regex"));
static ELEVEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"ELEVEN([0-9]+)").expect("valid regex"));

/// Human label for a feed URL, e.g. `.../hd/hd9.php` → `HD 9`.
pub fn source_label(url: &str) -> String {
    let segment = url.rsplit('/').next().unwrap_or("");
    let label = segment.strip_suffix(".php").unwrap_or(segment).to_uppercase();
    if label.is_empty() {
        return "Source".to_string();
    }

    if label.contains("HD") {
        HD_RE.replace(&label, "HD $1").into_owned()
    } else if label.contains("BR") {
        BR_RE.replace(&label, "BR $1").into_owned()
    } else if label.contains("SPORTTV") {
        SPORTTV_RE.replace(&label, "Sport TV $1").into_owned()
    } else if label.contains("ELEVEN") {
        ELEVEN_RE.replace(&label, "Eleven $1").into_owned()
    } else {
        label
    }
}

/// Merge simulcast rows: records with the same `time` and `name` become one
/// match whose sources keep input order.
pub fn group_matches(records: &[MatchRecord]) -> Vec<GroupedMatch> {
    let mut groups: Vec<GroupedMatch> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = format!("{}-{}", record.time, record.name);
        let idx = *index_by_key.entry(key).or_insert_with(|| {
            groups.push(GroupedMatch {
                time: record.time.clone(),
                name: record.name.clone(),
                sport: classify_sport(&record.name),
                sources: Vec::new(),
            });
            groups.len() - 1
        });

        groups[idx].sources.push(Source {
            url: record.url.clone(),
            label: source_label(&record.url),
        });
    }

    groups
}

/// Split grouped matches into sport sections in display priority, each
/// section ordered by kick-off time.
pub fn partition_by_sport(groups: Vec<GroupedMatch>) -> Vec<SportSection> {
    let mut sections: Vec<SportSection> = Vec::new();

    for group in groups {
        match sections.iter_mut().find(|s| s.sport == group.sport) {
            Some(section) => section.matches.push(group),
            None => sections.push(SportSection {
                sport: group.sport,
                matches: vec![group],
            }),
        }
    }

    sections.sort_by(|a, b| compare_sport_labels(a.sport.label(), b.sport.label()));
    for section in &mut sections {
        section.matches.sort_by(|a, b| a.time.cmp(&b.time));
    }
    sections
}
