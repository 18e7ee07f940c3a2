use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sport category inferred from a free-text match title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    Football,
    #[serde(rename = "MotoGP")]
    MotoGp,
    #[serde(rename = "Formula 1")]
    Formula1,
    Basketball,
    #[serde(rename = "Combat Sports")]
    CombatSports,
    Tennis,
    Golf,
    Rugby,
    #[serde(rename = "Australian Football")]
    AustralianFootball,
    #[serde(rename = "Autre")]
    Other,
}

impl Sport {
    /// Display order for sport sections.
    pub const PRIORITY: [Sport; 10] = [
        Sport::Football,
        Sport::Basketball,
        Sport::Formula1,
        Sport::MotoGp,
        Sport::CombatSports,
        Sport::Tennis,
        Sport::Golf,
        Sport::Rugby,
        Sport::AustralianFootball,
        Sport::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Sport::Football => "Football",
            Sport::MotoGp => "MotoGP",
            Sport::Formula1 => "Formula 1",
            Sport::Basketball => "Basketball",
            Sport::CombatSports => "Combat Sports",
            Sport::Tennis => "Tennis",
            Sport::Golf => "Golf",
            Sport::Rugby => "Rugby",
            Sport::AustralianFootball => "Australian Football",
            Sport::Other => "Autre",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Keyword tables ─────────────────────────────────────────────────────────────

/// `Sub` matches anywhere in the lower-cased title, `Word` only as a whole
/// token once punctuation is blanked out (short abbreviations would misfire
/// otherwise).
#[derive(Clone, Copy)]
enum Keyword {
    Sub(&'static str),
    Word(&'static str),
}

use Keyword::{Sub, Word};

const TEAM_CONNECTORS: &[Keyword] = &[Word("x"), Word("vs"), Word("v")];

const FOOTBALL: &[Keyword] = &[
    Sub("football"),
    Sub("soccer"),
    Sub("premier league"),
    Sub("la liga"),
    Sub("laliga"),
    Sub("serie a"),
    Sub("bundesliga"),
    Sub("ligue 1"),
    Sub("eredivisie"),
    Sub("primeira liga"),
    Sub("liga portugal"),
    Sub("super league"),
    Sub("super lig"),
    Sub("champions league"),
    Sub("europa league"),
    Sub("conference league"),
    Sub("uefa"),
    Sub("fifa"),
    Sub("copa "),
    Sub("libertadores"),
    Sub("fa cup"),
    Sub("carabao"),
    Sub("coppa italia"),
    Sub("dfb pokal"),
    Sub("taça"),
    Word("efl"),
    Word("mls"),
    Sub("real madrid"),
    Sub("barcelona"),
    Sub("atletico"),
    Sub("sevilla"),
    Sub("liverpool"),
    Sub("arsenal"),
    Sub("chelsea"),
    Sub("manchester"),
    Sub("tottenham"),
    Sub("newcastle"),
    Sub("juventus"),
    Word("milan"),
    Word("inter"),
    Sub("napoli"),
    Word("roma"),
    Word("psg"),
    Sub("paris saint"),
    Sub("marseille"),
    Sub("bayern"),
    Sub("dortmund"),
    Sub("leverkusen"),
    Sub("benfica"),
    Sub("porto"),
    Sub("sporting"),
    Sub("braga"),
    Sub("ajax"),
    Sub("psv"),
    Sub("feyenoord"),
    Word("celtic"),
    Sub("galatasaray"),
    Sub("fenerbahce"),
    Sub("besiktas"),
    Sub("olympiacos"),
    Sub("panathinaikos"),
    Word("aek"),
    Word("paok"),
    Sub("boca juniors"),
    Sub("river plate"),
    Sub("flamengo"),
    Sub("palmeiras"),
    Sub("corinthians"),
    Sub("al hilal"),
    Sub("al nassr"),
];

const MOTOGP: &[Keyword] = &[Sub("motogp"), Sub("moto gp"), Sub("moto2"), Sub("moto3")];

const FORMULA_1: &[Keyword] = &[
    Sub("formula 1"),
    Sub("formula one"),
    Word("f1"),
    Sub("grand prix"),
];

const BASKETBALL: &[Keyword] = &[
    Sub("basketball"),
    Word("nba"),
    Sub("euroleague"),
    Sub("eurocup"),
    Word("acb"),
    Sub("lakers"),
    Sub("celtics"),
    Sub("warriors"),
    Sub("knicks"),
    Sub("bucks"),
    Sub("76ers"),
    Sub("mavericks"),
    Sub("nuggets"),
    Sub("clippers"),
    Word("heat"),
    Word("nets"),
    Word("suns"),
    Word("bulls"),
];

const COMBAT_SPORTS: &[Keyword] = &[
    Word("ufc"),
    Word("mma"),
    Sub("boxing"),
    Sub("kickboxing"),
    Sub("bellator"),
    Word("pfl"),
    Sub("fight night"),
    Word("wwe"),
];

const TENNIS: &[Keyword] = &[
    Sub("tennis"),
    Word("atp"),
    Word("wta"),
    Sub("wimbledon"),
    Sub("roland garros"),
    Sub("us open"),
    Sub("australian open"),
    Sub("davis cup"),
];

const GOLF: &[Keyword] = &[
    Sub("golf"),
    Word("pga"),
    Word("lpga"),
    Sub("masters"),
    Sub("ryder cup"),
    Sub("dp world tour"),
    Sub("championship"),
];

const RUGBY: &[Keyword] = &[
    Sub("rugby"),
    Sub("six nations"),
    Sub("top 14"),
    Word("urc"),
    Word("nrl"),
];

const AUSTRALIAN_FOOTBALL: &[Keyword] = &[
    Word("afl"),
    Sub("aussie rules"),
    Sub("australian football"),
];

struct Title {
    lower: String,
    padded: String,
}

impl Title {
    fn new(name: &str) -> Self {
        let lower = name.to_lowercase();
        let blanked: String = lower
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();
        let padded = format!(" {} ", blanked.split_whitespace().collect::<Vec<_>>().join(" "));
        Self { lower, padded }
    }

    fn has(&self, keyword: Keyword) -> bool {
        match keyword {
            Sub(s) => self.lower.contains(s),
            Word(w) => self.padded.contains(&format!(" {w} ")),
        }
    }

    fn has_any(&self, keywords: &[Keyword]) -> bool {
        keywords.iter().any(|k| self.has(*k))
    }
}

/// Infer the sport of a match title. Rules are tried in a fixed order because
/// keyword sets overlap; the first hit wins.
pub fn classify_sport(name: &str) -> Sport {
    let title = Title::new(name);

    if title.has_any(FOOTBALL) || title.has_any(TEAM_CONNECTORS) {
        return Sport::Football;
    }
    if title.has_any(MOTOGP) {
        return Sport::MotoGp;
    }
    if title.has_any(FORMULA_1) {
        return Sport::Formula1;
    }
    if title.has_any(BASKETBALL) {
        return Sport::Basketball;
    }
    let versus = title.lower.contains("vs");
    if title.has_any(COMBAT_SPORTS)
        || (versus && (title.lower.contains("ufc") || title.lower.contains("boxing")))
    {
        return Sport::CombatSports;
    }
    if title.has_any(TENNIS) {
        return Sport::Tennis;
    }
    if title.has_any(GOLF) {
        return Sport::Golf;
    }
    if title.has_any(RUGBY) {
        return Sport::Rugby;
    }
    if title.has_any(AUSTRALIAN_FOOTBALL) {
        return Sport::AustralianFootball;
    }
    Sport::Other
}

// ── Priority ordering ──────────────────────────────────────────────────────────

fn priority_index(label: &str) -> Option<usize> {
    Sport::PRIORITY.iter().position(|s| s.label() == label)
}

/// Compare two sport labels: known sports by priority, unknown ones after
/// them in alphabetical order.
pub fn compare_sport_labels(a: &str, b: &str) -> Ordering {
    match (priority_index(a), priority_index(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)),
    }
}

/// Order sport labels for display.
pub fn sort_sports<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let mut sorted: Vec<String> = labels.iter().map(|s| s.as_ref().to_string()).collect();
    sorted.sort_by(|a, b| compare_sport_labels(a, b));
    sorted
}
