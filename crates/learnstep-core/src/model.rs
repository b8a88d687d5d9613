//! Core data model types for learnstep.
//!
//! These are the fundamental types the whole system uses to represent
//! children's age groups, difficulty tiers, levels, diagnostic questions,
//! and the records the persistence store keeps about them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the six coarse age buckets used to select content. Ordered
/// youngest to oldest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "4-5")]
    FourToFive,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9+")]
    NinePlus,
    #[serde(rename = "10+")]
    TenPlus,
}

impl AgeGroup {
    /// All age groups, youngest first.
    pub const ALL: [AgeGroup; 6] = [
        AgeGroup::FourToFive,
        AgeGroup::Six,
        AgeGroup::Seven,
        AgeGroup::Eight,
        AgeGroup::NinePlus,
        AgeGroup::TenPlus,
    ];

    /// The adjacent younger group. Saturates at the youngest bucket.
    pub fn younger(self) -> AgeGroup {
        match self {
            AgeGroup::FourToFive => AgeGroup::FourToFive,
            AgeGroup::Six => AgeGroup::FourToFive,
            AgeGroup::Seven => AgeGroup::Six,
            AgeGroup::Eight => AgeGroup::Seven,
            AgeGroup::NinePlus => AgeGroup::Eight,
            AgeGroup::TenPlus => AgeGroup::NinePlus,
        }
    }

    /// The adjacent older group. Saturates at the oldest bucket.
    pub fn older(self) -> AgeGroup {
        match self {
            AgeGroup::FourToFive => AgeGroup::Six,
            AgeGroup::Six => AgeGroup::Seven,
            AgeGroup::Seven => AgeGroup::Eight,
            AgeGroup::Eight => AgeGroup::NinePlus,
            AgeGroup::NinePlus => AgeGroup::TenPlus,
            AgeGroup::TenPlus => AgeGroup::TenPlus,
        }
    }

    /// Bucket a child's age in years. Ages below 4 clamp to the youngest
    /// bucket, ages above 10 to the oldest.
    pub fn from_age(age: u8) -> AgeGroup {
        match age {
            0..=5 => AgeGroup::FourToFive,
            6 => AgeGroup::Six,
            7 => AgeGroup::Seven,
            8 => AgeGroup::Eight,
            9 => AgeGroup::NinePlus,
            _ => AgeGroup::TenPlus,
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeGroup::FourToFive => write!(f, "4-5"),
            AgeGroup::Six => write!(f, "6"),
            AgeGroup::Seven => write!(f, "7"),
            AgeGroup::Eight => write!(f, "8"),
            AgeGroup::NinePlus => write!(f, "9+"),
            AgeGroup::TenPlus => write!(f, "10+"),
        }
    }
}

impl FromStr for AgeGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "4-5" => Ok(AgeGroup::FourToFive),
            "6" => Ok(AgeGroup::Six),
            "7" => Ok(AgeGroup::Seven),
            "8" => Ok(AgeGroup::Eight),
            "9+" => Ok(AgeGroup::NinePlus),
            "10+" => Ok(AgeGroup::TenPlus),
            other => Err(format!("unknown age group: {other}")),
        }
    }
}

/// Content difficulty within an age group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A content level in the 1–12 progression. Construction is validated, so
/// any `Level` in circulation is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const MIN: Level = Level(1);
    pub const MAX: Level = Level(12);

    /// Returns `None` outside 1..=12.
    pub fn new(n: u8) -> Option<Level> {
        (1..=12).contains(&n).then_some(Level(n))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The next level up, saturating at 12.
    pub fn next(self) -> Level {
        Level(self.0.min(11) + 1)
    }

    /// All twelve levels in order.
    pub fn all() -> impl Iterator<Item = Level> {
        (1..=12).map(Level)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {}", self.0)
    }
}

impl TryFrom<u8> for Level {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Level::new(n).ok_or_else(|| format!("level out of range 1-12: {n}"))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}

/// Which diagnostic tier a question was drawn from. Kept on the question so
/// scoring and telemetry can see why it was asked even after shuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    YoungerEasy,
    CurrentEasy,
    CurrentMedium,
    OlderEasy,
}

impl Tier {
    pub const ALL: [Tier; 4] = [
        Tier::YoungerEasy,
        Tier::CurrentEasy,
        Tier::CurrentMedium,
        Tier::OlderEasy,
    ];
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::YoungerEasy => write!(f, "younger-easy"),
            Tier::CurrentEasy => write!(f, "current-easy"),
            Tier::CurrentMedium => write!(f, "current-medium"),
            Tier::OlderEasy => write!(f, "older-easy"),
        }
    }
}

/// A subject a child can be assessed in. The four math operations grade
/// numerically; English grades by text comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    English,
}

impl Subject {
    /// Whether answers in this subject are numbers rather than words.
    pub fn is_numeric(self) -> bool {
        !matches!(self, Subject::English)
    }

    /// The operation symbol used in math prompts.
    pub fn symbol(self) -> Option<char> {
        match self {
            Subject::Addition => Some('+'),
            Subject::Subtraction => Some('-'),
            Subject::Multiplication => Some('×'),
            Subject::Division => Some('÷'),
            Subject::English => None,
        }
    }

    /// The module this subject's progression belongs to.
    pub fn module(self) -> &'static str {
        match self {
            Subject::English => "english",
            _ => "math",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Addition => write!(f, "addition"),
            Subject::Subtraction => write!(f, "subtraction"),
            Subject::Multiplication => write!(f, "multiplication"),
            Subject::Division => write!(f, "division"),
            Subject::English => write!(f, "english"),
        }
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "addition" => Ok(Subject::Addition),
            "subtraction" => Ok(Subject::Subtraction),
            "multiplication" => Ok(Subject::Multiplication),
            "division" => Ok(Subject::Division),
            "english" => Ok(Subject::English),
            other => Err(format!("unknown subject: {other}")),
        }
    }
}

/// The answer a content generator expects. Division with remainder and
/// fraction problems carry string answers; everything else is numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpectedAnswer {
    Number(f64),
    Text(String),
}

impl fmt::Display for ExpectedAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedAnswer::Number(n) => write!(f, "{}", format_number(*n)),
            ExpectedAnswer::Text(t) => write!(f, "{t}"),
        }
    }
}

/// An answer as submitted by a child, after input parsing. Blank and
/// unparseable input are representable states, never errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Blank,
    Number(f64),
    Text(String),
}

impl Answer {
    /// Parse raw input. Empty or whitespace-only input is `Blank`; input
    /// that parses as a number becomes `Number`; anything else is kept as
    /// `Text` and will simply grade incorrect against a numeric answer.
    pub fn parse(raw: &str) -> Answer {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Answer::Blank;
        }
        match trimmed.parse::<f64>() {
            Ok(n) => Answer::Number(n),
            Err(_) => Answer::Text(trimmed.to_string()),
        }
    }

    /// The textual form used for string comparison and for relaying raw
    /// answers to the remote validator.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Answer::Blank => None,
            Answer::Number(n) => Some(format_number(*n)),
            Answer::Text(t) => Some(t.clone()),
        }
    }
}

/// Render a float without a trailing `.0` for whole values.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// A single generated problem: what to show and what to expect back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub prompt: String,
    pub answer: ExpectedAnswer,
}

/// One question of a diagnostic assessment. Created fresh per invocation
/// and discarded after grading; only the aggregate score is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentQuestion {
    pub subject: Subject,
    pub prompt: String,
    pub expected: ExpectedAnswer,
    pub source_age: AgeGroup,
    pub source_difficulty: Difficulty,
    pub tier: Tier,
}

/// Per-question grading feedback, shared between local scoring and the
/// remote validator's response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionFeedback {
    pub correct: bool,
    pub expected: ExpectedAnswer,
}

/// The stored assessment result for one (child, subject). Overwritten on
/// retake; no history is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub level: Option<Level>,
    /// Percentage 0–100.
    pub score: Option<u8>,
    pub date: DateTime<Utc>,
    pub taken: bool,
}

/// The stored completion fact for one (child, module, page-or-level
/// identifier). Saves for the same identifier overwrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Percentage 0–100.
    #[serde(default)]
    pub score: u8,
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub total_problems: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub manually_marked: bool,
    /// Elapsed time as "MM:SS".
    #[serde(default = "default_elapsed")]
    pub elapsed_time: String,
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    pub timestamp: DateTime<Utc>,
}

fn default_elapsed() -> String {
    "00:00".to_string()
}

fn default_attempts() -> u32 {
    1
}

/// Static per-module completion policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRule {
    /// Completion requires a score at or above `threshold` (otherwise the
    /// module completes by manual marking only).
    pub requires_score: bool,
    /// Percentage 0–100.
    pub threshold: u8,
    pub sequential_pages: bool,
    pub sequential_levels: bool,
}

impl CompletionRule {
    /// The free-navigation fallback used for unknown modules.
    pub const FREE: CompletionRule = CompletionRule {
        requires_score: false,
        threshold: 0,
        sequential_pages: false,
        sequential_levels: false,
    };
}
