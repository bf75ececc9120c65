// Ideology categories offered by the selector

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three options the dashboard selector exposes.
///
/// The dataset itself is not restricted to these values; any other ideology
/// string simply never shows up in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Ideology {
    #[default]
    Leftist,
    Centrist,
    Rightist,
}

impl Ideology {
    /// Selector order.
    pub const ALL: [Ideology; 3] = [Ideology::Leftist, Ideology::Centrist, Ideology::Rightist];

    /// Normalized value, as stored in `LeaderRecord::ideology`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Ideology::Leftist => "leftist",
            Ideology::Centrist => "centrist",
            Ideology::Rightist => "rightist",
        }
    }

    /// Display label for the selector.
    pub fn label(&self) -> &'static str {
        match self {
            Ideology::Leftist => "Leftist",
            Ideology::Centrist => "Centrist",
            Ideology::Rightist => "Rightist",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Ideology::Leftist => Ideology::Centrist,
            Ideology::Centrist => Ideology::Rightist,
            Ideology::Rightist => Ideology::Leftist,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Ideology::Leftist => Ideology::Rightist,
            Ideology::Centrist => Ideology::Leftist,
            Ideology::Rightist => Ideology::Centrist,
        }
    }

    /// Whether a normalized ideology string is one of the selector options.
    pub fn is_recognized(value: &str) -> bool {
        Ideology::ALL.iter().any(|i| i.as_str() == value)
    }
}

impl fmt::Display for Ideology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ideology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "leftist" => Ok(Ideology::Leftist),
            "centrist" => Ok(Ideology::Centrist),
            "rightist" => Ok(Ideology::Rightist),
            other => Err(format!(
                "unknown ideology '{}' (expected leftist, centrist or rightist)",
                other
            )),
        }
    }
}

/// Capitalize like the chart titles do: first char upper, the rest lower.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}
