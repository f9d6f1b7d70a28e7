//! Tier module - subscription level controlling analysis depth

use serde::{Deserialize, Serialize};
use std::fmt;

/// Service tier of the requesting user
///
/// - Free: reduced prompt, at least 5 risks/opportunities, no severity or impact
/// - Premium: 13-point prompt, at least 10 risks/opportunities plus the
///   premium-only sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Reduced analysis
    #[default]
    Free,

    /// Full analysis
    Premium,
}

impl Tier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Premium => "premium",
        }
    }

    /// Parse a tier from a string, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "free" => Some(Tier::Free),
            "premium" => Some(Tier::Premium),
            _ => None,
        }
    }

    /// Minimum number of risks and opportunities requested from the model
    pub fn minimum_items(&self) -> usize {
        match self {
            Tier::Free => 5,
            Tier::Premium => 10,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid tier: {}", s))
    }
}
