//! Run-wide selection constraints.

use super::member::Cost;
use crate::error::RosterError;
use std::fmt;
use std::str::FromStr;

/// Valuation strategy applied to every member score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    #[default]
    Balanced,
    /// Boosts midfield and attacking roles.
    Aggressive,
    /// Boosts goalkeepers and defenders.
    Defensive,
    /// Boosts low-ownership members.
    Differential,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Balanced => "balanced",
            Strategy::Aggressive => "aggressive",
            Strategy::Defensive => "defensive",
            Strategy::Differential => "differential",
        };
        f.write_str(name)
    }
}

impl FromStr for Strategy {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balanced" => Ok(Strategy::Balanced),
            "aggressive" => Ok(Strategy::Aggressive),
            "defensive" => Ok(Strategy::Defensive),
            "differential" => Ok(Strategy::Differential),
            other => Err(RosterError::config(format!("unknown strategy '{other}'"))),
        }
    }
}

/// Budget ceiling and strategy for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraints {
    pub budget: Cost,
    pub strategy: Strategy,
}

impl Constraints {
    pub fn new(budget: Cost, strategy: Strategy) -> Self {
        Self { budget, strategy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse() {
        assert_eq!("balanced".parse::<Strategy>().unwrap(), Strategy::Balanced);
        assert_eq!(" Differential ".parse::<Strategy>().unwrap(), Strategy::Differential);
        assert_eq!("AGGRESSIVE".parse::<Strategy>().unwrap(), Strategy::Aggressive);
        assert!("reckless".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_strategy_display_roundtrip() {
        for s in [
            Strategy::Balanced,
            Strategy::Aggressive,
            Strategy::Defensive,
            Strategy::Differential,
        ] {
            assert_eq!(s.to_string().parse::<Strategy>().unwrap(), s);
        }
    }
}
