//! Matching configuration.

use crate::error::ConfigError;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Capacity mode.
///
/// Proposers always have capacity 1. The mode decides partner capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchMode {
    /// Every member of both groups has capacity 1.
    #[default]
    OneToOne,

    /// Partners have capacity 1 unless overridden per partner.
    ManyToOne,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::OneToOne => f.write_str("one_to_one"),
            MatchMode::ManyToOne => f.write_str("many_to_one"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = ConfigError;

    /// Accepts `one_to_one` / `one_one` and `many_to_one` / `many_one`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one_to_one" | "one_one" => Ok(MatchMode::OneToOne),
            "many_to_one" | "many_one" => Ok(MatchMode::ManyToOne),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Configuration for a deferred-acceptance instance.
///
/// # Examples
///
/// ```
/// use u_matching::da::{MatchConfig, MatchMode};
///
/// let config = MatchConfig::many_to_one()
///     .with_capacity("beth", 2)
///     .with_strict(false);
/// assert_eq!(config.mode, MatchMode::ManyToOne);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchConfig {
    /// Capacity mode.
    pub mode: MatchMode,

    /// Require every member to rank the whole opposing group.
    pub strict: bool,

    /// Per-partner capacity overrides. Many-to-one only.
    pub capacities: BTreeMap<String, usize>,
}

impl MatchConfig {
    pub fn one_to_one() -> Self {
        Self::default()
    }

    pub fn many_to_one() -> Self {
        Self::default().with_mode(MatchMode::ManyToOne)
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the capacity of one partner, replacing any earlier value.
    pub fn with_capacity(mut self, partner: impl Into<String>, capacity: usize) -> Self {
        self.capacities.insert(partner.into(), capacity);
        self
    }

    pub fn with_capacities<I, S>(mut self, capacities: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        self.capacities
            .extend(capacities.into_iter().map(|(s, c)| (s.into(), c)));
        self
    }

    /// Validates the configuration on its own.
    ///
    /// Whether every override names an actual partner is checked later,
    /// once the partner group is known.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mode == MatchMode::OneToOne && !self.capacities.is_empty() {
            return Err(ConfigError::OverrideRequiresManyToOne);
        }
        if let Some((name, _)) = self.capacities.iter().find(|(_, c)| **c == 0) {
            return Err(ConfigError::ZeroCapacity(name.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.mode, MatchMode::OneToOne);
        assert!(!config.strict);
        assert!(config.capacities.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("one_to_one".parse::<MatchMode>(), Ok(MatchMode::OneToOne));
        assert_eq!("one_one".parse::<MatchMode>(), Ok(MatchMode::OneToOne));
        assert_eq!("many_to_one".parse::<MatchMode>(), Ok(MatchMode::ManyToOne));
        assert_eq!("many_one".parse::<MatchMode>(), Ok(MatchMode::ManyToOne));
        assert_eq!(
            "many_to_many".parse::<MatchMode>(),
            Err(ConfigError::UnknownMode("many_to_many".into()))
        );
    }

    #[test]
    fn test_mode_display_round_trips() {
        for mode in [MatchMode::OneToOne, MatchMode::ManyToOne] {
            assert_eq!(mode.to_string().parse::<MatchMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_builder() {
        let config = MatchConfig::many_to_one()
            .with_strict(true)
            .with_capacities([("beth", 2), ("anna", 3)])
            .with_capacity("anna", 1);

        assert!(config.strict);
        assert_eq!(config.capacities.get("beth"), Some(&2));
        assert_eq!(config.capacities.get("anna"), Some(&1));
    }

    #[test]
    fn test_validate_override_in_one_to_one() {
        let config = MatchConfig::one_to_one().with_capacity("beth", 2);
        assert_eq!(config.validate(), Err(ConfigError::OverrideRequiresManyToOne));
    }

    #[test]
    fn test_validate_zero_capacity() {
        let config = MatchConfig::many_to_one().with_capacity("beth", 0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity("beth".into())));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_from_json() {
        let config: MatchConfig =
            serde_json::from_str(r#"{"mode": "many_to_one", "capacities": {"beth": 2}}"#).unwrap();
        assert_eq!(config.mode, MatchMode::ManyToOne);
        assert!(!config.strict);
        assert_eq!(config.capacities.get("beth"), Some(&2));
    }
}
