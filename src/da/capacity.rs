//! Capacity resolution for both groups.

use super::config::{MatchConfig, MatchMode};
use crate::error::ConfigError;
use crate::preferences::Roster;

/// Resolved capacities, indexed like the rosters they were built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capacities {
    proposers: Vec<usize>,
    partners: Vec<usize>,
}

impl Capacities {
    /// Resolves capacities from `config`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or an override names someone
    /// who is not a partner.
    pub fn resolve(
        config: &MatchConfig,
        proposers: &Roster,
        partners: &Roster,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut partner_caps = vec![1; partners.len()];
        if config.mode == MatchMode::ManyToOne {
            for (name, &capacity) in &config.capacities {
                let index = partners
                    .index_of(name)
                    .ok_or_else(|| ConfigError::UnknownPartnerCapacity(name.clone()))?;
                partner_caps[index] = capacity;
            }
        }

        Ok(Self {
            proposers: vec![1; proposers.len()],
            partners: partner_caps,
        })
    }

    #[inline]
    pub fn proposer(&self, index: usize) -> usize {
        self.proposers[index]
    }

    #[inline]
    pub fn partner(&self, index: usize) -> usize {
        self.partners[index]
    }

    /// Sum of partner capacities.
    pub fn total_partner_slots(&self) -> usize {
        self.partners.iter().sum()
    }
}
