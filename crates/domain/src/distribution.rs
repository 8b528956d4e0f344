// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The policy used to assign a batch of leads across a roster.
///
/// Only round-robin has batch behavior. Capacity-based and manual are
/// recognized policy names whose selection for a batch is rejected
/// explicitly rather than silently falling through to round-robin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DistributionMethod {
    /// Cycle through the roster, one lead per member per pass.
    #[default]
    RoundRobin,
    /// Weight assignment by remaining member capacity. Not implemented.
    CapacityBased,
    /// Operator picks the assignee per lead. Not implemented for batches.
    Manual,
}

impl FromStr for DistributionMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "round-robin" => Ok(Self::RoundRobin),
            "capacity-based" => Ok(Self::CapacityBased),
            "manual" => Ok(Self::Manual),
            _ => Err(DomainError::InvalidDistributionMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for DistributionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl DistributionMethod {
    /// Converts this method to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RoundRobin => "round-robin",
            Self::CapacityBased => "capacity-based",
            Self::Manual => "manual",
        }
    }

    /// Returns whether this policy has batch assignment behavior.
    #[must_use]
    pub const fn is_batch_implemented(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }
}
