//! Ward plans: the list of wards and bed counts a registry is seeded from.
//!
//! A plan comes either from configuration (`WARD_PLAN=ICU=40,General=40,Pediatric=40`) or from
//! a hospital's onboarding ward list, where ward names are free text.

use crate::constants::MAX_BEDS_PER_WARD;
use crate::error::{ConfigError, ConfigResult};
use ward_types::WardType;

/// One ward of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WardSeed {
    pub ward: WardType,
    pub beds: u32,
}

impl WardSeed {
    /// Validates a ward name and bed count.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidWardPlan`] if the name is blank or the bed count is zero or
    /// above [`MAX_BEDS_PER_WARD`].
    pub fn new(name: &str, beds: u32) -> ConfigResult<Self> {
        let ward = WardType::parse(name)
            .map_err(|_| ConfigError::InvalidWardPlan("ward name cannot be empty".into()))?;
        if beds == 0 || beds > MAX_BEDS_PER_WARD {
            return Err(ConfigError::InvalidWardPlan(format!(
                "ward {} must have between 1 and {} beds, got {}",
                ward, MAX_BEDS_PER_WARD, beds
            )));
        }
        Ok(Self { ward, beds })
    }
}

/// Ordered, duplicate-free list of ward seeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WardPlan {
    wards: Vec<WardSeed>,
}

impl Default for WardPlan {
    /// 40 beds in each of the built-in wards.
    fn default() -> Self {
        Self {
            wards: WardType::BUILT_IN
                .into_iter()
                .map(|ward| WardSeed { ward, beds: 40 })
                .collect(),
        }
    }
}

impl WardPlan {
    /// Builds a plan from seeds, rejecting an empty list and repeated ward names.
    pub fn new(wards: Vec<WardSeed>) -> ConfigResult<Self> {
        if wards.is_empty() {
            return Err(ConfigError::InvalidWardPlan(
                "at least one ward is required".into(),
            ));
        }
        for (i, seed) in wards.iter().enumerate() {
            if wards[..i].iter().any(|earlier| earlier.ward == seed.ward) {
                return Err(ConfigError::InvalidWardPlan(format!(
                    "ward {} is listed more than once",
                    seed.ward
                )));
            }
        }
        let plan = Self { wards };
        if plan.total_beds() > u64::from(u32::MAX) {
            return Err(ConfigError::InvalidWardPlan(format!(
                "{} beds in total is more than a registry can number",
                plan.total_beds()
            )));
        }
        Ok(plan)
    }

    /// Parses `Name=count` pairs separated by commas, e.g. `ICU=10,Maternity=6`.
    pub fn parse(input: &str) -> ConfigResult<Self> {
        let mut seeds = Vec::new();
        for entry in input.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, count) = entry.split_once('=').ok_or_else(|| {
                ConfigError::InvalidWardPlan(format!("expected Name=count, got '{}'", entry))
            })?;
            let beds = count.trim().parse::<u32>().map_err(|_| {
                ConfigError::InvalidWardPlan(format!(
                    "bed count for {} is not a number: '{}'",
                    name.trim(),
                    count.trim()
                ))
            })?;
            seeds.push(WardSeed::new(name, beds)?);
        }
        Self::new(seeds)
    }

    pub fn wards(&self) -> &[WardSeed] {
        &self.wards
    }

    pub fn total_beds(&self) -> u64 {
        self.wards.iter().map(|seed| u64::from(seed.beds)).sum()
    }

    /// First and last bed id each ward receives when a registry is seeded from this plan.
    pub fn bed_ranges(&self) -> Vec<(WardType, u64, u64)> {
        let mut next = 1u64;
        self.wards
            .iter()
            .map(|seed| {
                let first = next;
                next += u64::from(seed.beds);
                (seed.ward.clone(), first, next - 1)
            })
            .collect()
    }
}
