//! Phase pattern table
//!
//! Maps each subscription type to the ordered phases of one full program.
//! Patterns are built by repeating a base cycle a fixed number of times per
//! plan tier. `VIPPP16` deliberately leaves out its final phase, which the
//! timeline generator appends from configuration.

use nutricoach_types::{PhaseType, SubscriptionType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Weeks of the configurable final phase of `VIPPP16`
pub const FINAL_PHASE_WEEKS: u32 = 4;

/// One phase of a pattern and its length in weeks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternEntry {
    pub phase: PhaseType,
    pub weeks: u32,
}

impl PatternEntry {
    pub const fn new(phase: PhaseType, weeks: u32) -> Self {
        Self { phase, weeks }
    }
}

/// 2 weeks detox, 4 weeks equilibre
const STANDARD_CYCLE: [PatternEntry; 2] = [
    PatternEntry::new(PhaseType::Detox, 2),
    PatternEntry::new(PhaseType::Equilibre, 4),
];

/// 3 weeks detox, 3 weeks equilibre
const VIP_CYCLE: [PatternEntry; 2] = [
    PatternEntry::new(PhaseType::Detox, 3),
    PatternEntry::new(PhaseType::Equilibre, 3),
];

fn repeat_cycle(cycle: &[PatternEntry], times: usize) -> Vec<PatternEntry> {
    cycle.iter().copied().cycle().take(cycle.len() * times).collect()
}

/// Immutable mapping from subscription type to phase pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternTable {
    patterns: HashMap<SubscriptionType, Vec<PatternEntry>>,
}

impl PatternTable {
    /// A table with no patterns
    pub fn empty() -> Self {
        Self::default()
    }

    /// The catalogue table, built once
    pub fn standard() -> &'static PatternTable {
        static TABLE: OnceLock<PatternTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            PatternTable::empty()
                .with_pattern(SubscriptionType::Standard6, repeat_cycle(&STANDARD_CYCLE, 1))
                .with_pattern(SubscriptionType::Standard12, repeat_cycle(&STANDARD_CYCLE, 2))
                .with_pattern(SubscriptionType::Standard24, repeat_cycle(&STANDARD_CYCLE, 4))
                .with_pattern(SubscriptionType::Standard48, repeat_cycle(&STANDARD_CYCLE, 8))
                .with_pattern(SubscriptionType::Vip12, repeat_cycle(&VIP_CYCLE, 2))
                .with_pattern(SubscriptionType::Vippp16, repeat_cycle(&VIP_CYCLE, 2))
        })
    }

    /// Set the pattern for a subscription type
    pub fn with_pattern(
        mut self,
        subscription_type: SubscriptionType,
        entries: impl IntoIterator<Item = PatternEntry>,
    ) -> Self {
        self.patterns
            .insert(subscription_type, entries.into_iter().collect());
        self
    }

    /// Drop the pattern for a subscription type
    pub fn without_pattern(mut self, subscription_type: SubscriptionType) -> Self {
        self.patterns.remove(&subscription_type);
        self
    }

    /// Pattern for a subscription type, `None` if the table has none
    pub fn lookup(&self, subscription_type: SubscriptionType) -> Option<&[PatternEntry]> {
        self.patterns.get(&subscription_type).map(Vec::as_slice)
    }

    /// Subscription types with a pattern, in catalogue order
    pub fn types(&self) -> impl Iterator<Item = SubscriptionType> + '_ {
        SubscriptionType::ALL
            .into_iter()
            .filter(|ty| self.patterns.contains_key(ty))
    }
}

/// Total weeks covered by a pattern
pub fn pattern_weeks(entries: &[PatternEntry]) -> u32 {
    entries.iter().map(|e| e.weeks).sum()
}
