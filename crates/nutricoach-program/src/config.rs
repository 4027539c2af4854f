//! Program configuration

use nutricoach_types::PhaseType;
use std::sync::Arc;

use crate::pattern::PatternTable;

/// Program service configuration
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Final phase appended to `VIPPP16` timelines; `None` means EQUILIBRE
    pub final_phase_vippp: Option<PhaseType>,
    /// Phase patterns used for timeline generation
    pub patterns: Arc<PatternTable>,
}

impl ProgramConfig {
    /// Create a config using the catalogue patterns
    pub fn new() -> Self {
        Self {
            final_phase_vippp: None,
            patterns: Arc::new(PatternTable::standard().clone()),
        }
    }

    /// Set the `VIPPP16` final phase
    pub fn with_final_phase(mut self, phase: Option<PhaseType>) -> Self {
        self.final_phase_vippp = phase;
        self
    }

    /// Replace the pattern table
    pub fn with_patterns(mut self, patterns: PatternTable) -> Self {
        self.patterns = Arc::new(patterns);
        self
    }
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self::new()
    }
}
