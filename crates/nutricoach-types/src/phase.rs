//! Program phase types

use serde::{Deserialize, Serialize};

use crate::ParseCodeError;

/// Program phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PhaseType {
    /// Cleanse phase
    Detox,
    /// Balance phase
    Equilibre,
}

impl PhaseType {
    /// All phases, in declaration order
    pub const ALL: [PhaseType; 2] = [Self::Detox, Self::Equilibre];

    /// Wire code for this phase
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Detox => "DETOX",
            Self::Equilibre => "EQUILIBRE",
        }
    }
}

impl Default for PhaseType {
    fn default() -> Self {
        Self::Equilibre
    }
}

impl std::fmt::Display for PhaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for PhaseType {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DETOX" => Ok(Self::Detox),
            "EQUILIBRE" => Ok(Self::Equilibre),
            _ => Err(ParseCodeError::Phase(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_parse_is_case_insensitive() {
        assert_eq!("detox".parse::<PhaseType>().unwrap(), PhaseType::Detox);
        assert_eq!(" Equilibre ".parse::<PhaseType>().unwrap(), PhaseType::Equilibre);
        assert!("balance".parse::<PhaseType>().is_err());
    }

    #[test]
    fn test_phase_serde_uses_upper_case_codes() {
        let json = serde_json::to_string(&PhaseType::Detox).unwrap();
        assert_eq!(json, "\"DETOX\"");
        let back: PhaseType = serde_json::from_str("\"EQUILIBRE\"").unwrap();
        assert_eq!(back, PhaseType::Equilibre);
    }

    #[test]
    fn test_default_phase_is_equilibre() {
        assert_eq!(PhaseType::default(), PhaseType::Equilibre);
    }
}
