//! Configuration for the NutriCoach CLI.

use nutricoach_program::ProgramConfig;
use nutricoach_types::PhaseType;

/// Keys holding the final VIPPP16 phase, in lookup order
const FINAL_PHASE_KEYS: [&str; 2] = ["phase_finale_vippp", "PHASE_FINALE_VIPPP"];

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Program service configuration
    pub program: ProgramConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let final_phase = final_phase_setting(|key| std::env::var(key).ok())?;

        Ok(Self {
            program: ProgramConfig::new().with_final_phase(final_phase),
        })
    }
}

/// Final phase from the first non-blank key; none set means the default
fn final_phase_setting(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Option<PhaseType>, ConfigError> {
    for key in FINAL_PHASE_KEYS {
        if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
            return parse_final_phase(key, &value).map(Some);
        }
    }
    Ok(None)
}

fn parse_final_phase(key: &'static str, value: &str) -> Result<PhaseType, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid(key))
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_final_phase_defaults_when_unset() {
        assert_eq!(final_phase_setting(env(&[])).unwrap(), None);
        assert_eq!(
            final_phase_setting(env(&[("phase_finale_vippp", "  ")])).unwrap(),
            None
        );
    }

    #[test]
    fn test_final_phase_reads_lowercase_key() {
        assert_eq!(
            final_phase_setting(env(&[("phase_finale_vippp", "DETOX")])).unwrap(),
            Some(PhaseType::Detox)
        );
    }

    #[test]
    fn test_final_phase_accepts_uppercase_alias() {
        assert_eq!(
            final_phase_setting(env(&[("PHASE_FINALE_VIPPP", "equilibre")])).unwrap(),
            Some(PhaseType::Equilibre)
        );
    }

    #[test]
    fn test_lowercase_key_takes_precedence() {
        let vars = env(&[
            ("phase_finale_vippp", "detox"),
            ("PHASE_FINALE_VIPPP", "EQUILIBRE"),
        ]);
        assert_eq!(final_phase_setting(vars).unwrap(), Some(PhaseType::Detox));

        // A blank lowercase key falls through to the alias
        let vars = env(&[
            ("phase_finale_vippp", ""),
            ("PHASE_FINALE_VIPPP", "DETOX"),
        ]);
        assert_eq!(final_phase_setting(vars).unwrap(), Some(PhaseType::Detox));
    }

    #[test]
    fn test_unknown_final_phase_names_the_key() {
        assert!(matches!(
            final_phase_setting(env(&[("phase_finale_vippp", "KETO")])),
            Err(ConfigError::Invalid("phase_finale_vippp"))
        ));
        assert!(matches!(
            final_phase_setting(env(&[("PHASE_FINALE_VIPPP", "KETO")])),
            Err(ConfigError::Invalid("PHASE_FINALE_VIPPP"))
        ));
    }

    #[test]
    fn test_from_env_reads_lowercase_key() {
        std::env::remove_var("PHASE_FINALE_VIPPP");
        std::env::set_var("phase_finale_vippp", "DETOX");
        let config = Config::from_env().unwrap();
        std::env::remove_var("phase_finale_vippp");

        assert_eq!(config.program.final_phase_vippp, Some(PhaseType::Detox));
    }
}
