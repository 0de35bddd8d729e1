use std::path::Path;

use eyre::WrapErr;
use serde::{Deserialize, Serialize};

/// What the resolver does when a gate input overlaps more sources than it has
/// slots for.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GateOverflow {
    // first two in list order win, the rest are dropped with a warning
    #[default]
    FirstTwo,
    Reject,
}

/// What the resolver does with combinational loops in the resolved mapping.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CyclePolicy {
    Ignore,
    #[default]
    Warn,
    Reject,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // changing steps allowed before a run is reported as not converging
    pub max_steps: usize,
    pub gate_overflow: GateOverflow,
    pub cycle_policy: CyclePolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            gate_overflow: GateOverflow::default(),
            cycle_policy: CyclePolicy::default(),
        }
    }
}

impl SimulationConfig {
    pub fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("cannot read config {}", path.display()))?;

        Self::from_json(&text).wrap_err_with(|| format!("invalid config {}", path.display()))
    }

    pub fn from_json(text: &str) -> eyre::Result<Self> {
        let config: SimulationConfig = serde_json::from_str(text)?;
        eyre::ensure!(config.max_steps > 0, "max_steps must be at least 1");

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unittest_config_partial_json() -> eyre::Result<()> {
        let config = SimulationConfig::from_json(r#"{ "cycle_policy": "reject" }"#)?;

        assert_eq!(config.cycle_policy, CyclePolicy::Reject);
        assert_eq!(config.gate_overflow, GateOverflow::FirstTwo);
        assert_eq!(config.max_steps, 1000);

        Ok(())
    }

    #[test]
    fn unittest_config_rejects_zero_steps() {
        assert!(SimulationConfig::from_json(r#"{ "max_steps": 0 }"#).is_err());
    }

    #[test]
    fn unittest_policy_parse() {
        assert_eq!("firsttwo".parse::<GateOverflow>().unwrap(), GateOverflow::FirstTwo);
        assert_eq!("ignore".parse::<CyclePolicy>().unwrap(), CyclePolicy::Ignore);
        assert!("sometimes".parse::<CyclePolicy>().is_err());
    }
}
