//! Engine configuration.
//!
//! Every field has a default matching the stock tables, so an empty YAML
//! document (or `EngineConfig::default()`) is a valid configuration.

use parlor_types::casino::{
    BINGO_POOL, DEFAULT_TICK_INTERVAL_MS, KENO_CALLS, KENO_POOL, MAX_MINES_GRID_SIDE,
    MINES_GRID_SIDE,
};
use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Spacing between scheduled ticks (curve growth, Keno calls, Tower floors).
    pub tick_interval_ms: u64,
    /// Numbers called per Keno round.
    pub keno_calls: u8,
    /// Most numbers a Bingo round may call before it is declared lost.
    pub bingo_call_quota: u8,
    /// Side length of the square Mines grid.
    pub mines_grid_side: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            keno_calls: KENO_CALLS,
            bingo_call_quota: BINGO_POOL,
            mines_grid_side: MINES_GRID_SIDE,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.tick_interval_ms == 0 {
            return Err(EngineError::InvalidConfig("tick_interval_ms must be positive"));
        }
        if self.keno_calls == 0 || self.keno_calls > KENO_POOL {
            return Err(EngineError::InvalidConfig("keno_calls must be in 1..=80"));
        }
        if self.bingo_call_quota == 0 || self.bingo_call_quota > BINGO_POOL {
            return Err(EngineError::InvalidConfig("bingo_call_quota must be in 1..=75"));
        }
        if self.mines_grid_side < 2 || self.mines_grid_side > MAX_MINES_GRID_SIDE {
            return Err(EngineError::InvalidConfig("mines_grid_side must be in 2..=8"));
        }
        Ok(())
    }

    /// Cells on the Mines grid.
    pub fn mines_cells(&self) -> u8 {
        self.mines_grid_side * self.mines_grid_side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        assert_eq!(EngineConfig::default().mines_cells(), 25);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: EngineConfig = serde_yaml::from_str("tick_interval_ms: 50\n").unwrap();
        assert_eq!(config.tick_interval_ms, 50);
        assert_eq!(config.keno_calls, KENO_CALLS);
        assert_eq!(config.bingo_call_quota, BINGO_POOL);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_yaml::from_str::<EngineConfig>("tick_ms: 50\n").is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = EngineConfig {
            tick_interval_ms: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            mines_grid_side: 9,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            bingo_call_quota: 76,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
