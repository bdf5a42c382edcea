use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::{ChartConfig, PersistedState};

pub const PERSISTED_STATE_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedStateJsonContractV1 {
    pub schema_version: u32,
    pub state: PersistedState,
}

impl PersistedState {
    pub fn to_json(&self) -> ChartResult<String> {
        let payload = PersistedStateJsonContractV1 {
            schema_version: PERSISTED_STATE_JSON_SCHEMA_V1,
            state: self.clone(),
        };
        serde_json::to_string(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize persisted state: {e}"))
        })
    }

    /// Accepts both the versioned contract and a bare state object.
    pub fn from_json(input: &str) -> ChartResult<Self> {
        if let Ok(state) = serde_json::from_str::<PersistedState>(input) {
            return Ok(state);
        }
        let payload: PersistedStateJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse persisted state json: {e}"))
        })?;
        if payload.schema_version != PERSISTED_STATE_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported persisted state schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.state)
    }
}

impl ChartConfig {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Parses and validates a config; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
