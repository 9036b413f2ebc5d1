use serde::{Deserialize, Serialize};

use crate::core::TimelineTransform;
use crate::error::{ChartError, ChartResult};

use super::{GraphViewState, HoverUpdate, PeriodTickRow};

pub const HOVER_UPDATE_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverUpdateJsonContractV1 {
    pub schema_version: u32,
    pub hover: HoverUpdate,
}

impl HoverUpdate {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize hover update json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = HoverUpdateJsonContractV1 {
            schema_version: HOVER_UPDATE_JSON_SCHEMA_V1,
            hover: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize hover update contract v1: {e}"))
        })
    }

    /// Accepts both a bare payload and the versioned contract.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(hover) = serde_json::from_str::<HoverUpdate>(input) {
            return Ok(hover);
        }
        let payload: HoverUpdateJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse hover update json payload: {e}"))
        })?;
        if payload.schema_version != HOVER_UPDATE_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported hover update schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.hover)
    }
}

impl GraphViewState {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize graph view state json: {e}"))
        })
    }
}

impl TimelineTransform {
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize timeline transform json: {e}"))
        })
    }
}

/// Serializes the current timeline label rows.
pub fn period_tick_rows_to_json_pretty(rows: &[PeriodTickRow]) -> ChartResult<String> {
    serde_json::to_string_pretty(rows).map_err(|e| {
        ChartError::InvalidData(format!("failed to serialize period tick rows json: {e}"))
    })
}
