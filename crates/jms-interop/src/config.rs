//! Harness configuration.

use std::path::Path;

use jms_interop_codec::CodecOptions;
use serde::{Deserialize, Serialize};

use crate::HarnessError;

/// Messages a sender may have in flight when no `--credit` is given.
pub const DEFAULT_CREDIT: usize = 10;

/// Settings shared by both binaries, loadable from a JSON file.
///
/// ```json
/// {"codec": {"notation": "literal", "string_prefix": "strict"}, "credit": 32}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub codec: CodecOptions,
    pub credit: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            codec: CodecOptions::default(),
            credit: DEFAULT_CREDIT,
        }
    }
}

impl HarnessConfig {
    pub fn from_json_str(text: &str) -> Result<Self, HarnessError> {
        let config: Self = serde_json::from_str(text)
            .map_err(|err| HarnessError::Config(format!("invalid config JSON: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            HarnessError::Config(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.credit == 0 {
            return Err(HarnessError::Config("credit must be at least 1".into()));
        }
        Ok(())
    }
}
