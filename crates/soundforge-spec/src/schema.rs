//! Introspectable schema description.
//!
//! Built from [`crate::ranges`], so the published limits are exactly the ones
//! the validator enforces and the path resolver clamps to.

use serde::Serialize;

use crate::ranges::{FieldSpec, FIELDS};
use crate::spec::{ALLOWED_SAMPLE_RATES, MAX_SAMPLES, NORMALIZE_CEILING, SPEC_VERSION};

/// Machine-readable description of the SoundSpec format.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDescription {
    pub version: &'static str,
    pub max_samples: usize,
    pub sample_rates: Vec<u32>,
    pub normalize_ceiling: f64,
    /// Every addressable field in document order.
    pub fields: Vec<FieldSpec>,
}

impl SchemaDescription {
    /// Looks up a field by schema path.
    pub fn field(&self, path: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.path == path)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Describes the current format.
pub fn describe() -> SchemaDescription {
    SchemaDescription {
        version: SPEC_VERSION,
        max_samples: MAX_SAMPLES,
        sample_rates: ALLOWED_SAMPLE_RATES.to_vec(),
        normalize_ceiling: NORMALIZE_CEILING,
        fields: FIELDS.iter().map(|f| **f).collect(),
    }
}
