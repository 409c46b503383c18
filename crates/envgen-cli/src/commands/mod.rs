//! CLI command implementations.

pub mod convert;
pub mod params;
pub mod paths;
pub mod session;

use anyhow::anyhow;
use envgen_core::{ParamMeta, param_meta_by_id};

/// Catalogue entry for a host id, or a readable error.
pub fn lookup(id: &str) -> anyhow::Result<ParamMeta> {
    param_meta_by_id(id).ok_or_else(|| anyhow!("Unknown parameter: {id}"))
}
