//! Configuration for the envgen control surface.
//!
//! - [`EditorConfig`] - TOML settings: readout precision, slider resolution,
//!   lane palette, log filter
//! - [`Snapshot`] - JSON parameter snapshots in the backend's `getState`
//!   format
//! - [`paths`] - Platform config and snapshot locations
//!
//! # Example
//!
//! ```rust
//! use envgen_config::EditorConfig;
//!
//! let config = EditorConfig::from_toml("[view]\nprecision = 1\n").unwrap();
//! assert_eq!(config.view.precision, 1);
//! ```

pub mod error;
pub mod paths;
pub mod settings;
pub mod snapshot;

pub use error::ConfigError;
pub use paths::{
    editor_config_path, find_snapshot, find_snapshot_in, list_snapshots_in, user_config_dir,
    user_snapshots_dir,
};
pub use settings::{
    DEFAULT_SLIDER_STEP, EditorConfig, LanesConfig, MAX_PRECISION, ViewConfig,
};
pub use snapshot::Snapshot;
