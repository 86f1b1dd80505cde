//! End-to-end pipeline and report model for bucketwise.
//!
//! [`Pipeline`] scans the selected buckets, analyzes the scans and builds
//! recommendations, producing a serializable [`Report`]. [`Settings`] loads
//! the optional TOML settings file that configures each stage.

mod pipeline;
mod report;
mod settings;

pub use pipeline::{Pipeline, PipelineError};
pub use report::{Report, RunStatus, StorageSummary};
pub use settings::{Settings, SettingsError};
