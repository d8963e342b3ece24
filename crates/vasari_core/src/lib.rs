//! Core data types for the Vasari media engine.
//!
//! This crate provides the foundation data types shared across the Vasari
//! workspace: media references and their device metadata, birthprints used
//! for similarity recovery, validation results, configuration presets, and
//! directory descriptors.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod birthprint;
mod config;
mod directory;
mod media_kind;
mod reference;
mod result;
mod telemetry;

pub use birthprint::Birthprint;
pub use config::{ValidationConfig, ValidationConfigBuilder};
pub use directory::MediaDirectoryDescriptor;
pub use media_kind::MediaKind;
pub use reference::{DeviceMetadata, MediaReference};
pub use result::{BatchValidationResult, RecoveryMethod, ValidationResult};
pub use telemetry::init_telemetry;
