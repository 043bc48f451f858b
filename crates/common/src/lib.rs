//! Shared types for the identity client workspace
//!
//! Holds the pieces every other crate leans on: the `Secret` wrapper used for
//! management keys, the configuration error type, and `SdkConfig`, the
//! file-plus-environment configuration an embedding application loads once at
//! startup.

mod config;
mod error;
mod secret;

pub use config::{
    ClientSection, ENV_BASE_URL, ENV_MANAGEMENT_KEY, ENV_PROJECT_ID, HeaderEntry,
    ManagementSection, SdkConfig,
};
pub use error::{Error, Result};
pub use secret::Secret;
