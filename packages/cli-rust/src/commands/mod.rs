//! CLI command implementations
//!
//! This module contains the implementations for script access and
//! configuration commands.

mod config;
mod export;
mod get;
mod list;
mod verify;

pub use config::{ConfigArgs, cmd_config};
pub use export::{ExportArgs, cmd_export};
pub use get::{GetArgs, cmd_get};
pub use list::{ListArgs, cmd_list};
pub use verify::{VerifyArgs, cmd_verify};
