//! Tool detection with actionable hints when something is missing

use std::path::PathBuf;

use anyhow::Result;
use which::which;

use crate::error::{hints, CmkopError};

/// Get installation hint for a tool
fn get_tool_hint(tool_name: &str) -> &'static str {
    match tool_name {
        "cmake" => hints::cmake(),
        _ => "Install this tool and ensure it's in your PATH",
    }
}

/// Require a tool to exist on PATH, return error with hint if missing
pub fn require_tool(tool_name: &str, required_for: &str) -> Result<PathBuf> {
    match which(tool_name) {
        Ok(path) => Ok(path),
        Err(_) => Err(CmkopError::missing_tool(
            tool_name,
            required_for,
            get_tool_hint(tool_name),
        )
        .into()),
    }
}
