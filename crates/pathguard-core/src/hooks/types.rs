use std::io::{self, Read, Write};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::Result;
use crate::path::escape_control;

/// Exit status for an allowed operation.
pub const EXIT_ALLOW: u8 = 0;
/// Exit status the invoking tool reads as "operation blocked".
pub const EXIT_BLOCK: u8 = 2;

/// A hook request read from stdin.
///
/// The payload is kept opaque. Only `tool_input.file_path` drives the
/// decision; `tool_name` is read for logging.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct HookRequest {
    fields: Map<String, Value>,
}

impl HookRequest {
    /// Parse a request. Anything other than a JSON object is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read the whole stream, then parse it.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let raw = String::from_utf8(bytes)?;
        Self::parse(&raw)
    }

    /// The target file path, or `""` when it is missing or not a string.
    pub fn file_path(&self) -> &str {
        self.fields
            .get("tool_input")
            .and_then(|input| input.get("file_path"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn tool_name(&self) -> Option<&str> {
        self.fields.get("tool_name").and_then(Value::as_str)
    }
}

/// Outcome of validating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the write proceed.
    Allow,
    /// Block the write. `target` is what got rejected, `hint` names what is allowed.
    Deny { target: String, hint: String },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn exit_status(&self) -> u8 {
        match self {
            Decision::Allow => EXIT_ALLOW,
            Decision::Deny { .. } => EXIT_BLOCK,
        }
    }

    /// Write the stderr diagnostic: exactly two lines on Deny, nothing on Allow.
    /// Control characters in the text are escaped to keep it at two lines.
    pub fn write_diagnostic(&self, out: &mut impl Write) -> io::Result<()> {
        if let Decision::Deny { target, hint } = self {
            writeln!(out, "BLOCKED: {}", escape_control(target))?;
            writeln!(out, "{}", escape_control(hint))?;
        }
        Ok(())
    }
}
