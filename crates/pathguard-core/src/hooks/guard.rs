use std::io::Read;

use super::config::{GuardConfig, MalformedInput};
use super::types::{Decision, HookRequest};
use crate::Error;

/// Pre-write hook that only lets writes through to allowlisted paths.
#[derive(Debug, Clone, Default)]
pub struct PathGuard {
    config: GuardConfig,
}

impl PathGuard {
    pub fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    /// Validate one raw request.
    pub fn evaluate(&self, raw: &str) -> Decision {
        match HookRequest::parse(raw) {
            Ok(request) => self.evaluate_request(&request),
            Err(e) => self.malformed(e),
        }
    }

    /// Read the whole stream, then validate it. Read failures and non-UTF-8
    /// bytes are malformed input like any parse failure.
    pub fn evaluate_reader(&self, reader: impl Read) -> Decision {
        match HookRequest::from_reader(reader) {
            Ok(request) => self.evaluate_request(&request),
            Err(e) => self.malformed(e),
        }
    }

    pub fn evaluate_request(&self, request: &HookRequest) -> Decision {
        tracing::debug!(
            tool = request.tool_name().unwrap_or("<none>"),
            path = request.file_path(),
            "Validating write target"
        );
        self.check_path(request.file_path())
    }

    /// Match an extracted path against the allowlist.
    pub fn check_path(&self, path: &str) -> Decision {
        if let Some(pattern) = self.config.allow_list.first_match(path) {
            tracing::debug!(path, pattern = pattern.as_str(), "Write allowed");
            return Decision::Allow;
        }
        tracing::info!(path, "Write blocked: path is not allowlisted");
        Decision::Deny {
            target: path.to_string(),
            hint: self.config.allow_list.hint(),
        }
    }

    fn malformed(&self, error: Error) -> Decision {
        match self.config.on_malformed {
            MalformedInput::FailOpen => {
                tracing::warn!("Unreadable hook input, nothing to validate: {error}");
                Decision::Allow
            }
            MalformedInput::FailClosed => {
                tracing::warn!("Unreadable hook input, blocking: {error}");
                Decision::Deny {
                    target: format!("<unreadable hook input: {error}>"),
                    hint: self.config.allow_list.hint(),
                }
            }
        }
    }
}
