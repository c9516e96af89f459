use serde::Serialize;

use crate::parsing::blocks::Block;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// The block was rendered, just not the way it was asked for.
    Warning,
    /// The block is missing from the output.
    Error,
}

/// A non-fatal per-block problem found while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderDiagnostic {
    pub line_start: usize,
    pub line_end: usize,
    pub severity: Severity,
    pub message: String,
}

impl RenderDiagnostic {
    pub fn new(block: &Block, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            line_start: block.line_start,
            line_end: block.line_end,
            severity,
            message: message.into(),
        }
    }
}
