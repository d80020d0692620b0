//! Source locations.
//!
//! Mirrors the ESTree `loc` object produced by parsers run with location
//! tracking: 1-based lines, 0-based columns.

use std::fmt;

use serde::Deserialize;

/// A line/column position in the source text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Deserialize)]
pub struct Position {
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

/// Start/end positions of a node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

impl SourceLocation {
    pub const fn new(start: Position, end: Position) -> Self {
        SourceLocation { start, end }
    }

    /// A location covering whole lines `start..=end`.
    pub const fn lines(start: u32, end: u32) -> Self {
        SourceLocation {
            start: Position::new(start, 0),
            end: Position::new(end, 0),
        }
    }

    /// A location on a single line.
    pub const fn line(line: u32) -> Self {
        Self::lines(line, line)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

/// Nodes that may carry a source location.
pub trait Located {
    fn loc(&self) -> Option<&SourceLocation>;

    /// Line the node starts on.
    fn line(&self) -> Option<u32> {
        self.loc().map(|loc| loc.start.line)
    }

    /// Line the node ends on.
    fn end_line(&self) -> Option<u32> {
        self.loc().map(|loc| loc.end.line)
    }
}
