use super::dump::{Dump, DumpId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start_line: u32, start_character: u32, end_line: u32, end_character: u32) -> Self {
        Self {
            start: Position {
                line: start_line,
                character: start_character,
            },
            end: Position {
                line: end_line,
                character: end_character,
            },
        }
    }
}

/// A range inside a bundle. `path` is relative to the owning dump's root.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub dump_id: DumpId,
    pub path: String,
    pub range: Range,
}

impl Location {
    pub fn new(dump_id: DumpId, path: impl Into<String>, range: Range) -> Self {
        Self {
            dump_id,
            path: path.into(),
            range,
        }
    }
}

/// A location translated back into repository coordinates and tagged with
/// the dump that produced it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ResolvedLocation {
    pub dump: Dump,
    pub path: String,
    pub range: Range,
}

/// One page of rows from a bundle's moniker index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationPage {
    pub locations: Vec<Location>,
    /// Number of matching rows regardless of skip/take.
    pub total_count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct Hover {
    pub text: String,
    pub range: Range,
}
