use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub type DumpId = i64;

/// An indexed snapshot of one repository at one commit.
///
/// `root` is the directory prefix (with trailing slash, or empty) under which
/// every path stored in the dump's bundle lives.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dump {
    pub id: DumpId,
    pub repository_id: i64,
    pub commit: String,
    pub root: String,
}

impl Dump {
    pub fn new(id: DumpId, repository_id: i64, commit: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            id,
            repository_id,
            commit: commit.into(),
            root: root.into(),
        }
    }
}
