use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a moniker relates to the dump it was read from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MonikerKind {
    /// Symbol defined in another package and used here.
    Import,
    /// Symbol defined here and visible to dependents.
    Export,
    /// Symbol defined here and not visible outside the dump.
    Local,
}

impl MonikerKind {
    /// Whether the dump carrying the moniker is expected to hold the definition.
    pub fn is_defined_locally(self) -> bool {
        !matches!(self, MonikerKind::Import)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonikerData {
    pub kind: MonikerKind,
    pub scheme: String,
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_information_id: Option<String>,
}

impl MonikerData {
    pub fn new(kind: MonikerKind, scheme: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            scheme: scheme.into(),
            identifier: identifier.into(),
            package_information_id: None,
        }
    }

    pub fn with_package(mut self, package_information_id: impl Into<String>) -> Self {
        self.package_information_id = Some(package_information_id.into());
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct PackageInformation {
    pub name: String,
    pub version: String,
}

/// Which moniker table of a bundle to read.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Definitions,
    References,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Definitions => f.write_str("definitions"),
            ModelKind::References => f.write_str("references"),
        }
    }
}
