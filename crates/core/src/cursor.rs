//! Resumable reference-search state and its opaque token encoding.
//!
//! A token is the JSON form of a [`Cursor`] run through URL-safe base64
//! without padding. Only the fields of the active phase are written, so a
//! decoded cursor never carries state belonging to another phase.

use crate::error::{CodeNavError, Result};
use crate::paths::to_bundle_path;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use codenav_api::{BundleManagerClient, DumpId, DumpStore, MonikerData, PackageInformation};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(tag = "phase", rename_all = "kebab-case")]
pub enum Cursor {
    /// Position references and same-bundle moniker references of the origin dump.
    SameDump(SameDumpCursor),
    /// References stored next to the definition of an imported moniker.
    DefinitionMonikers(DefinitionMonikersCursor),
    /// Dependents of the package inside the origin repository.
    SameRepo(BatchCursor),
    /// Dependents of the package in every other repository.
    RemoteRepo(BatchCursor),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SameDumpCursor {
    pub dump_id: DumpId,
    /// Bundle-relative path of the queried document.
    pub path: String,
    pub line: u32,
    pub character: u32,
    pub monikers: Vec<MonikerData>,
    pub skip_results: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DefinitionMonikersCursor {
    pub dump_id: DumpId,
    pub path: String,
    pub monikers: Vec<MonikerData>,
    pub skip_results: usize,
}

/// State of a scan over candidate dumps fetched from the store in batches.
///
/// Progress is consumed innermost first: rows of the current dump
/// (`skip_results_in_dump`), then dumps of the current batch
/// (`skip_dumps_in_batch`), then batches (`skip_dumps_when_batching`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BatchCursor {
    /// The dump the search started from.
    pub dump_id: DumpId,
    pub scheme: String,
    pub identifier: String,
    pub name: String,
    pub version: String,
    /// Current batch of candidates; empty when the next batch has not been fetched.
    pub dump_ids: Vec<DumpId>,
    pub total_dumps_when_batching: usize,
    pub skip_dumps_when_batching: usize,
    pub skip_dumps_in_batch: usize,
    pub skip_results_in_dump: usize,
}

impl BatchCursor {
    pub fn new(dump_id: DumpId, moniker: &MonikerData, package: &PackageInformation) -> Self {
        Self {
            dump_id,
            scheme: moniker.scheme.clone(),
            identifier: moniker.identifier.clone(),
            name: package.name.clone(),
            version: package.version.clone(),
            dump_ids: Vec::new(),
            total_dumps_when_batching: 0,
            skip_dumps_when_batching: 0,
            skip_dumps_in_batch: 0,
            skip_results_in_dump: 0,
        }
    }

    /// Seed the scan with a known candidate list that never grows.
    pub fn with_candidates(mut self, dump_ids: Vec<DumpId>) -> Self {
        self.total_dumps_when_batching = dump_ids.len();
        self.dump_ids = dump_ids;
        self
    }

    /// Same package, counters zeroed. Used when moving to the next scope.
    pub fn restarted(self) -> Self {
        Self {
            dump_ids: Vec::new(),
            total_dumps_when_batching: 0,
            skip_dumps_when_batching: 0,
            skip_dumps_in_batch: 0,
            skip_results_in_dump: 0,
            ..self
        }
    }

    /// True before the first batch has been requested from the store.
    pub fn is_unstarted(&self) -> bool {
        self.dump_ids.is_empty()
            && self.total_dumps_when_batching == 0
            && self.skip_dumps_when_batching == 0
    }

    pub fn has_unfetched_dumps(&self) -> bool {
        self.skip_dumps_when_batching < self.total_dumps_when_batching
    }

    /// Position the cursor on the candidate following `index` in the current batch.
    ///
    /// Returns `None` once every candidate has been exhausted.
    pub fn advance_past(mut self, index: usize) -> Option<Self> {
        self.skip_results_in_dump = 0;
        if index + 1 < self.dump_ids.len() {
            self.skip_dumps_in_batch = index + 1;
            return Some(self);
        }

        self.skip_dumps_when_batching += self.dump_ids.len();
        self.dump_ids.clear();
        self.skip_dumps_in_batch = 0;
        self.has_unfetched_dumps().then_some(self)
    }

    fn validate(&self) -> Result<()> {
        if self.skip_dumps_in_batch > self.dump_ids.len() {
            return Err(CodeNavError::InvalidCursor(format!(
                "batch offset {} exceeds batch size {}",
                self.skip_dumps_in_batch,
                self.dump_ids.len()
            )));
        }
        if self.skip_dumps_when_batching > self.total_dumps_when_batching {
            return Err(CodeNavError::InvalidCursor(format!(
                "{} dumps skipped out of {}",
                self.skip_dumps_when_batching, self.total_dumps_when_batching
            )));
        }
        if self.dump_ids.is_empty() && self.skip_results_in_dump > 0 {
            return Err(CodeNavError::InvalidCursor(
                "result offset without a current dump".to_string(),
            ));
        }
        Ok(())
    }
}

impl Cursor {
    /// Build the first cursor of a reference search from a raw position.
    ///
    /// The monikers at the position are looked up once here and carried
    /// through every later phase.
    pub async fn fresh(
        store: &dyn DumpStore,
        bundles: &dyn BundleManagerClient,
        path: &str,
        line: u32,
        character: u32,
        dump_id: DumpId,
    ) -> Result<Self> {
        let dump = store
            .get_dump_by_id(dump_id)
            .await?
            .ok_or(CodeNavError::MissingDump(dump_id))?;

        let path_in_bundle = to_bundle_path(path, &dump.root);
        let monikers = bundles
            .bundle_client(dump.id)
            .monikers_by_position(path_in_bundle, line, character)
            .await?
            .into_iter()
            .flatten()
            .collect();

        Ok(Cursor::SameDump(SameDumpCursor {
            dump_id: dump.id,
            path: path_in_bundle.to_string(),
            line,
            character,
            monikers,
            skip_results: 0,
        }))
    }

    pub fn phase(&self) -> &'static str {
        match self {
            Cursor::SameDump(_) => "same-dump",
            Cursor::DefinitionMonikers(_) => "definition-monikers",
            Cursor::SameRepo(_) => "same-repo",
            Cursor::RemoteRepo(_) => "remote-repo",
        }
    }

    /// The dump the search started from.
    pub fn dump_id(&self) -> DumpId {
        match self {
            Cursor::SameDump(c) => c.dump_id,
            Cursor::DefinitionMonikers(c) => c.dump_id,
            Cursor::SameRepo(c) | Cursor::RemoteRepo(c) => c.dump_id,
        }
    }

    pub fn encode(&self) -> Result<String> {
        let raw = serde_json::to_vec(self)?;
        Ok(URL_SAFE_NO_PAD.encode(raw))
    }

    pub fn decode(token: &str) -> Result<Self> {
        let raw = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| CodeNavError::InvalidCursor(e.to_string()))?;
        let cursor: Cursor =
            serde_json::from_slice(&raw).map_err(|e| CodeNavError::InvalidCursor(e.to_string()))?;

        match &cursor {
            Cursor::SameRepo(batch) | Cursor::RemoteRepo(batch) => batch.validate()?,
            Cursor::SameDump(_) | Cursor::DefinitionMonikers(_) => {}
        }
        Ok(cursor)
    }
}
