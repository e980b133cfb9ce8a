use crate::error::ApiResult;
use crate::models::{Dump, DumpId, ModelKind};
use async_trait::async_trait;

/// Which dumps a candidate scan may visit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CandidateScope {
    /// Dumps of the given repository visible from `commit`.
    SameRepository { repository_id: i64, commit: String },
    /// Dumps of every repository except the given one.
    RemoteRepositories { excluding_repository_id: i64 },
}

/// Describes the dumps a batched scan walks over.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateQuery {
    pub scope: CandidateScope,
    /// `Definitions` asks for dumps publishing the package, `References` for
    /// dumps depending on it.
    pub role: ModelKind,
    pub scheme: String,
    pub name: String,
    pub version: String,
    /// Stores may use this to drop candidates that cannot mention the symbol.
    pub identifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePage {
    /// Number of candidates matching the query, independent of paging.
    pub total_count: usize,
    pub dump_ids: Vec<DumpId>,
}

/// Metadata store mapping dump ids and packages to dumps.
///
/// Candidate ordering must be stable between calls so that offsets carried in a
/// cursor keep pointing at the same dumps.
#[async_trait]
pub trait DumpStore: Send + Sync {
    async fn get_dump_by_id(&self, id: DumpId) -> ApiResult<Option<Dump>>;

    /// Find the dump that publishes the given package.
    async fn get_package(&self, scheme: &str, name: &str, version: &str) -> ApiResult<Option<Dump>>;

    async fn candidate_dumps(
        &self,
        query: &CandidateQuery,
        offset: usize,
        limit: usize,
    ) -> ApiResult<CandidatePage>;
}
