use crate::error::ApiResult;
use crate::models::{DumpId, Hover, Location, LocationPage, ModelKind, MonikerData, PackageInformation};
use async_trait::async_trait;
use std::sync::Arc;

/// Query interface of a single processed dump.
///
/// Every path taken or returned is relative to the dump root.
#[async_trait]
pub trait BundleClient: Send + Sync {
    async fn definitions(&self, path: &str, line: u32, character: u32) -> ApiResult<Vec<Location>>;

    async fn references(&self, path: &str, line: u32, character: u32) -> ApiResult<Vec<Location>>;

    /// Monikers attached to each range enclosing the position, innermost range first.
    async fn monikers_by_position(
        &self,
        path: &str,
        line: u32,
        character: u32,
    ) -> ApiResult<Vec<Vec<MonikerData>>>;

    /// Rows of the given moniker table. `take = None` returns every row after `skip`.
    async fn moniker_results(
        &self,
        model: ModelKind,
        scheme: &str,
        identifier: &str,
        skip: usize,
        take: Option<usize>,
    ) -> ApiResult<LocationPage>;

    async fn hover(&self, path: &str, line: u32, character: u32) -> ApiResult<Option<Hover>>;

    async fn package_information(
        &self,
        path: &str,
        package_information_id: &str,
    ) -> ApiResult<PackageInformation>;
}

/// Hands out bundle clients by dump id.
pub trait BundleManagerClient: Send + Sync {
    fn bundle_client(&self, dump_id: DumpId) -> Arc<dyn BundleClient>;
}
