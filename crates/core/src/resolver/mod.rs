//! Cross-dump resolution of definitions, hover text and references.
//!
//! Every query starts in the dump named by the caller and widens its search
//! only when the narrower scope produced nothing: the bundle's own position
//! data, then monikers defined in the same bundle, then other dumps of the
//! same repository, then dumps of other repositories linked by package
//! metadata.

mod batch;
mod definitions;
mod hover;
mod references;

pub use references::ReferencesPage;

use crate::config::ResolverConfig;
use crate::error::{CodeNavError, Result};
use crate::paths::to_repo_path;
use codenav_api::{
    BundleManagerClient, Dump, DumpId, DumpStore, Location, ModelKind, MonikerData,
    ResolvedLocation,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct CodeNavApi {
    store: Arc<dyn DumpStore>,
    bundles: Arc<dyn BundleManagerClient>,
    config: ResolverConfig,
}

impl CodeNavApi {
    pub fn new(
        store: Arc<dyn DumpStore>,
        bundles: Arc<dyn BundleManagerClient>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            store,
            bundles,
            config,
        }
    }

    async fn load_dump(&self, id: DumpId) -> Result<Dump> {
        self.store
            .get_dump_by_id(id)
            .await?
            .ok_or(CodeNavError::MissingDump(id))
    }

    /// Find the dump defining an imported moniker and read its moniker table.
    ///
    /// Returns an empty page when the moniker has no package information or
    /// no dump publishes the package.
    async fn lookup_moniker(
        &self,
        dump_id: DumpId,
        path: &str,
        model: ModelKind,
        moniker: &MonikerData,
        skip: usize,
        take: Option<usize>,
    ) -> Result<ResolvedPage> {
        let Some(package_information_id) = &moniker.package_information_id else {
            return Ok(ResolvedPage::default());
        };

        let package = self
            .bundles
            .bundle_client(dump_id)
            .package_information(path, package_information_id)
            .await?;

        let Some(dump) = self
            .store
            .get_package(&moniker.scheme, &package.name, &package.version)
            .await?
        else {
            tracing::debug!(
                scheme = %moniker.scheme,
                name = %package.name,
                version = %package.version,
                "no dump publishes package"
            );
            return Ok(ResolvedPage::default());
        };

        let page = self
            .bundles
            .bundle_client(dump.id)
            .moniker_results(model, &moniker.scheme, &moniker.identifier, skip, take)
            .await?;

        Ok(ResolvedPage {
            locations: resolve_locations(&dump, page.locations),
            total_count: page.total_count,
        })
    }
}

#[derive(Debug, Default)]
struct ResolvedPage {
    locations: Vec<ResolvedLocation>,
    total_count: usize,
}

/// Translate bundle locations into repository paths of the dump that produced them.
fn resolve_locations(dump: &Dump, locations: Vec<Location>) -> Vec<ResolvedLocation> {
    locations
        .into_iter()
        .map(|location| ResolvedLocation {
            dump: dump.clone(),
            path: to_repo_path(&location.path, &dump.root),
            range: location.range,
        })
        .collect()
}
