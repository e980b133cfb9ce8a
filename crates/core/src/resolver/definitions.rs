use super::batch::CandidateSource;
use super::{CodeNavApi, resolve_locations};
use crate::cursor::BatchCursor;
use crate::error::Result;
use crate::paths::to_bundle_path;
use codenav_api::{
    CandidateQuery, CandidateScope, Dump, DumpId, ModelKind, MonikerData, PackageInformation,
    ResolvedLocation,
};

impl CodeNavApi {
    /// Definitions of the symbol at a repository-relative position of a dump.
    ///
    /// An empty result means nothing defines the symbol in any reachable dump.
    pub async fn definitions(
        &self,
        path: &str,
        line: u32,
        character: u32,
        dump_id: DumpId,
    ) -> Result<Vec<ResolvedLocation>> {
        let dump = self.load_dump(dump_id).await?;
        let path_in_bundle = to_bundle_path(path, &dump.root);
        self.definitions_raw(&dump, path_in_bundle, line, character, None)
            .await
    }

    /// Escalating definition search from a bundle-relative position.
    ///
    /// `take` bounds the rows read from moniker tables; position results are
    /// returned whole.
    pub(super) async fn definitions_raw(
        &self,
        dump: &Dump,
        path: &str,
        line: u32,
        character: u32,
        take: Option<usize>,
    ) -> Result<Vec<ResolvedLocation>> {
        let bundle = self.bundles.bundle_client(dump.id);

        let locations = bundle.definitions(path, line, character).await?;
        if !locations.is_empty() {
            tracing::debug!(dump_id = dump.id, phase = "local", "resolved definitions");
            return Ok(resolve_locations(dump, locations));
        }

        let monikers: Vec<MonikerData> = bundle
            .monikers_by_position(path, line, character)
            .await?
            .into_iter()
            .flatten()
            .collect();

        // Symbols defined in this dump but not linked to the position's result set.
        for moniker in monikers.iter().filter(|m| m.kind.is_defined_locally()) {
            let page = bundle
                .moniker_results(
                    ModelKind::Definitions,
                    &moniker.scheme,
                    &moniker.identifier,
                    0,
                    take,
                )
                .await?;
            if !page.locations.is_empty() {
                tracing::debug!(
                    dump_id = dump.id,
                    phase = "local-symbol",
                    identifier = %moniker.identifier,
                    "resolved definitions"
                );
                return Ok(resolve_locations(dump, page.locations));
            }
        }

        let mut imports: Vec<(&MonikerData, PackageInformation)> = Vec::new();
        for moniker in monikers.iter().filter(|m| !m.kind.is_defined_locally()) {
            if let Some(id) = &moniker.package_information_id {
                imports.push((moniker, bundle.package_information(path, id).await?));
            }
        }

        for (moniker, package) in &imports {
            let query = CandidateQuery {
                scope: CandidateScope::SameRepository {
                    repository_id: dump.repository_id,
                    commit: dump.commit.clone(),
                },
                role: ModelKind::Definitions,
                scheme: moniker.scheme.clone(),
                name: package.name.clone(),
                version: package.version.clone(),
                identifier: moniker.identifier.clone(),
            };
            let seed = BatchCursor::new(dump.id, moniker, package);
            let locations = self
                .first_batch_hit(
                    seed,
                    &CandidateSource::Store(query),
                    ModelKind::Definitions,
                    take,
                )
                .await?;
            if !locations.is_empty() {
                tracing::debug!(
                    dump_id = dump.id,
                    phase = "same-repo",
                    identifier = %moniker.identifier,
                    "resolved definitions"
                );
                return Ok(locations);
            }
        }

        for (moniker, package) in &imports {
            let Some(owner) = self
                .store
                .get_package(&moniker.scheme, &package.name, &package.version)
                .await?
            else {
                continue;
            };

            let seed = BatchCursor::new(dump.id, moniker, package).with_candidates(vec![owner.id]);
            let locations = self
                .first_batch_hit(seed, &CandidateSource::Fixed, ModelKind::Definitions, take)
                .await?;
            if !locations.is_empty() {
                tracing::debug!(
                    dump_id = dump.id,
                    owner = owner.id,
                    phase = "remote-repo",
                    identifier = %moniker.identifier,
                    "resolved definitions"
                );
                return Ok(locations);
            }
        }

        tracing::debug!(dump_id = dump.id, path, line, character, "no definitions found");
        Ok(Vec::new())
    }
}
