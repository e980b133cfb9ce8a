use super::batch::CandidateSource;
use super::{CodeNavApi, resolve_locations};
use crate::cursor::{BatchCursor, Cursor, DefinitionMonikersCursor, SameDumpCursor};
use crate::error::Result;
use crate::request::CursorRequest;
use codenav_api::{
    CandidateQuery, CandidateScope, Location, ModelKind, MonikerKind, ResolvedLocation,
};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferencesPage {
    pub locations: Vec<ResolvedLocation>,
    /// Resume point for the following page; `None` once the search is exhausted.
    pub next_cursor: Option<Cursor>,
}

/// Result of a single phase handler invocation.
struct Step {
    locations: Vec<ResolvedLocation>,
    next: Option<Cursor>,
}

impl Step {
    fn new(locations: Vec<ResolvedLocation>, next: Option<Cursor>) -> Self {
        Self { locations, next }
    }
}

impl CodeNavApi {
    /// Resolve the cursor a request resumes, or start a new search at its position.
    pub async fn cursor_for(&self, request: CursorRequest) -> Result<Cursor> {
        request
            .into_cursor(self.store.as_ref(), self.bundles.as_ref())
            .await
    }

    /// One page of references, at most `limit` long (`None` uses the configured default).
    ///
    /// Phase handlers run back to back until the page is full or the search
    /// runs out of phases.
    pub async fn references(&self, cursor: Cursor, limit: Option<usize>) -> Result<ReferencesPage> {
        let mut remaining = limit
            .unwrap_or(self.config.default_page_limit)
            .clamp(1, self.config.max_page_limit.max(1));
        let mut locations = Vec::new();
        let mut cursor = cursor;

        loop {
            tracing::debug!(
                phase = cursor.phase(),
                dump_id = cursor.dump_id(),
                remaining,
                "resolving reference page"
            );
            let step = self.dispatch_cursor(cursor, remaining).await?;

            remaining = remaining.saturating_sub(step.locations.len());
            locations.extend(step.locations);

            match step.next {
                Some(next) if remaining > 0 => cursor = next,
                next_cursor => {
                    return Ok(ReferencesPage {
                        locations,
                        next_cursor,
                    });
                }
            }
        }
    }

    async fn dispatch_cursor(&self, cursor: Cursor, limit: usize) -> Result<Step> {
        match cursor {
            Cursor::SameDump(c) => self.handle_same_dump(c, limit).await,
            Cursor::DefinitionMonikers(c) => self.handle_definition_monikers(c, limit).await,
            Cursor::SameRepo(c) => self.handle_same_repo(c, limit).await,
            Cursor::RemoteRepo(c) => self.handle_remote_repo(c, limit).await,
        }
    }

    /// References recorded in the origin bundle itself, either linked to the
    /// position or attached to one of its monikers.
    async fn handle_same_dump(&self, cursor: SameDumpCursor, limit: usize) -> Result<Step> {
        let dump = self.load_dump(cursor.dump_id).await?;
        let bundle = self.bundles.bundle_client(dump.id);

        let mut locations = bundle
            .references(&cursor.path, cursor.line, cursor.character)
            .await?;
        for moniker in &cursor.monikers {
            let page = bundle
                .moniker_results(
                    ModelKind::References,
                    &moniker.scheme,
                    &moniker.identifier,
                    0,
                    None,
                )
                .await?;
            locations.extend(page.locations);
        }

        let locations = dedupe_locations(locations);
        let total = locations.len();
        let window: Vec<Location> = locations
            .into_iter()
            .skip(cursor.skip_results)
            .take(limit)
            .collect();
        let resolved = resolve_locations(&dump, window);

        let next_offset = cursor.skip_results + limit;
        let next = if next_offset < total {
            Cursor::SameDump(SameDumpCursor {
                skip_results: next_offset,
                ..cursor
            })
        } else {
            Cursor::DefinitionMonikers(DefinitionMonikersCursor {
                dump_id: cursor.dump_id,
                path: cursor.path,
                monikers: cursor.monikers,
                skip_results: 0,
            })
        };

        Ok(Step::new(resolved, Some(next)))
    }

    /// References stored in the dump that defines an imported moniker.
    async fn handle_definition_monikers(
        &self,
        cursor: DefinitionMonikersCursor,
        limit: usize,
    ) -> Result<Step> {
        let mut next_phase = None;
        let seed = cursor.monikers.iter().find_map(|moniker| {
            moniker
                .package_information_id
                .as_ref()
                .map(|id| (moniker, id))
        });
        if let Some((moniker, id)) = seed {
            let package = self
                .bundles
                .bundle_client(cursor.dump_id)
                .package_information(&cursor.path, id)
                .await?;
            next_phase = Some(Cursor::SameRepo(BatchCursor::new(
                cursor.dump_id,
                moniker,
                &package,
            )));
        }

        let mut hit = None;
        for moniker in cursor
            .monikers
            .iter()
            .filter(|m| m.kind == MonikerKind::Import)
        {
            let page = self
                .lookup_moniker(
                    cursor.dump_id,
                    &cursor.path,
                    ModelKind::References,
                    moniker,
                    cursor.skip_results,
                    Some(limit),
                )
                .await?;
            if !page.locations.is_empty() {
                hit = Some(page);
                break;
            }
        }

        let Some(page) = hit else {
            return Ok(Step::new(Vec::new(), next_phase));
        };

        let consumed = cursor.skip_results + page.locations.len();
        if consumed < page.total_count {
            let next = Cursor::DefinitionMonikers(DefinitionMonikersCursor {
                skip_results: consumed,
                ..cursor
            });
            return Ok(Step::new(page.locations, Some(next)));
        }
        Ok(Step::new(page.locations, next_phase))
    }

    /// Dependents of the package among the origin repository's other dumps.
    async fn handle_same_repo(&self, cursor: BatchCursor, limit: usize) -> Result<Step> {
        let origin = self.load_dump(cursor.dump_id).await?;
        let query = reference_query(
            &cursor,
            CandidateScope::SameRepository {
                repository_id: origin.repository_id,
                commit: origin.commit,
            },
        );

        let restart = cursor.clone().restarted();
        let step = self
            .scan_batch(
                cursor,
                &CandidateSource::Store(query),
                ModelKind::References,
                Some(limit),
            )
            .await?;

        let next = match step.next {
            Some(next) => Cursor::SameRepo(next),
            None => Cursor::RemoteRepo(restart),
        };
        Ok(Step::new(step.locations, Some(next)))
    }

    /// Dependents of the package in every other repository.
    async fn handle_remote_repo(&self, cursor: BatchCursor, limit: usize) -> Result<Step> {
        let origin = self.load_dump(cursor.dump_id).await?;
        let query = reference_query(
            &cursor,
            CandidateScope::RemoteRepositories {
                excluding_repository_id: origin.repository_id,
            },
        );

        let step = self
            .scan_batch(
                cursor,
                &CandidateSource::Store(query),
                ModelKind::References,
                Some(limit),
            )
            .await?;
        Ok(Step::new(step.locations, step.next.map(Cursor::RemoteRepo)))
    }
}

fn reference_query(cursor: &BatchCursor, scope: CandidateScope) -> CandidateQuery {
    CandidateQuery {
        scope,
        role: ModelKind::References,
        scheme: cursor.scheme.clone(),
        name: cursor.name.clone(),
        version: cursor.version.clone(),
        identifier: cursor.identifier.clone(),
    }
}

/// Drop repeated (dump, path, range) rows, keeping first occurrences in order.
fn dedupe_locations(locations: Vec<Location>) -> Vec<Location> {
    let mut seen = HashSet::new();
    locations
        .into_iter()
        .filter(|location| seen.insert(location.clone()))
        .collect()
}
