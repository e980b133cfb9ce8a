use super::{CodeNavApi, resolve_locations};
use crate::cursor::BatchCursor;
use crate::error::Result;
use codenav_api::{CandidateQuery, ModelKind, ResolvedLocation};

/// Where a scan finds more candidates once its current batch is used up.
pub(super) enum CandidateSource {
    Store(CandidateQuery),
    /// The cursor already holds every candidate.
    Fixed,
}

pub(super) struct BatchStep {
    pub locations: Vec<ResolvedLocation>,
    /// `None` when every candidate has been exhausted.
    pub next: Option<BatchCursor>,
}

impl BatchStep {
    fn exhausted() -> Self {
        Self {
            locations: Vec::new(),
            next: None,
        }
    }
}

impl CodeNavApi {
    /// One unit of work of a batched scan.
    ///
    /// Returns rows from the first candidate at or after the cursor position
    /// that has any, plus the cursor addressing the row after the last one
    /// returned. A batch without rows yields an empty step that points at the
    /// next batch. The origin dump is never scanned.
    pub(super) async fn scan_batch(
        &self,
        mut cursor: BatchCursor,
        source: &CandidateSource,
        model: ModelKind,
        take: Option<usize>,
    ) -> Result<BatchStep> {
        if cursor.dump_ids.is_empty() {
            let CandidateSource::Store(query) = source else {
                return Ok(BatchStep::exhausted());
            };
            if !cursor.is_unstarted() && !cursor.has_unfetched_dumps() {
                return Ok(BatchStep::exhausted());
            }

            let offset = cursor.skip_dumps_when_batching;
            let page = self
                .store
                .candidate_dumps(query, offset, self.config.remote_dump_limit.max(1))
                .await?;
            tracing::debug!(
                offset,
                fetched = page.dump_ids.len(),
                total = page.total_count,
                scheme = %cursor.scheme,
                identifier = %cursor.identifier,
                "fetched candidate batch"
            );

            cursor.total_dumps_when_batching = page.total_count.max(offset + page.dump_ids.len());
            if page.dump_ids.is_empty() {
                return Ok(BatchStep::exhausted());
            }
            cursor.dump_ids = page.dump_ids;
            cursor.skip_dumps_in_batch = 0;
            cursor.skip_results_in_dump = 0;
        }

        for index in cursor.skip_dumps_in_batch..cursor.dump_ids.len() {
            let dump_id = cursor.dump_ids[index];
            if dump_id == cursor.dump_id {
                continue;
            }

            let skip = if index == cursor.skip_dumps_in_batch {
                cursor.skip_results_in_dump
            } else {
                0
            };

            let dump = self.load_dump(dump_id).await?;
            let page = self
                .bundles
                .bundle_client(dump_id)
                .moniker_results(model, &cursor.scheme, &cursor.identifier, skip, take)
                .await?;
            tracing::trace!(
                dump_id,
                skip,
                rows = page.locations.len(),
                total = page.total_count,
                "scanned candidate"
            );

            if page.locations.is_empty() {
                continue;
            }

            let consumed = skip + page.locations.len();
            let locations = resolve_locations(&dump, page.locations);
            let next = if consumed < page.total_count {
                Some(BatchCursor {
                    skip_dumps_in_batch: index,
                    skip_results_in_dump: consumed,
                    ..cursor
                })
            } else {
                cursor.advance_past(index)
            };
            return Ok(BatchStep { locations, next });
        }

        let last = cursor.dump_ids.len().saturating_sub(1);
        Ok(BatchStep {
            locations: Vec::new(),
            next: cursor.advance_past(last),
        })
    }

    /// Run a scan until some candidate yields rows, returning only those rows.
    pub(super) async fn first_batch_hit(
        &self,
        mut cursor: BatchCursor,
        source: &CandidateSource,
        model: ModelKind,
        take: Option<usize>,
    ) -> Result<Vec<ResolvedLocation>> {
        loop {
            let step = self.scan_batch(cursor, source, model, take).await?;
            if !step.locations.is_empty() {
                return Ok(step.locations);
            }
            match step.next {
                Some(next) => cursor = next,
                None => return Ok(Vec::new()),
            }
        }
    }
}
