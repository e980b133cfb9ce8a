use super::CodeNavApi;
use crate::error::Result;
use crate::paths::to_bundle_path;
use codenav_api::{DumpId, Hover};

impl CodeNavApi {
    /// Hover text at a repository-relative position of a dump.
    ///
    /// Falls back to the hover text of the symbol's definition, which may live
    /// in another dump. `None` when neither exists.
    pub async fn hover(
        &self,
        path: &str,
        line: u32,
        character: u32,
        dump_id: DumpId,
    ) -> Result<Option<Hover>> {
        let dump = self.load_dump(dump_id).await?;
        let path_in_bundle = to_bundle_path(path, &dump.root);

        let bundle = self.bundles.bundle_client(dump.id);
        if let Some(hover) = bundle.hover(path_in_bundle, line, character).await? {
            return Ok(Some(hover));
        }

        let Some(definition) = self
            .definitions_raw(&dump, path_in_bundle, line, character, Some(1))
            .await?
            .into_iter()
            .next()
        else {
            return Ok(None);
        };

        tracing::debug!(
            dump_id,
            definition_dump_id = definition.dump.id,
            path = %definition.path,
            "hover falls back to definition"
        );

        let path_in_definition_bundle = to_bundle_path(&definition.path, &definition.dump.root);
        let hover = self
            .bundles
            .bundle_client(definition.dump.id)
            .hover(
                path_in_definition_bundle,
                definition.range.start.line,
                definition.range.start.character,
            )
            .await?;
        Ok(hover)
    }
}
