use crate::cursor::Cursor;
use crate::error::Result;
use codenav_api::{BundleManagerClient, DumpId, DumpStore};
use serde::Serialize;

/// Parameters of a paginated query, as sent in a URL query string.
///
/// Either `cursor` carries a token from a previous page, or the position
/// fields describe where a new search starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorRequest {
    pub cursor: Option<String>,
    pub path: String,
    pub line: u32,
    pub character: u32,
    pub upload_id: DumpId,
}

impl CursorRequest {
    /// Parse `cursor`, `path`, `line`, `character` and `uploadId` from a query string.
    ///
    /// Numbers that fail to parse are read as zero, which later surfaces as a
    /// missing dump rather than a parse error.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut request = CursorRequest::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "cursor" if !value.is_empty() => request.cursor = Some(value.into_owned()),
                "path" => request.path = value.into_owned(),
                "line" => request.line = value.parse().unwrap_or_default(),
                "character" => request.character = value.parse().unwrap_or_default(),
                "uploadId" => request.upload_id = value.parse().unwrap_or_default(),
                _ => {}
            }
        }

        request
    }

    /// Produce the cursor this request asks to resume, or a fresh one for its position.
    pub async fn into_cursor(
        self,
        store: &dyn DumpStore,
        bundles: &dyn BundleManagerClient,
    ) -> Result<Cursor> {
        if let Some(token) = &self.cursor {
            return Cursor::decode(token);
        }

        Cursor::fresh(
            store,
            bundles,
            &self.path,
            self.line,
            self.character,
            self.upload_id,
        )
        .await
    }
}
