use codenav_core::{Cursor, CursorRequest};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParsedRequest {
    request: CursorRequest,
    /// Present when the request resumes an earlier page.
    #[serde(skip_serializing_if = "Option::is_none")]
    resumes: Option<Cursor>,
}

pub fn run(query: &str) -> anyhow::Result<String> {
    let request = CursorRequest::from_query(query);
    let resumes = request.cursor.as_deref().map(Cursor::decode).transpose()?;
    if resumes.is_none() && request.upload_id == 0 {
        tracing::warn!("request has neither a cursor nor an upload id");
    }

    Ok(serde_json::to_string_pretty(&ParsedRequest { request, resumes })?)
}
