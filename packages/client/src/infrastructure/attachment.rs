//! Reading local files into attachments.

use std::path::Path;

use crate::domain::Attachment;

/// Read a file picked by the user into memory.
pub async fn load_attachment(path: &Path) -> std::io::Result<Attachment> {
    let content = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    let content_type = mime_guess::from_path(path).first_or_octet_stream();
    tracing::debug!(
        "Loaded attachment {} ({} bytes, {})",
        file_name,
        content.len(),
        content_type
    );
    Ok(Attachment::new(file_name, content).with_content_type(content_type.essence_str()))
}
