// ============================================================================
// Attachments - Operações de anexo compartilhadas por tasks, issues e epics
// ============================================================================
//
// Todos os objetos do Taiga expõem o mesmo trio de endpoints de anexo:
//
// - GET  {endpoint}/attachments/{id}
// - GET  {endpoint}/attachments?object_id=&project=
// - POST {endpoint}/attachments            (multipart/form-data)
//
// Os serviços por recurso apenas repassam o próprio endpoint.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::client::TaigaClient;
use crate::error::{Result, TaigaError};
use crate::query::QueryParams;
use crate::types::{Attachment, AttachmentsQueryParams};

/// `GET {endpoint}/attachments/{attachment_id}`
pub async fn get_attachment_for_endpoint(
    client: &TaigaClient,
    endpoint: &str,
    attachment_id: i64,
) -> Result<Attachment> {
    let path = format!("{}/attachments/{}", endpoint, attachment_id);
    client.get_json(&path, &[]).await
}

/// `GET {endpoint}/attachments?object_id=&project=`
pub async fn list_attachments_for_endpoint(
    client: &TaigaClient,
    endpoint: &str,
    params: &AttachmentsQueryParams,
) -> Result<Vec<Attachment>> {
    if params.object_id.unwrap_or_default() <= 0 {
        return Err(TaigaError::validation("object_id is required to list attachments"));
    }

    let path = format!("{}/attachments", endpoint);
    let attachments: Vec<Attachment> = client.get_json(&path, &params.to_query_pairs()?).await?;

    tracing::debug!(
        "Listados {} anexos de {} {:?}",
        attachments.len(),
        endpoint,
        params.object_id
    );
    Ok(attachments)
}

/// Preenche `object_id` e `project` do anexo a partir do objeto pai
///
/// O projeto do próprio anexo tem prioridade; sem ele usa o do objeto pai.
pub(crate) fn bind_attachment(
    mut attachment: Attachment,
    object_id: Option<i64>,
    object_project: i64,
) -> Result<Attachment> {
    attachment.object_id = object_id
        .filter(|id| *id > 0)
        .ok_or_else(|| TaigaError::validation("The parent object has no ID"))?;

    if attachment.project <= 0 {
        if object_project > 0 {
            attachment.project = object_project;
        } else {
            return Err(TaigaError::validation(
                "Project ID could not be fetched from any possible source",
            ));
        }
    }
    Ok(attachment)
}

/// `POST {endpoint}/attachments` com o arquivo em `attached_file`
pub async fn create_attachment_for_endpoint(
    client: &TaigaClient,
    endpoint: &str,
    attachment: &Attachment,
    file_path: impl AsRef<Path>,
) -> Result<Attachment> {
    if attachment.object_id <= 0 || attachment.project <= 0 {
        return Err(TaigaError::validation(
            "object_id and project are required to upload an attachment",
        ));
    }

    let file_path = file_path.as_ref();
    let file_name = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| TaigaError::validation(format!("Invalid file path: {}", file_path.display())))?;

    let bytes = tokio::fs::read(file_path).await?;
    let size = bytes.len();

    let part = Part::bytes(bytes)
        .file_name(file_name.clone())
        .mime_str(mime_for(file_path))?;

    let mut form = Form::new()
        .text("object_id", attachment.object_id.to_string())
        .text("project", attachment.project.to_string())
        .part("attached_file", part);

    if let Some(ref description) = attachment.description {
        form = form.text("description", description.clone());
    }
    if let Some(from_comment) = attachment.from_comment {
        form = form.text("from_comment", from_comment.to_string());
    }

    let path = format!("{}/attachments", endpoint);
    let created: Attachment = client.post_multipart(&path, form).await?;

    tracing::info!(
        "📎 Anexo '{}' ({} bytes) enviado para {} {}",
        file_name,
        size,
        endpoint,
        attachment.object_id
    );
    Ok(created)
}

/// MIME type a partir da extensão (padrão `application/octet-stream`)
fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        "zip" => "application/zip",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}
