// ============================================================================
// Issue Service - Operações sobre issues do Taiga
// ============================================================================
//
// Mesmo conjunto de operações das tasks, sobre `/issues`. Issues têm
// classificação própria (type, severity, priority) definida por projeto.

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::attachments::{
    bind_attachment, create_attachment_for_endpoint, get_attachment_for_endpoint,
    list_attachments_for_endpoint,
};
use crate::client::TaigaClient;
use crate::custom_attributes::{edit_values_for_endpoint, get_values_for_endpoint, list_for_endpoint};
use crate::error::{Result, TaigaError};
use crate::query::QueryParams;
use crate::types::{
    require_id_and_version, require_project_and_subject, writable_body, Attachment,
    AttachmentsQueryParams, CustomAttribute, CustomAttributeValues, Issue, IssuesQueryParams,
    Project, ProjectRef,
};

const ENDPOINT: &str = "/issues";
const CUSTOM_ATTRIBUTES_ENDPOINT: &str = "/issue-custom-attributes";

/// Serviço de issues (`/issues`)
#[derive(Clone, Copy, Debug)]
pub struct IssueService<'a> {
    client: &'a TaigaClient,
}

impl<'a> IssueService<'a> {
    pub(crate) fn new(client: &'a TaigaClient) -> Self {
        Self { client }
    }

    /// Lista issues (`GET /issues`)
    ///
    /// Sem filtros explícitos usa o projeto padrão do cliente.
    pub async fn list(&self, params: Option<&IssuesQueryParams>) -> Result<Vec<Issue>> {
        let query = match params {
            Some(params) => params.to_query_pairs()?,
            None => self.client.default_project_query(),
        };
        let issues: Vec<Issue> = self.client.get_json(ENDPOINT, &query).await?;
        tracing::debug!("Listadas {} issues", issues.len());
        Ok(issues)
    }

    /// Cria uma issue (`POST /issues`)
    ///
    /// Sem `type`/`severity`/`priority` a API usa os padrões do projeto.
    pub async fn create(&self, issue: &Issue) -> Result<Issue> {
        require_project_and_subject(issue.project, &issue.subject)?;

        let body = writable_body(issue, true)?;
        let created: Issue = self.client.post_json(ENDPOINT, &body).await?;

        tracing::info!(
            "✅ Issue criada: #{} '{}' (id {:?})",
            created.reference.unwrap_or_default(),
            created.subject,
            created.id
        );
        Ok(created)
    }

    pub async fn get(&self, issue_id: i64) -> Result<Issue> {
        self.client.get_json(&format!("{}/{}", ENDPOINT, issue_id), &[]).await
    }

    /// `GET /issues/by_ref?ref=&project=` (ou `project__slug=`)
    pub async fn get_by_ref(&self, issue_ref: i64, project: &Project) -> Result<Issue> {
        let project_ref = ProjectRef::try_from(project)?;

        let mut query = vec![("ref".to_string(), issue_ref.to_string())];
        query.extend(project_ref.to_query_pairs());

        self.client.get_json(&format!("{}/by_ref", ENDPOINT), &query).await
    }

    /// `PATCH /issues/{id}` (exige `id` e `version`)
    pub async fn edit(&self, issue: &Issue) -> Result<Issue> {
        let issue_id = require_id_and_version("Issue", issue.id, issue.version)?;

        let body = writable_body(issue, false)?;
        let updated: Issue = self
            .client
            .patch_json(&format!("{}/{}", ENDPOINT, issue_id), &body)
            .await?;

        tracing::info!("✅ Issue {} atualizada (versão {:?})", issue_id, updated.version);
        Ok(updated)
    }

    pub async fn delete(&self, issue_id: i64) -> Result<()> {
        self.client.delete(&format!("{}/{}", ENDPOINT, issue_id)).await?;
        tracing::info!("🗑️ Issue {} removida", issue_id);
        Ok(())
    }

    // ==================== ANEXOS ====================

    pub async fn get_attachment(&self, attachment_id: i64) -> Result<Attachment> {
        get_attachment_for_endpoint(self.client, ENDPOINT, attachment_id).await
    }

    pub async fn list_attachments(&self, issue: &Issue) -> Result<Vec<Attachment>> {
        let issue_id = issue
            .id
            .ok_or_else(|| TaigaError::validation("Issue id is required to list attachments"))?;
        let params = AttachmentsQueryParams::new(issue.project, issue_id);
        list_attachments_for_endpoint(self.client, ENDPOINT, &params).await
    }

    pub async fn create_attachment(
        &self,
        attachment: Attachment,
        issue: &Issue,
        file_path: impl AsRef<Path>,
    ) -> Result<Attachment> {
        let attachment = bind_attachment(attachment, issue.id, issue.project)?;
        create_attachment_for_endpoint(self.client, ENDPOINT, &attachment, file_path).await
    }

    // ==================== CUSTOM ATTRIBUTES ====================

    pub async fn get_custom_attribute_values<T: DeserializeOwned>(
        &self,
        issue_id: i64,
    ) -> Result<CustomAttributeValues<T>> {
        get_values_for_endpoint(self.client, ENDPOINT, issue_id).await
    }

    pub async fn edit_custom_attribute_values<T>(
        &self,
        issue_id: i64,
        values: &CustomAttributeValues<T>,
    ) -> Result<CustomAttributeValues<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        edit_values_for_endpoint(self.client, ENDPOINT, issue_id, values).await
    }

    pub async fn list_custom_attributes(&self, project_id: i64) -> Result<Vec<CustomAttribute>> {
        list_for_endpoint(self.client, CUSTOM_ATTRIBUTES_ENDPOINT, project_id).await
    }
}
