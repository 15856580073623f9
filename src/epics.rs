// ============================================================================
// Epic Service - Operações sobre epics do Taiga
// ============================================================================
//
// Além do CRUD, anexos e custom attributes comuns a todos os objetos,
// epics expõem as user stories relacionadas.

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
    AttachmentsQueryParams, CustomAttribute, CustomAttributeValues, Epic, EpicsQueryParams,
    Project, ProjectRef, RelatedUserStory,
};

const ENDPOINT: &str = "/epics";
const CUSTOM_ATTRIBUTES_ENDPOINT: &str = "/epic-custom-attributes";

/// Serviço de epics (`/epics`)
#[derive(Clone, Copy, Debug)]
pub struct EpicService<'a> {
    client: &'a TaigaClient,
}

impl<'a> EpicService<'a> {
    pub(crate) fn new(client: &'a TaigaClient) -> Self {
        Self { client }
    }

    /// Lista epics
    ///
    /// Aceita filtro por `project` ou `project__slug`. Sem parâmetros aplica o
    /// projeto padrão do cliente.
    pub async fn list(&self, params: Option<&EpicsQueryParams>) -> Result<Vec<Epic>> {
        let query = match params {
            Some(params) => params.to_query_pairs()?,
            None => self.client.default_project_query(),
        };
        self.client.get_json(ENDPOINT, &query).await
    }

    /// Cria um epic (`POST /epics`)
    pub async fn create(&self, epic: &Epic) -> Result<Epic> {
        require_project_and_subject(epic.project, &epic.subject)?;

        let body = writable_body(epic, true)?;
        let created: Epic = self.client.post_json(ENDPOINT, &body).await?;

        tracing::info!(
            "✅ Epic criado: #{} '{}' (id {:?})",
            created.reference.unwrap_or_default(),
            created.subject,
            created.id
        );
        Ok(created)
    }

    pub async fn get(&self, epic_id: i64) -> Result<Epic> {
        self.client.get_json(&format!("{}/{}", ENDPOINT, epic_id), &[]).await
    }

    pub async fn get_by_ref(&self, epic_ref: i64, project: &Project) -> Result<Epic> {
        let project_ref = ProjectRef::try_from(project)?;

        let mut query = vec![("ref".to_string(), epic_ref.to_string())];
        query.extend(project_ref.to_query_pairs());

        self.client.get_json(&format!("{}/by_ref", ENDPOINT), &query).await
    }

    /// `PATCH /epics/{id}`
    pub async fn edit(&self, epic: &Epic) -> Result<Epic> {
        let epic_id = require_id_and_version("Epic", epic.id, epic.version)?;

        let body = writable_body(epic, false)?;
        let updated: Epic = self
            .client
            .patch_json(&format!("{}/{}", ENDPOINT, epic_id), &body)
            .await?;

        tracing::info!("✅ Epic {} atualizado (versão {:?})", epic_id, updated.version);
        Ok(updated)
    }

    pub async fn delete(&self, epic_id: i64) -> Result<()> {
        self.client.delete(&format!("{}/{}", ENDPOINT, epic_id)).await?;
        tracing::info!("🗑️ Epic {} removido", epic_id);
        Ok(())
    }

    /// User stories ligadas ao epic (`GET /epics/{id}/related_userstories`)
    pub async fn list_related_user_stories(&self, epic_id: i64) -> Result<Vec<RelatedUserStory>> {
        self.client
            .get_json(&format!("{}/{}/related_userstories", ENDPOINT, epic_id), &[])
            .await
    }

    // ==================== ANEXOS ====================

    pub async fn get_attachment(&self, attachment_id: i64) -> Result<Attachment> {
        get_attachment_for_endpoint(self.client, ENDPOINT, attachment_id).await
    }

    pub async fn list_attachments(&self, epic: &Epic) -> Result<Vec<Attachment>> {
        let epic_id = epic
            .id
            .ok_or_else(|| TaigaError::validation("Epic id is required to list attachments"))?;
        let params = AttachmentsQueryParams::new(epic.project, epic_id);
        list_attachments_for_endpoint(self.client, ENDPOINT, &params).await
    }

    pub async fn create_attachment(
        &self,
        attachment: Attachment,
        epic: &Epic,
        file_path: impl AsRef<Path>,
    ) -> Result<Attachment> {
        let attachment = bind_attachment(attachment, epic.id, epic.project)?;
        create_attachment_for_endpoint(self.client, ENDPOINT, &attachment, file_path).await
    }

    // ==================== CUSTOM ATTRIBUTES ====================

    pub async fn get_custom_attribute_values<T: DeserializeOwned>(
        &self,
        epic_id: i64,
    ) -> Result<CustomAttributeValues<T>> {
        get_values_for_endpoint(self.client, ENDPOINT, epic_id).await
    }

    pub async fn edit_custom_attribute_values<T>(
        &self,
        epic_id: i64,
        values: &CustomAttributeValues<T>,
    ) -> Result<CustomAttributeValues<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        edit_values_for_endpoint(self.client, ENDPOINT, epic_id, values).await
    }

    pub async fn list_custom_attributes(&self, project_id: i64) -> Result<Vec<CustomAttribute>> {
        list_for_endpoint(self.client, CUSTOM_ATTRIBUTES_ENDPOINT, project_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_by_project_slug() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/epics")
                    .query_param("project__slug", "ana-demo");
                then.status(200).json_body(json!([{
                    "id": 12,
                    "ref": 3,
                    "project": 2,
                    "subject": "Onboarding",
                    "color": "#A5694F",
                    "user_stories_counts": {"total": 4, "progress": 1.5}
                }]));
            })
            .await;

        let client = TaigaClient::new("tok").unwrap().with_base_url(server.base_url());
        let epics = client
            .epics()
            .list(Some(&EpicsQueryParams::for_project_slug("ana-demo")))
            .await
            .unwrap();

        assert_eq!(epics.len(), 1);
        assert_eq!(epics[0].color.as_deref(), Some("#A5694F"));
        assert_eq!(epics[0].user_stories_counts.as_ref().map(|c| c.total), Some(4));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_epic() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/epics")
                    .json_body(json!({"project": 2, "subject": "Onboarding", "color": "#A5694F"}));
                then.status(201).json_body(json!({
                    "id": 12, "ref": 3, "version": 1, "project": 2,
                    "subject": "Onboarding", "color": "#A5694F"
                }));
            })
            .await;

        let client = TaigaClient::new("tok").unwrap().with_base_url(server.base_url());
        let created = client
            .epics()
            .create(&Epic::new(2, "Onboarding").with_color("#A5694F"))
            .await
            .unwrap();

        assert_eq!(created.reference, Some(3));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_missing_subject() {
        let client = TaigaClient::new("tok").unwrap();
        let err = client.epics().create(&Epic::new(2, "")).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_related_user_stories() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/epics/12/related_userstories");
                then.status(200).json_body(json!([
                    {"epic": 12, "user_story": 40, "order": 1},
                    {"epic": 12, "user_story": 41, "order": 2}
                ]));
            })
            .await;

        let client = TaigaClient::new("tok").unwrap().with_base_url(server.base_url());
        let related = client.epics().list_related_user_stories(12).await.unwrap();

        assert_eq!(related.len(), 2);
        assert_eq!(related[1].user_story, 41);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_edit_custom_attribute_values() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/epics/custom-attributes-values/12")
                    .json_body(json!({"attributes_values": {"3": true}, "version": 1}));
                then.status(200).json_body(json!({
                    "attributes_values": {"3": true},
                    "version": 2,
                    "epic": 12
                }));
            })
            .await;

        let client = TaigaClient::new("tok").unwrap().with_base_url(server.base_url());
        let values = CustomAttributeValues::new(json!({"3": true}), 1);
        let updated = client
            .epics()
            .edit_custom_attribute_values(12, &values)
            .await
            .unwrap();

        assert_eq!(updated.version, 2);
        assert_eq!(updated.object_id, Some(12));
        mock.assert_async().await;
    }
}
