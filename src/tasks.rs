// ============================================================================
// Task Service - Operações sobre tasks do Taiga
// ============================================================================
//
// 1. **CRUD:**
//    - list / create / get / get_by_ref / edit / delete
//
// 2. **Anexos:**
//    - get_attachment / list_attachments / create_attachment
//
// 3. **Custom attributes:**
//    - get_custom_attribute_values / edit_custom_attribute_values
//    - list_custom_attributes (definições do projeto)
//
// # Validação
//
// `create` exige `project` e `subject`; `edit` exige `id` e `version`.
// Em ambos os casos o erro sai antes de qualquer requisição.

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
    AttachmentsQueryParams, CustomAttribute, CustomAttributeValues, Project, ProjectRef, Task,
    TasksQueryParams,
};

const ENDPOINT: &str = "/tasks";
const CUSTOM_ATTRIBUTES_ENDPOINT: &str = "/task-custom-attributes";

/// Serviço de tasks (`/tasks`)
///
/// Obtido via `TaigaClient::tasks()`; apenas empresta o cliente.
#[derive(Clone, Copy, Debug)]
pub struct TaskService<'a> {
    client: &'a TaigaClient,
}

impl<'a> TaskService<'a> {
    pub(crate) fn new(client: &'a TaigaClient) -> Self {
        Self { client }
    }

    /// Lista tasks
    ///
    /// # Endpoint da API
    ///
    /// `GET /tasks`
    ///
    /// Com `params` os filtros são codificados na query string. Sem `params`
    /// aplica o projeto padrão do cliente (se configurado).
    pub async fn list(&self, params: Option<&TasksQueryParams>) -> Result<Vec<Task>> {
        let query = match params {
            Some(params) => params.to_query_pairs()?,
            None => self.client.default_project_query(),
        };
        self.client.get_json(ENDPOINT, &query).await
    }

    /// Cria uma task
    ///
    /// # Endpoint da API
    ///
    /// `POST /tasks`
    ///
    /// # Erros Comuns
    ///
    /// - **ValidationError**: `project` ou `subject` ausentes
    /// - **400 Bad Request**: status/user story de outro projeto
    pub async fn create(&self, task: &Task) -> Result<Task> {
        require_project_and_subject(task.project, &task.subject)?;

        let body = writable_body(task, true)?;
        let created: Task = self.client.post_json(ENDPOINT, &body).await?;

        tracing::info!(
            "✅ Task criada: #{} '{}' (id {:?})",
            created.reference.unwrap_or_default(),
            created.subject,
            created.id
        );
        Ok(created)
    }

    /// `GET /tasks/{id}`
    pub async fn get(&self, task_id: i64) -> Result<Task> {
        self.client.get_json(&format!("{}/{}", ENDPOINT, task_id), &[]).await
    }

    /// Busca uma task pelo `ref` dentro de um projeto
    ///
    /// Usa o ID do projeto quando presente, senão o slug.
    pub async fn get_by_ref(&self, task_ref: i64, project: &Project) -> Result<Task> {
        let project_ref = ProjectRef::try_from(project)?;

        let mut query = vec![("ref".to_string(), task_ref.to_string())];
        query.extend(project_ref.to_query_pairs());

        self.client.get_json(&format!("{}/by_ref", ENDPOINT), &query).await
    }

    /// Atualiza uma task (`PATCH /tasks/{id}`)
    ///
    /// `version` deve ser a versão atual; a API responde 400 se estiver
    /// desatualizada.
    pub async fn edit(&self, task: &Task) -> Result<Task> {
        let task_id = require_id_and_version("Task", task.id, task.version)?;

        let body = writable_body(task, false)?;
        let updated: Task = self
            .client
            .patch_json(&format!("{}/{}", ENDPOINT, task_id), &body)
            .await?;

        tracing::info!("✅ Task {} atualizada (versão {:?})", task_id, updated.version);
        Ok(updated)
    }

    /// `DELETE /tasks/{id}`
    pub async fn delete(&self, task_id: i64) -> Result<()> {
        self.client.delete(&format!("{}/{}", ENDPOINT, task_id)).await?;
        tracing::info!("🗑️ Task {} removida", task_id);
        Ok(())
    }

    // ==================== ANEXOS ====================

    pub async fn get_attachment(&self, attachment_id: i64) -> Result<Attachment> {
        get_attachment_for_endpoint(self.client, ENDPOINT, attachment_id).await
    }

    /// Lista os anexos de uma task
    pub async fn list_attachments(&self, task: &Task) -> Result<Vec<Attachment>> {
        let task_id = task
            .id
            .ok_or_else(|| TaigaError::validation("Task id is required to list attachments"))?;
        let params = AttachmentsQueryParams::new(task.project, task_id);
        list_attachments_for_endpoint(self.client, ENDPOINT, &params).await
    }

    /// Envia um arquivo como anexo da task
    ///
    /// `object_id` vem da task; `project` vem do anexo ou, na falta, da task.
    pub async fn create_attachment(
        &self,
        attachment: Attachment,
        task: &Task,
        file_path: impl AsRef<Path>,
    ) -> Result<Attachment> {
        let attachment = bind_attachment(attachment, task.id, task.project)?;
        create_attachment_for_endpoint(self.client, ENDPOINT, &attachment, file_path).await
    }

    // ==================== CUSTOM ATTRIBUTES ====================

    pub async fn get_custom_attribute_values<T: DeserializeOwned>(
        &self,
        task_id: i64,
    ) -> Result<CustomAttributeValues<T>> {
        get_values_for_endpoint(self.client, ENDPOINT, task_id).await
    }

    pub async fn edit_custom_attribute_values<T>(
        &self,
        task_id: i64,
        values: &CustomAttributeValues<T>,
    ) -> Result<CustomAttributeValues<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        edit_values_for_endpoint(self.client, ENDPOINT, task_id, values).await
    }

    /// Definições de custom attributes de task de um projeto
    pub async fn list_custom_attributes(&self, project_id: i64) -> Result<Vec<CustomAttribute>> {
        list_for_endpoint(self.client, CUSTOM_ATTRIBUTES_ENDPOINT, project_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn client_for(server: &MockServer) -> TaigaClient {
        TaigaClient::new("tok").unwrap().with_base_url(server.base_url())
    }

    #[tokio::test]
    async fn test_list_with_params() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/tasks")
                    .query_param("project", "1")
                    .query_param("status__is_closed", "false")
                    .query_param("tags", "backend,urgent");
                then.status(200).json_body(json!([
                    {"id": 1340, "ref": 7, "project": 1, "subject": "Fix login"}
                ]));
            })
            .await;

        let client = client_for(&server).with_default_project(99);
        let params = TasksQueryParams {
            status_is_closed: Some(false),
            tags: Some(vec!["backend".into(), "urgent".into()]),
            ..TasksQueryParams::for_project(1)
        };

        let tasks = client.tasks().list(Some(&params)).await.unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].reference, Some(7));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_uses_default_project() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/tasks").query_param("project", "42");
                then.status(200).json_body(json!([]));
            })
            .await;

        let client = client_for(&server).with_default_project(42);
        let tasks = client.tasks().list(None).await.unwrap();

        assert!(tasks.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_strips_read_only_fields() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/tasks")
                    .json_body(json!({"project": 1, "subject": "Write docs", "user_story": 17}));
                then.status(201).json_body(json!({
                    "id": 1341,
                    "ref": 8,
                    "version": 1,
                    "project": 1,
                    "subject": "Write docs",
                    "user_story": 17,
                    "is_closed": false
                }));
            })
            .await;

        let client = client_for(&server);
        let mut task = Task::new(1, "Write docs").with_user_story(17);
        task.id = Some(5);
        task.version = Some(9);

        let created = client.tasks().create(&task).await.unwrap();

        assert_eq!(created.id, Some(1341));
        assert_eq!(created.version, Some(1));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_validation_before_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/tasks");
                then.status(201).json_body(json!({}));
            })
            .await;

        let client = client_for(&server);
        let err = client.tasks().create(&Task::new(1, "")).await.unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("A mandatory field is missing"));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_get_by_ref_with_slug() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/tasks/by_ref")
                    .query_param("ref", "7")
                    .query_param("project__slug", "ana-demo");
                then.status(200)
                    .json_body(json!({"id": 1340, "ref": 7, "project": 1, "subject": "Fix login"}));
            })
            .await;

        let client = client_for(&server);
        let task = client
            .tasks()
            .get_by_ref(7, &Project::with_slug("ana-demo"))
            .await
            .unwrap();

        assert_eq!(task.id, Some(1340));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_by_ref_without_project() {
        let client = TaigaClient::new("tok").unwrap();
        let err = client.tasks().get_by_ref(7, &Project::default()).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_edit_requires_version() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PATCH).path("/tasks/1340");
                then.status(200).json_body(json!({}));
            })
            .await;

        let client = client_for(&server);
        let mut task = Task::with_id(1340);
        task.subject = "Renamed".into();

        let err = client.tasks().edit(&task).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_edit_sends_version() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/tasks/1340")
                    .json_body(json!({"project": 1, "subject": "Renamed", "version": 3}));
                then.status(200)
                    .json_body(json!({"id": 1340, "version": 4, "project": 1, "subject": "Renamed"}));
            })
            .await;

        let client = client_for(&server);
        let mut task = Task::new(1, "Renamed");
        task.id = Some(1340);
        task.version = Some(3);

        let updated = client.tasks().edit(&task).await.unwrap();
        assert_eq!(updated.version, Some(4));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_partial_edit_from_id_sends_only_changes() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/tasks/1340")
                    .json_body(json!({"status": 5, "version": 3}));
                then.status(200).json_body(json!({
                    "id": 1340, "version": 4, "project": 1, "subject": "Write docs", "status": 5
                }));
            })
            .await;

        let client = client_for(&server);
        let mut task = Task::with_id(1340).with_status(5);
        task.version = Some(3);

        let updated = client.tasks().edit(&task).await.unwrap();
        assert_eq!(updated.subject, "Write docs");
        assert_eq!(updated.status, Some(5));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/tasks/1340");
                then.status(204);
            })
            .await;

        client_for(&server).tasks().delete(1340).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_attachments() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/tasks/attachments")
                    .query_param("object_id", "1340")
                    .query_param("project", "1");
                then.status(200).json_body(json!([
                    {"id": 415, "object_id": 1340, "project": 1, "name": "screenshot.png"}
                ]));
            })
            .await;

        let mut task = Task::new(1, "Fix login");
        task.id = Some(1340);

        let attachments = client_for(&server).tasks().list_attachments(&task).await.unwrap();
        assert_eq!(attachments[0].name.as_deref(), Some("screenshot.png"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_attachment_needs_saved_task() {
        let client = TaigaClient::new("tok").unwrap();
        let err = client
            .tasks()
            .create_attachment(Attachment::new(), &Task::new(1, "draft"), "notes.txt")
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_api_error_on_get() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/tasks/1");
                then.status(403)
                    .json_body(json!({"detail": "You do not have permission to perform this action."}));
            })
            .await;

        let err = client_for(&server).tasks().get(1).await.unwrap_err();
        assert_eq!(err.status(), Some(403));
    }
}
