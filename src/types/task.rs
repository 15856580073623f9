//! Task types do Taiga
//!
//! Estrutura de uma task (`/tasks`). Tasks pertencem a um projeto e
//! opcionalmente a uma user story e a um sprint (milestone).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{ProjectExtraInfo, StatusExtraInfo, Tag, UserExtraInfo};

/// Representa uma task do Taiga
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    // ==================== IDENTIFICAÇÃO ====================
    /// ID global (retornado pela API após criação)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Número sequencial dentro do projeto
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<i64>,

    /// Versão do objeto (obrigatória em PATCH)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    // ==================== OBRIGATÓRIOS NA CRIAÇÃO ====================
    #[serde(default)]
    pub project: i64,

    #[serde(default)]
    pub subject: String,

    // ==================== CONTEÚDO ====================
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_story: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<Vec<String>>,

    // ==================== RESPONSÁVEIS ====================
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watchers: Option<Vec<i64>>,

    // ==================== FLAGS ====================
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_blocked: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_closed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_iocaine: Option<bool>,

    // ==================== ORDENAÇÃO ====================
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taskboard_order: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub us_order: Option<i64>,

    // ==================== DATAS ====================
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_date: Option<DateTime<Utc>>,

    // ==================== EDIÇÃO ====================
    /// Comentário registrado no histórico junto com um PATCH
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    // ==================== EXTRA INFO (read-only) ====================
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_extra_info: Option<UserExtraInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_extra_info: Option<UserExtraInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_extra_info: Option<StatusExtraInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_extra_info: Option<ProjectExtraInfo>,
}

impl Task {
    /// Cria uma nova task com os campos obrigatórios
    pub fn new(project: i64, subject: impl Into<String>) -> Self {
        Self {
            project,
            subject: subject.into(),
            ..Default::default()
        }
    }

    /// Referência a uma task existente (para get/edit/anexos)
    pub fn with_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: i64) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_user_story(mut self, user_story: i64) -> Self {
        self.user_story = Some(user_story);
        self
    }

    pub fn with_milestone(mut self, milestone: i64) -> Self {
        self.milestone = Some(milestone);
        self
    }

    pub fn with_assigned_to(mut self, user_id: i64) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    pub fn with_tags<T: Into<Tag>>(mut self, tags: impl IntoIterator<Item = T>) -> Self {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Builder: comentário para o histórico (apenas em edições)
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Filtros de `GET /tasks`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TasksQueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_story: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub watchers: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,

    #[serde(rename = "status__is_closed", skip_serializing_if = "Option::is_none")]
    pub status_is_closed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_status: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_role: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_owner: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_assigned_to: Option<i64>,
}

impl TasksQueryParams {
    pub fn for_project(project: i64) -> Self {
        Self {
            project: Some(project),
            ..Default::default()
        }
    }
}
