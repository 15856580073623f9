//! Anexos do Taiga
//!
//! O mesmo formato serve para anexos de tasks, issues e epics; muda apenas o
//! endpoint (`/tasks/attachments`, `/issues/attachments`, `/epics/attachments`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Representa um anexo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// ID do objeto (task/issue/epic) ao qual o anexo pertence
    #[serde(default)]
    pub object_id: i64,

    #[serde(default)]
    pub project: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Tamanho em bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_card_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deprecated: Option<bool>,

    /// Anexo enviado junto com um comentário
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_comment: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<DateTime<Utc>>,
}

impl Attachment {
    /// Anexo vazio; `object_id` e `project` são preenchidos no upload
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_project(mut self, project: i64) -> Self {
        self.project = project;
        self
    }

    pub fn from_comment(mut self, from_comment: bool) -> Self {
        self.from_comment = Some(from_comment);
        self
    }
}

/// Filtros de `GET {endpoint}/attachments`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttachmentsQueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<i64>,
}

impl AttachmentsQueryParams {
    pub fn new(project: i64, object_id: i64) -> Self {
        Self {
            project: Some(project).filter(|p| *p > 0),
            object_id: Some(object_id),
        }
    }
}
