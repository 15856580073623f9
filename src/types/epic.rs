//! Epic types do Taiga

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ProjectExtraInfo, StatusExtraInfo, Tag, UserExtraInfo};

/// Representa um epic do Taiga
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Epic {
    // ==================== IDENTIFICAÇÃO ====================
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<i64>,

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

    /// Cor do epic (hex, ex.: `#A5694F`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epics_order: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_requirement: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_requirement: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,

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

    // ==================== DATAS ====================
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    // ==================== EXTRA INFO (read-only) ====================
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_stories_counts: Option<UserStoriesCounts>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_extra_info: Option<UserExtraInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_extra_info: Option<UserExtraInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_extra_info: Option<StatusExtraInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_extra_info: Option<ProjectExtraInfo>,
}

/// Contagem de user stories do epic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStoriesCounts {
    #[serde(default)]
    pub total: i64,

    #[serde(default)]
    pub progress: f64,
}

/// User story relacionada a um epic (`GET /epics/{id}/related_userstories`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedUserStory {
    pub epic: i64,

    pub user_story: i64,

    #[serde(default)]
    pub order: i64,
}

impl Epic {
    pub fn new(project: i64, subject: impl Into<String>) -> Self {
        Self {
            project,
            subject: subject.into(),
            ..Default::default()
        }
    }

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

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_status(mut self, status: i64) -> Self {
        self.status = Some(status);
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

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Filtros de `GET /epics`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EpicsQueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<i64>,

    #[serde(rename = "project__slug", skip_serializing_if = "Option::is_none")]
    pub project_slug: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,

    #[serde(rename = "status__is_closed", skip_serializing_if = "Option::is_none")]
    pub status_is_closed: Option<bool>,
}

impl EpicsQueryParams {
    pub fn for_project(project: i64) -> Self {
        Self {
            project: Some(project),
            ..Default::default()
        }
    }

    pub fn for_project_slug(slug: impl Into<String>) -> Self {
        Self {
            project_slug: Some(slug.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryParams;
    use serde_json::json;

    #[test]
    fn test_epic_decodes_counts() {
        let epic: Epic = serde_json::from_value(json!({
            "id": 12,
            "ref": 2,
            "version": 4,
            "project": 1,
            "subject": "Billing",
            "color": "#A5694F",
            "epics_order": 1500000000,
            "client_requirement": true,
            "team_requirement": false,
            "user_stories_counts": {"total": 4, "progress": 1.5}
        }))
        .unwrap();

        assert_eq!(epic.color.as_deref(), Some("#A5694F"));
        assert_eq!(epic.client_requirement, Some(true));
        let counts = epic.user_stories_counts.unwrap();
        assert_eq!(counts.total, 4);
        assert_eq!(counts.progress, 1.5);
    }

    #[test]
    fn test_query_params_slug() {
        let params = EpicsQueryParams {
            status_is_closed: Some(true),
            ..EpicsQueryParams::for_project_slug("ana-demo")
        };
        assert_eq!(
            params.to_query_pairs().unwrap(),
            vec![
                ("project__slug".to_string(), "ana-demo".to_string()),
                ("status__is_closed".to_string(), "true".to_string()),
            ]
        );
    }
}
