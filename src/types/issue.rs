//! Issue types do Taiga
//!
//! Issues têm classificação própria do projeto: `type`, `severity` e
//! `priority` são IDs configurados por projeto (não enums globais).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{ProjectExtraInfo, StatusExtraInfo, Tag, UserExtraInfo};

/// Representa uma issue do Taiga
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
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

    /// Tipo da issue (bug, question, enhancement...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

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

impl Issue {
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

    pub fn with_type(mut self, issue_type: i64) -> Self {
        self.issue_type = Some(issue_type);
        self
    }

    pub fn with_severity(mut self, severity: i64) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
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

/// Filtros de `GET /issues`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssuesQueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub watchers: Option<i64>,

    #[serde(rename = "status__is_closed", skip_serializing_if = "Option::is_none")]
    pub status_is_closed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_status: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_severity: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_priority: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_owner: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_assigned_to: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_type: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_role: Option<i64>,

    /// Ordenação (ex.: `-created_date`, `priority`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

impl IssuesQueryParams {
    pub fn for_project(project: i64) -> Self {
        Self {
            project: Some(project),
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
    fn test_issue_type_field_name() {
        let issue = Issue::new(2, "Crash on save").with_type(4).with_severity(3);
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(
            value,
            json!({"project": 2, "subject": "Crash on save", "type": 4, "severity": 3})
        );
    }

    #[test]
    fn test_issue_decodes_api_payload() {
        let issue: Issue = serde_json::from_value(json!({
            "id": 88,
            "ref": 5,
            "version": 1,
            "project": 2,
            "subject": "Crash on save",
            "type": 4,
            "severity": 3,
            "priority": 2,
            "status": 9,
            "tags": [],
            "is_closed": false
        }))
        .unwrap();

        assert_eq!(issue.id, Some(88));
        assert_eq!(issue.reference, Some(5));
        assert_eq!(issue.issue_type, Some(4));
        assert_eq!(issue.tags, Some(vec![]));
    }

    #[test]
    fn test_query_params_order_by_and_type() {
        let params = IssuesQueryParams {
            issue_type: Some(4),
            order_by: Some("-created_date".into()),
            ..IssuesQueryParams::for_project(2)
        };
        assert_eq!(
            params.to_query_pairs().unwrap(),
            vec![
                ("order_by".to_string(), "-created_date".to_string()),
                ("project".to_string(), "2".to_string()),
                ("type".to_string(), "4".to_string()),
            ]
        );
    }
}
