//! Projetos do Taiga

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{Tag, UserExtraInfo};
use crate::error::{Result, TaigaError};
use crate::query::QueryPairs;

/// Representa um projeto
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserExtraInfo>,

    /// Membros do projeto
    ///
    /// A listagem devolve só os IDs; o detalhe (`/projects/{id}`, `by_slug`)
    /// devolve objetos de membership. Os dois formatos viram `ProjectMember`.
    #[serde(
        default,
        deserialize_with = "deserialize_members",
        skip_serializing_if = "Option::is_none"
    )]
    pub members: Option<Vec<ProjectMember>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_milestones: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_story_points: Option<f64>,

    // ==================== MÓDULOS ====================
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_backlog_activated: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_kanban_activated: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_issues_activated: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_epics_activated: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_wiki_activated: Option<bool>,

    // ==================== DATAS ====================
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<DateTime<Utc>>,
}

impl Project {
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn with_slug(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Default::default()
        }
    }
}

/// Membro de um projeto
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMember {
    /// ID do usuário
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name_display: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ProjectMember {
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MemberRepr {
    Id(i64),
    Full(ProjectMember),
}

fn deserialize_members<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<ProjectMember>>, D::Error>
where
    D: Deserializer<'de>,
{
    let members: Option<Vec<MemberRepr>> = Option::deserialize(deserializer)?;
    Ok(members.map(|members| {
        members
            .into_iter()
            .map(|member| match member {
                MemberRepr::Id(id) => ProjectMember::with_id(id),
                MemberRepr::Full(member) => member,
            })
            .collect()
    }))
}

/// Como identificar o projeto em buscas `by_ref`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRef {
    Id(i64),
    Slug(String),
}

impl ProjectRef {
    pub fn to_query_pairs(&self) -> QueryPairs {
        match self {
            ProjectRef::Id(id) => vec![("project".to_string(), id.to_string())],
            ProjectRef::Slug(slug) => vec![("project__slug".to_string(), slug.clone())],
        }
    }
}

impl TryFrom<&Project> for ProjectRef {
    type Error = TaigaError;

    /// O ID tem prioridade; sem ID usa o slug; sem nenhum dos dois é erro
    fn try_from(project: &Project) -> Result<Self> {
        if project.id != 0 {
            Ok(ProjectRef::Id(project.id))
        } else if !project.slug.is_empty() {
            Ok(ProjectRef::Slug(project.slug.clone()))
        } else {
            Err(TaigaError::validation("No ID or slug defined in the given project"))
        }
    }
}

/// Filtros de `GET /projects`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectsQueryParams {
    /// Projetos em que o usuário é membro
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<i64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_looking_for_people: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_backlog_activated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_kanban_activated: Option<bool>,

    /// Ordenação (ex.: `memberships__user_order`, `total_fans`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_ref_prefers_id() {
        let project = Project {
            id: 3,
            slug: "ana-demo".into(),
            ..Default::default()
        };
        assert_eq!(ProjectRef::try_from(&project).unwrap(), ProjectRef::Id(3));
    }

    #[test]
    fn test_project_ref_slug_fallback() {
        let project = Project::with_slug("ana-demo");
        let project_ref = ProjectRef::try_from(&project).unwrap();
        assert_eq!(
            project_ref.to_query_pairs(),
            vec![("project__slug".to_string(), "ana-demo".to_string())]
        );
    }

    #[test]
    fn test_members_from_detail_payload() {
        let project: Project = serde_json::from_value(json!({
            "id": 2,
            "slug": "ana-demo",
            "name": "Demo",
            "members": [
                {
                    "id": 7,
                    "username": "ana",
                    "full_name": "Ana Lima",
                    "full_name_display": "Ana Lima",
                    "role": 11,
                    "role_name": "Product Owner",
                    "photo": null,
                    "is_active": true,
                    "color": "#FC8EAC",
                    "gravatar_id": "e0e8"
                },
                {"id": 9, "username": "bruno", "role": 12, "role_name": "Back"}
            ]
        }))
        .unwrap();

        let members = project.members.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].username.as_deref(), Some("ana"));
        assert_eq!(members[0].role_name.as_deref(), Some("Product Owner"));
        assert_eq!(members[1].id, 9);
    }

    #[test]
    fn test_members_from_id_list() {
        let project: Project =
            serde_json::from_value(json!({"id": 2, "slug": "ana-demo", "members": [7, 9]})).unwrap();
        assert_eq!(
            project.members,
            Some(vec![ProjectMember::with_id(7), ProjectMember::with_id(9)])
        );

        let without: Project = serde_json::from_value(json!({"id": 2, "members": null})).unwrap();
        assert_eq!(without.members, None);
    }

    #[test]
    fn test_project_ref_missing() {
        let err = ProjectRef::try_from(&Project::default()).unwrap_err();
        assert!(err.is_validation());
    }
}
