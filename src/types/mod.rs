//! Tipos da API do Taiga
//!
//! DTOs planos que espelham o JSON da API:
//!
//! - **Task / Issue / Epic**: objetos de trabalho com `ref` por projeto
//! - **Attachment**: anexos de qualquer objeto
//! - **Project**: projeto (necessário para buscas `by_ref`)
//! - **CustomAttributeValues**: valores de atributos personalizados
//! - **Tag**: tags no formato `["nome", "#cor"]`
//!
//! ## ⚠️ Notas Importantes
//!
//! - **version**: obrigatório em PATCH (controle de concorrência otimista)
//! - **ref vs id**: `ref` é sequencial por projeto, `id` é global
//! - **Datas**: ISO-8601 em UTC; `due_date` é apenas data (`YYYY-MM-DD`)

pub mod attachment;
pub mod custom_attribute;
pub mod epic;
pub mod extra;
pub mod issue;
pub mod project;
pub mod tag;
pub mod task;
pub mod user;

pub use attachment::{Attachment, AttachmentsQueryParams};
pub use custom_attribute::{CustomAttribute, CustomAttributeValues};
pub use epic::{Epic, EpicsQueryParams, RelatedUserStory, UserStoriesCounts};
pub use extra::{ProjectExtraInfo, StatusExtraInfo, UserExtraInfo};
pub use issue::{Issue, IssuesQueryParams};
pub use project::{Project, ProjectMember, ProjectRef, ProjectsQueryParams};
pub use tag::Tag;
pub use task::{Task, TasksQueryParams};
pub use user::{User, UserAuthenticationDetail};

use crate::error::{Result, TaigaError};
use serde::Serialize;
use serde_json::Value;

/// Campos que a API calcula e não aceita em POST/PATCH
pub(crate) const READ_ONLY_FIELDS: &[&str] = &[
    "id",
    "ref",
    "created_date",
    "modified_date",
    "finished_date",
    "owner",
    "is_closed",
    "assigned_to_extra_info",
    "owner_extra_info",
    "status_extra_info",
    "project_extra_info",
    "user_stories_counts",
];

/// Serializa um DTO removendo campos read-only
///
/// Em criação `version` também sai do corpo. Em PATCH ele é mantido, e
/// `project`/`subject` só vão quando preenchidos (`project > 0`, `subject`
/// não vazio), para que um objeto montado com `with_id` altere apenas o que
/// foi definido.
pub(crate) fn writable_body<T: Serialize>(value: &T, strip_version: bool) -> Result<Value> {
    let mut body = serde_json::to_value(value)?;
    let object = body
        .as_object_mut()
        .ok_or_else(|| TaigaError::validation("request body must be a JSON object"))?;

    for field in READ_ONLY_FIELDS {
        object.remove(*field);
    }

    if strip_version {
        object.remove("version");
    } else {
        let unset_project = object
            .get("project")
            .is_some_and(|p| p.as_i64().map_or(true, |id| id <= 0));
        if unset_project {
            object.remove("project");
        }

        let unset_subject = object
            .get("subject")
            .is_some_and(|s| s.as_str().map_or(true, |text| text.trim().is_empty()));
        if unset_subject {
            object.remove("subject");
        }
    }
    Ok(body)
}

/// Campos obrigatórios para criação de Task/Issue/Epic
pub(crate) fn require_project_and_subject(project: i64, subject: &str) -> Result<()> {
    if project <= 0 || subject.trim().is_empty() {
        return Err(TaigaError::validation(
            "A mandatory field is missing (project, subject). See API documentation",
        ));
    }
    Ok(())
}

/// PATCH exige `id` e `version`
pub(crate) fn require_id_and_version(kind: &str, id: Option<i64>, version: Option<i64>) -> Result<i64> {
    let id = id
        .filter(|id| *id > 0)
        .ok_or_else(|| TaigaError::validation(format!("{} id is required", kind)))?;

    if version.is_none() {
        return Err(TaigaError::validation(format!(
            "{} version is required for edits",
            kind
        )));
    }
    Ok(id)
}
