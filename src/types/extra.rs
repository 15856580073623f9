//! Blocos `*_extra_info` que a API anexa aos objetos (somente leitura)

use serde::{Deserialize, Serialize};

/// Resumo de usuário (`owner_extra_info`, `assigned_to_extra_info`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserExtraInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name_display: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub big_photo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravatar_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Resumo do status (`status_extra_info`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusExtraInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default)]
    pub is_closed: bool,
}

/// Resumo do projeto (`project_extra_info`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectExtraInfo {
    pub id: i64,

    pub name: String,

    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_small_url: Option<String>,
}
