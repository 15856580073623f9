//! Usuários e resposta de autenticação

use serde::{Deserialize, Serialize};

/// Perfil de usuário (`GET /users/me`, `GET /users/{id}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name_display: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_private_projects: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_public_projects: Option<i64>,
}

/// Resposta de `POST /auth` e `POST /auth/refresh`
///
/// No refresh a API devolve apenas `auth_token` e `refresh`, por isso o
/// restante é opcional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserAuthenticationDetail {
    pub auth_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name_display: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}
