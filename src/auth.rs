//! Autenticação na API do Taiga
//!
//! - `POST /auth` com `{"type": "normal", "username", "password"}`
//! - `POST /auth/refresh` com `{"refresh": "<token>"}`
//!
//! Em ambos os casos o `auth_token` devolvido passa a ser o token Bearer do
//! cliente e o `refresh` é guardado para a próxima renovação.

use serde::Serialize;

use crate::client::TaigaClient;
use crate::error::{Result, TaigaError};
use crate::types::UserAuthenticationDetail;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "type")]
    login_type: &'static str,
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

impl TaigaClient {
    /// Autentica com usuário e senha (login `normal`)
    ///
    /// # Erros Comuns
    ///
    /// - **ValidationError**: usuário ou senha vazios (nenhuma requisição é feita)
    /// - **ApiError 400**: credenciais inválidas (`_error_message` vem no payload)
    pub async fn authenticate(&mut self, username: &str, password: &str) -> Result<UserAuthenticationDetail> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(TaigaError::validation("username and password are required"));
        }

        let body = LoginRequest {
            login_type: "normal",
            username,
            password,
        };
        let detail: UserAuthenticationDetail = self.post_json("/auth", &body).await?;
        self.store_tokens(&detail)?;

        tracing::info!("🔐 Autenticado no Taiga como '{}'", username);
        Ok(detail)
    }

    /// Renova o token Bearer usando o refresh token guardado
    pub async fn refresh_token(&mut self) -> Result<UserAuthenticationDetail> {
        let refresh = self
            .refresh_token
            .clone()
            .ok_or_else(|| TaigaError::AuthError("No refresh token available".to_string()))?;

        let detail: UserAuthenticationDetail = self
            .post_json("/auth/refresh", &RefreshRequest { refresh: &refresh })
            .await?;
        self.store_tokens(&detail)?;

        tracing::info!("🔄 Token do Taiga renovado");
        Ok(detail)
    }

    fn store_tokens(&mut self, detail: &UserAuthenticationDetail) -> Result<()> {
        if detail.auth_token.is_empty() {
            return Err(TaigaError::AuthError("Empty auth_token in response".to_string()));
        }
        self.set_token(detail.auth_token.clone());
        if let Some(ref refresh) = detail.refresh {
            self.refresh_token = Some(refresh.clone());
        }
        Ok(())
    }
}
