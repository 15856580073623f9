//! Usuários (`/users`)

use crate::client::TaigaClient;
use crate::error::Result;
use crate::types::User;

#[derive(Clone, Copy, Debug)]
pub struct UserService<'a> {
    client: &'a TaigaClient,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(client: &'a TaigaClient) -> Self {
        Self { client }
    }

    /// Usuário dono do token atual
    ///
    /// Serve também como teste de conectividade/autenticação.
    pub async fn me(&self) -> Result<User> {
        let user: User = self.client.get_json("/users/me", &[]).await?;
        tracing::debug!("Token válido para o usuário '{}' (id {})", user.username, user.id);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_me() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/me");
                then.status(200).json_body(json!({
                    "id": 7,
                    "username": "ana",
                    "full_name_display": "Ana Souza",
                    "lang": "pt-br"
                }));
            })
            .await;

        let client = TaigaClient::new("tok").unwrap().with_base_url(server.base_url());
        let me = client.users().me().await.unwrap();

        assert_eq!(me.id, 7);
        assert_eq!(me.full_name_display.as_deref(), Some("Ana Souza"));
    }

    #[tokio::test]
    async fn test_me_invalid_token() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/me");
                then.status(401)
                    .json_body(json!({"detail": "Invalid token", "code": "token_not_valid"}));
            })
            .await;

        let client = TaigaClient::new("expired").unwrap().with_base_url(server.base_url());
        let err = client.users().me().await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("Invalid token"));
    }
}
