//! Tipos de erro para o crate taiga

use serde_json::Value;
use thiserror::Error;

/// Erros do cliente Taiga
#[derive(Debug, Error)]
pub enum TaigaError {
    /// Erro de requisição HTTP (conexão, timeout, TLS...)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Erro retornado pela API do Taiga (status code não-2xx)
    ///
    /// `payload` carrega o corpo original da resposta (JSON quando possível).
    #[error("Taiga API error (status {status}): {message}")]
    ApiError {
        status: u16,
        message: String,
        error_type: Option<String>,
        payload: Value,
    },

    /// Erro de autenticação
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Erro de parsing JSON
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// URL base ou endpoint inválido
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Erro de IO (leitura de arquivo para upload)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Erro de configuração
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Erro de validação local (nenhuma requisição é feita)
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl TaigaError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Status HTTP quando o erro veio da API
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}

impl From<config::ConfigError> for TaigaError {
    fn from(e: config::ConfigError) -> Self {
        Self::ConfigError(e.to_string())
    }
}

/// Tipo Result padrão para o crate
pub type Result<T> = std::result::Result<T, TaigaError>;
