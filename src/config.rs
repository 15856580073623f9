//! Configuração do cliente Taiga
//!
//! Ordem de carregamento (a última fonte vence):
//!
//! 1. Valores padrão
//! 2. Arquivo `config/taiga.{toml,yaml,json}` (opcional)
//! 3. Variáveis de ambiente com prefixo `TAIGA_` (ex.: `TAIGA_API_URL`, `TAIGA_TOKEN`)
//!
//! Em desenvolvimento um arquivo `.env` é carregado antes via `dotenvy`.

use crate::error::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// URL base pública da API v1 do Taiga
pub const DEFAULT_API_URL: &str = "https://api.taiga.io/api/v1";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// URL base da API (ex.: `https://taiga.example.com/api/v1`)
    pub api_url: String,

    /// Token Bearer já obtido (tem prioridade sobre usuário/senha)
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Projeto usado como filtro em listagens sem parâmetros
    #[serde(default)]
    pub default_project: Option<i64>,

    /// Envia `x-disable-pagination: True` em todas as requisições
    #[serde(default)]
    pub disable_pagination: bool,

    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            username: None,
            password: None,
            default_project: None,
            disable_pagination: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ClientSettings {
    /// Carrega configurações de `.env`, `config/taiga.*` e variáveis `TAIGA_*`
    pub fn load() -> Result<Self> {
        if dotenvy::dotenv().is_ok() {
            tracing::debug!("Arquivo .env carregado");
        }
        Self::load_from(Environment::with_prefix("TAIGA"))
    }

    /// Carrega a partir de uma fonte de ambiente específica (útil em testes)
    pub fn load_from(env: Environment) -> Result<Self> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("api_url", defaults.api_url)?
            .set_default("disable_pagination", defaults.disable_pagination)?
            .set_default("timeout_secs", defaults.timeout_secs as i64)?
            .set_default("connect_timeout_secs", defaults.connect_timeout_secs as i64)?
            .add_source(File::with_name("config/taiga").required(false))
            .add_source(env.try_parsing(true))
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        tracing::debug!(
            "Configuração carregada: api_url={} default_project={:?}",
            loaded.api_url,
            loaded.default_project
        );
        Ok(loaded)
    }

    /// Há usuário e senha configurados?
    pub fn has_credentials(&self) -> bool {
        matches!(
            (&self.username, &self.password),
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty()
        )
    }
}
