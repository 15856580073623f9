//! Cliente HTTP para a API do Taiga
//!
//! Todas as chamadas passam por aqui: montagem da URL, cabeçalhos de
//! autenticação/paginação, serialização do corpo e decodificação da resposta
//! (ou do payload de erro).

use crate::config::{ClientSettings, DEFAULT_API_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use crate::epics::EpicService;
use crate::error::{Result, TaigaError};
use crate::issues::IssueService;
use crate::projects::ProjectService;
use crate::query::project_pair;
use crate::tasks::TaskService;
use crate::users::UserService;
use reqwest::{multipart::Form, Client as HttpClient, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::time::Duration;
use url::Url;

const PAGINATION_HEADER: &str = "x-disable-pagination";

/// Cliente para interagir com a API v1 do Taiga
///
/// É barato de clonar: o `reqwest::Client` interno já é compartilhado.
/// Os serviços por recurso (`tasks()`, `issues()`, `epics()`...) apenas
/// emprestam o cliente.
#[derive(Clone, Debug)]
pub struct TaigaClient {
    http_client: HttpClient,
    base_url: String,
    token: Option<String>,
    pub(crate) refresh_token: Option<String>,
    default_project: Option<i64>,
    disable_pagination: bool,
}

impl TaigaClient {
    /// Cria um novo cliente autenticado com um token Bearer
    ///
    /// # Timeouts
    ///
    /// - Total: 30s
    /// - Connect: 5s
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_timeouts(token, DEFAULT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS)
    }

    /// Cria um cliente sem token (para `authenticate` ou projetos públicos)
    pub fn anonymous() -> Result<Self> {
        Self::build(None, DEFAULT_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS)
    }

    /// Cria um novo cliente com timeouts customizados
    pub fn with_timeouts(
        token: impl Into<String>,
        total_timeout_secs: u64,
        connect_timeout_secs: u64,
    ) -> Result<Self> {
        Self::build(Some(token.into()), total_timeout_secs, connect_timeout_secs)
    }

    fn build(token: Option<String>, total_timeout_secs: u64, connect_timeout_secs: u64) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(total_timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .build()
            .map_err(|e| TaigaError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: DEFAULT_API_URL.to_string(),
            token: token.filter(|t| !t.is_empty()),
            refresh_token: None,
            default_project: None,
            disable_pagination: false,
        })
    }

    /// Cria o cliente a partir de `ClientSettings` (sem autenticar)
    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        Url::parse(&settings.api_url)?;

        let mut client = Self::build(
            settings.token.clone(),
            settings.timeout_secs,
            settings.connect_timeout_secs,
        )?
        .with_base_url(&settings.api_url)
        .with_pagination_disabled(settings.disable_pagination);
        client.default_project = settings.default_project;
        Ok(client)
    }

    /// Cria o cliente e, se não houver token mas houver usuário/senha,
    /// autentica via `POST /auth`
    pub async fn connect(settings: &ClientSettings) -> Result<Self> {
        let mut client = Self::from_settings(settings)?;

        if client.token.is_none() {
            match (&settings.username, &settings.password) {
                (Some(username), Some(password)) if settings.has_credentials() => {
                    client.authenticate(username, password).await?;
                }
                _ => tracing::debug!("Cliente Taiga sem credenciais, usando acesso anônimo"),
            }
        }

        Ok(client)
    }

    /// Aponta o cliente para outra instância do Taiga (ex.: self-hosted)
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = base_url.as_ref().trim_end_matches('/').to_string();
        self
    }

    /// Define o projeto padrão usado em listagens sem parâmetros
    pub fn with_default_project(mut self, project_id: i64) -> Self {
        self.default_project = Some(project_id);
        self
    }

    pub fn set_default_project(&mut self, project_id: Option<i64>) {
        self.default_project = project_id;
    }

    /// Liga/desliga o cabeçalho `x-disable-pagination`
    pub fn with_pagination_disabled(mut self, disabled: bool) -> Self {
        self.disable_pagination = disabled;
        self
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.token = if token.is_empty() { None } else { Some(token) };
    }

    // ==================== SERVIÇOS ====================

    pub fn tasks(&self) -> TaskService<'_> {
        TaskService::new(self)
    }

    pub fn issues(&self) -> IssueService<'_> {
        IssueService::new(self)
    }

    pub fn epics(&self) -> EpicService<'_> {
        EpicService::new(self)
    }

    pub fn projects(&self) -> ProjectService<'_> {
        ProjectService::new(self)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    // ==================== URL ====================

    /// Monta `base_url + endpoint` e adiciona a query string codificada
    pub fn build_url(&self, endpoint: &str, query: &[(String, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    /// Filtro `project=<id>` do projeto padrão (vazio se não configurado)
    pub(crate) fn default_project_query(&self) -> Vec<(String, String)> {
        self.default_project.map(project_pair).unwrap_or_default()
    }

    // ==================== EXECUTOR ====================

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);

        let mut builder = self
            .http_client
            .request(method, url)
            .header("Accept", "application/json");

        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token);
        }
        if self.disable_pagination {
            builder = builder.header(PAGINATION_HEADER, "True");
        }
        builder
    }

    /// Executa uma requisição GET e decodifica o JSON
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let url = self.build_url(endpoint, query)?;
        let response = self.request(Method::GET, url).send().await?;
        Self::decode_json(self.handle_response(response).await?).await
    }

    /// Executa uma requisição POST com corpo JSON
    pub(crate) async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(endpoint, &[])?;
        let response = self.request(Method::POST, url).json(body).send().await?;
        Self::decode_json(self.handle_response(response).await?).await
    }

    /// Executa uma requisição PATCH com corpo JSON
    pub(crate) async fn patch_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(endpoint, &[])?;
        let response = self.request(Method::PATCH, url).json(body).send().await?;
        Self::decode_json(self.handle_response(response).await?).await
    }

    /// Executa uma requisição DELETE (a API responde 204 sem corpo)
    pub(crate) async fn delete(&self, endpoint: &str) -> Result<()> {
        let url = self.build_url(endpoint, &[])?;
        let response = self.request(Method::DELETE, url).send().await?;
        self.handle_response(response).await?;
        Ok(())
    }

    /// Executa um POST multipart (upload de anexos)
    pub(crate) async fn post_multipart<T: DeserializeOwned>(&self, endpoint: &str, form: Form) -> Result<T> {
        let url = self.build_url(endpoint, &[])?;
        let response = self.request(Method::POST, url).multipart(form).send().await?;
        Self::decode_json(self.handle_response(response).await?).await
    }

    async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.text().await?;
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        Ok(serde_json::from_str(body)?)
    }

    /// Processa a resposta HTTP e converte status não-2xx em `ApiError`
    async fn handle_response(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let error_body = response.text().await.unwrap_or_default();

        tracing::error!("Taiga API error ({}): {}", status_code, error_body);

        Err(decode_error(status_code, &error_body))
    }

    /// Token Bearer atual
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_project(&self) -> Option<i64> {
        self.default_project
    }

    pub fn has_default_project(&self) -> bool {
        self.default_project.is_some()
    }

    pub fn pagination_disabled(&self) -> bool {
        self.disable_pagination
    }
}

/// Converte o corpo de erro do Taiga em `TaigaError::ApiError`
///
/// Formatos conhecidos:
/// - `{"_error_message": "...", "_error_type": "..."}`
/// - `{"detail": "..."}` (erros de autenticação/permissão)
/// - `{"subject": ["This field is required."]}` (erros de validação por campo)
pub(crate) fn decode_error(status: u16, body: &str) -> TaigaError {
    let payload = serde_json::from_str::<Value>(body).unwrap_or_else(|_| Value::String(body.to_string()));

    let message = payload
        .get("_error_message")
        .or_else(|| payload.get("detail"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .or_else(|| field_errors(&payload))
        .unwrap_or_else(|| {
            if body.is_empty() {
                format!("HTTP {}", status)
            } else {
                body.to_string()
            }
        });

    let error_type = payload
        .get("_error_type")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    TaigaError::ApiError {
        status,
        message,
        error_type,
        payload,
    }
}

fn field_errors(payload: &Value) -> Option<String> {
    let object = payload.as_object()?;
    let parts: Vec<String> = object
        .iter()
        .filter_map(|(field, errors)| {
            let first = errors.as_array()?.first()?.as_str()?;
            Some(format!("{}: {}", field, first))
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}
