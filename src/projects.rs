//! Projetos (`/projects`)
//!
//! Usado principalmente para descobrir o ID de um projeto a partir do slug
//! antes de buscas `by_ref` ou listagens filtradas.

use crate::client::TaigaClient;
use crate::error::{Result, TaigaError};
use crate::query::QueryParams;
use crate::types::{Project, ProjectsQueryParams};

const ENDPOINT: &str = "/projects";

#[derive(Clone, Copy, Debug)]
pub struct ProjectService<'a> {
    client: &'a TaigaClient,
}

impl<'a> ProjectService<'a> {
    pub(crate) fn new(client: &'a TaigaClient) -> Self {
        Self { client }
    }

    /// `GET /projects` (sem filtros lista todos os projetos visíveis)
    pub async fn list(&self, params: Option<&ProjectsQueryParams>) -> Result<Vec<Project>> {
        let query = match params {
            Some(params) => params.to_query_pairs()?,
            None => Vec::new(),
        };
        self.client.get_json(ENDPOINT, &query).await
    }

    pub async fn get(&self, project_id: i64) -> Result<Project> {
        self.client.get_json(&format!("{}/{}", ENDPOINT, project_id), &[]).await
    }

    /// `GET /projects/by_slug?slug=<slug>`
    pub async fn get_by_slug(&self, slug: &str) -> Result<Project> {
        if slug.trim().is_empty() {
            return Err(TaigaError::validation("project slug is required"));
        }
        let query = vec![("slug".to_string(), slug.to_string())];
        self.client.get_json(&format!("{}/by_slug", ENDPOINT), &query).await
    }
}
