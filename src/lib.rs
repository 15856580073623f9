//! Cliente tipado da API REST v1 do Taiga
//!
//! Este crate fornece uma interface tipo-segura para os principais recursos
//! do Taiga:
//!
//! - **Tasks** (`/tasks`), **Issues** (`/issues`) e **Epics** (`/epics`):
//!   listagem, criação, busca por ID ou `ref`, edição, remoção
//! - **Anexos** de qualquer objeto (upload multipart)
//! - **Custom attributes**: definições por projeto e valores por objeto
//! - **Projetos** e **usuário atual**
//! - **Autenticação** por usuário/senha com refresh de token
//!
//! Validações locais (campos obrigatórios, `version` em edições) acontecem
//! antes de qualquer requisição.
//!
//! # Exemplo Básico
//!
//! ```rust,ignore
//! use taiga::{ClientSettings, TaigaClient, Task};
//!
//! #[tokio::main]
//! async fn main() -> taiga::Result<()> {
//!     // TAIGA_TOKEN ou TAIGA_USERNAME/TAIGA_PASSWORD no ambiente ou no .env
//!     let settings = ClientSettings::load()?;
//!     let client = TaigaClient::connect(&settings).await?;
//!
//!     let task = client.tasks().create(&Task::new(1, "Revisar contrato")).await?;
//!     println!("Task #{:?} criada", task.reference);
//!
//!     Ok(())
//! }
//! ```

// Módulos públicos
pub mod attachments;
pub mod auth;
pub mod client;
pub mod config;
pub mod custom_attributes;
pub mod epics;
pub mod error;
pub mod issues;
pub mod projects;
pub mod query;
pub mod tasks;
pub mod types;
pub mod users;

// Re-exports principais
pub use client::TaigaClient;
pub use config::ClientSettings;
pub use error::{Result, TaigaError};
pub use query::QueryParams;
pub use types::*;
