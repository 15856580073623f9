// ============================================================================
// Custom Attributes - Definições e valores compartilhados por tasks/issues/epics
// ============================================================================
//
// Endpoints:
//
// - GET   /{task,issue,epic}-custom-attributes?project=<id>
// - GET   /{tasks,issues,epics}/custom-attributes-values/{object_id}
// - PATCH /{tasks,issues,epics}/custom-attributes-values/{object_id}
//
// O PATCH exige a `version` atual dos valores; a resposta traz a nova versão.

use serde::{de::DeserializeOwned, Serialize};

use crate::client::TaigaClient;
use crate::error::{Result, TaigaError};
use crate::query::project_pair;
use crate::types::{CustomAttribute, CustomAttributeValues};

/// `GET {endpoint}/custom-attributes-values/{object_id}`
pub async fn get_values_for_endpoint<T: DeserializeOwned>(
    client: &TaigaClient,
    endpoint: &str,
    object_id: i64,
) -> Result<CustomAttributeValues<T>> {
    let path = format!("{}/custom-attributes-values/{}", endpoint, object_id);
    client.get_json(&path, &[]).await
}

/// `PATCH {endpoint}/custom-attributes-values/{object_id}`
pub async fn edit_values_for_endpoint<T>(
    client: &TaigaClient,
    endpoint: &str,
    object_id: i64,
    values: &CustomAttributeValues<T>,
) -> Result<CustomAttributeValues<T>>
where
    T: Serialize + DeserializeOwned,
{
    if object_id <= 0 {
        return Err(TaigaError::validation("object id is required to edit custom attribute values"));
    }

    let path = format!("{}/custom-attributes-values/{}", endpoint, object_id);
    let updated: CustomAttributeValues<T> = client.patch_json(&path, values).await?;

    tracing::debug!(
        "✅ Custom attributes de {} {} atualizados (versão {} -> {})",
        endpoint,
        object_id,
        values.version,
        updated.version
    );
    Ok(updated)
}

/// `GET {definitions_endpoint}?project=<id>`
pub async fn list_for_endpoint(
    client: &TaigaClient,
    definitions_endpoint: &str,
    project: i64,
) -> Result<Vec<CustomAttribute>> {
    if project <= 0 {
        return Err(TaigaError::validation("project is required to list custom attributes"));
    }
    client.get_json(definitions_endpoint, &project_pair(project)).await
}
