//! Codificação de parâmetros de consulta (query string)
//!
//! Qualquer struct `Serialize` vira uma lista de pares `(chave, valor)`:
//!
//! - campos `None` são omitidos
//! - strings vão como estão, números e booleanos via `to_string`
//! - arrays viram lista separada por vírgula (`status=1,2`)
//! - objetos aninhados não são suportados pela API e geram erro
//!
//! A ordem dos pares é sempre a ordem alfabética das chaves, então a mesma
//! struct produz sempre a mesma URL.

use crate::error::{Result, TaigaError};
use serde::Serialize;
use serde_json::Value;

/// Lista ordenada de pares de query string
pub type QueryPairs = Vec<(String, String)>;

/// Parâmetros que podem ser codificados numa query string
pub trait QueryParams {
    fn to_query_pairs(&self) -> Result<QueryPairs>;
}

impl<T: Serialize> QueryParams for T {
    fn to_query_pairs(&self) -> Result<QueryPairs> {
        let object = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            Value::Null => return Ok(Vec::new()),
            other => {
                return Err(TaigaError::validation(format!(
                    "query parameters must serialize to an object, got {}",
                    other
                )))
            }
        };

        let mut pairs = Vec::with_capacity(object.len());
        for (key, value) in object {
            if let Some(encoded) = encode_value(&key, &value)? {
                pairs.push((key, encoded));
            }
        }
        // serde_json::Map já é ordenado, mas não dependemos da feature preserve_order
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(pairs)
    }
}

fn encode_value(key: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(items) => {
            if items.is_empty() {
                return Ok(None);
            }
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                match encode_value(key, item)? {
                    Some(part) => parts.push(part),
                    None => continue,
                }
            }
            Ok(Some(parts.join(",")))
        }
        Value::Object(_) => Err(TaigaError::validation(format!(
            "query parameter '{}' cannot be a nested object",
            key
        ))),
    }
}

/// Monta um único par `project=<id>`
pub(crate) fn project_pair(project_id: i64) -> QueryPairs {
    vec![("project".to_string(), project_id.to_string())]
}
