//! Custom attributes do Taiga
//!
//! Dois recursos distintos:
//!
//! - **Definições** (`/task-custom-attributes`, `/issue-custom-attributes`,
//!   `/epic-custom-attributes`): quais atributos existem em um projeto
//! - **Valores** (`/{objeto}/custom-attributes-values/{id}`): os valores de um
//!   objeto, indexados pelo ID da definição (como string)
//!
//! O formato dos valores depende da configuração do projeto, então
//! `CustomAttributeValues<T>` é genérico: use um struct próprio ou
//! `HashMap<String, serde_json::Value>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Valores de custom attributes de um objeto
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomAttributeValues<T = HashMap<String, Value>> {
    pub attributes_values: T,

    /// Versão atual (obrigatória no PATCH)
    pub version: i64,

    /// ID do objeto dono dos valores (`epic`, `issue` ou `task` no JSON)
    #[serde(
        default,
        alias = "epic",
        alias = "issue",
        alias = "task",
        alias = "user_story",
        skip_serializing
    )]
    pub object_id: Option<i64>,
}

impl<T> CustomAttributeValues<T> {
    pub fn new(attributes_values: T, version: i64) -> Self {
        Self {
            attributes_values,
            version,
            object_id: None,
        }
    }
}

/// Definição de um custom attribute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomAttribute {
    pub id: i64,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `text`, `multiline`, `richtext`, `date`, `url`, `dropdown`, `checkbox`, `number`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    #[serde(default)]
    pub project: i64,

    /// Opções de atributos `dropdown`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct SupportFields {
        #[serde(rename = "14")]
        customer: Option<String>,
        #[serde(rename = "15")]
        hours: Option<f64>,
    }

    #[test]
    fn test_values_decode_with_object_alias() {
        let values: CustomAttributeValues<SupportFields> = serde_json::from_value(json!({
            "attributes_values": {"14": "ACME", "15": 2.5},
            "version": 3,
            "issue": 88
        }))
        .unwrap();

        assert_eq!(values.object_id, Some(88));
        assert_eq!(values.version, 3);
        assert_eq!(values.attributes_values.customer.as_deref(), Some("ACME"));
    }

    #[test]
    fn test_values_decode_epic_as_map() {
        let values: CustomAttributeValues = serde_json::from_value(json!({
            "attributes_values": {"3": true},
            "version": 1,
            "epic": 12
        }))
        .unwrap();

        assert_eq!(values.object_id, Some(12));
        assert_eq!(values.attributes_values.get("3"), Some(&json!(true)));
    }

    #[test]
    fn test_values_serialize_for_patch() {
        let values = CustomAttributeValues {
            attributes_values: json!({"14": "Globex"}),
            version: 3,
            object_id: Some(88),
        };
        assert_eq!(
            serde_json::to_value(&values).unwrap(),
            json!({"attributes_values": {"14": "Globex"}, "version": 3})
        );
    }

    #[test]
    fn test_definition_decodes() {
        let attr: CustomAttribute = serde_json::from_value(json!({
            "id": 14,
            "name": "Customer",
            "description": "Who reported it",
            "type": "text",
            "order": 1,
            "project": 2,
            "extra": null
        }))
        .unwrap();
        assert_eq!(attr.attribute_type.as_deref(), Some("text"));
        assert!(attr.extra.is_none());
    }
}
