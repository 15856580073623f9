//! Tags do Taiga
//!
//! Na leitura a API devolve `[["backend", "#70728F"], ["urgent", null]]`,
//! mas na escrita aceita tanto `["backend"]` quanto pares `[nome, cor]`.
//! `Tag` aceita os dois formatos e serializa como nome simples quando não
//! há cor definida.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub color: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Some(color.into()),
        }
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagRepr {
    Name(String),
    Pair(String, Option<String>),
    Single((String,)),
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match TagRepr::deserialize(deserializer)? {
            TagRepr::Name(name) => Tag::new(name),
            TagRepr::Pair(name, color) => Tag { name, color },
            TagRepr::Single((name,)) => Tag::new(name),
        })
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.color {
            Some(color) => (&self.name, color).serialize(serializer),
            None => self.name.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_both_shapes() {
        let tags: Vec<Tag> =
            serde_json::from_value(json!([["backend", "#70728F"], ["urgent", null], "docs"])).unwrap();

        assert_eq!(tags[0], Tag::with_color("backend", "#70728F"));
        assert_eq!(tags[1], Tag::new("urgent"));
        assert_eq!(tags[2], Tag::new("docs"));
    }

    #[test]
    fn test_encode() {
        let tags = vec![Tag::new("docs"), Tag::with_color("api", "#fff")];
        assert_eq!(serde_json::to_value(&tags).unwrap(), json!(["docs", ["api", "#fff"]]));
    }

    #[test]
    fn test_display_and_from() {
        let tag: Tag = "frontend".into();
        assert_eq!(tag.to_string(), "frontend");
    }
}
