use std::collections::BTreeMap;
use std::path::Path;

use jsonschema::validator_for;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::consistency;
use crate::error::InconsistentSchema;
use crate::instance::Instance;

#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
    #[error("Schema shape error: {0}")]
    SchemaShape(String),
    #[error(transparent)]
    Inconsistent(#[from] InconsistentSchema),
}

/// Type discriminator of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
    Null,
    #[serde(other)]
    Other,
}

/// `type` as written in a document: a single name or a union of names.
#[derive(Deserialize)]
#[serde(untagged)]
enum TypeDecl {
    Single(SchemaType),
    Union(Vec<SchemaType>),
}

impl From<TypeDecl> for SchemaType {
    /// A union admitting `object` declares an object; other unions carry no
    /// property contract.
    fn from(decl: TypeDecl) -> Self {
        match decl {
            TypeDecl::Single(schema_type) => schema_type,
            TypeDecl::Union(types) if types.contains(&SchemaType::Object) => SchemaType::Object,
            TypeDecl::Union(types) => match types.as_slice() {
                [only] => *only,
                _ => SchemaType::Other,
            },
        }
    }
}

/// A schema document node, or a boolean subschema (`true` / `false`).
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSchema {
    Bool(bool),
    Node {
        #[serde(rename = "type", default)]
        schema_type: Option<TypeDecl>,
        #[serde(default)]
        properties: BTreeMap<String, SchemaNode>,
    },
}

impl From<RawSchema> for SchemaNode {
    fn from(raw: RawSchema) -> Self {
        match raw {
            RawSchema::Bool(_) => SchemaNode::default(),
            RawSchema::Node { schema_type, properties } => SchemaNode {
                schema_type: schema_type.map(SchemaType::from),
                properties,
            },
        }
    }
}

/// Read-only schema tree: a type tag and, for objects, named properties.
///
/// Keywords other than `type` and `properties` are ignored. Boolean
/// subschemas load as untyped nodes without properties.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawSchema")]
pub struct SchemaNode {
    pub schema_type: Option<SchemaType>,
    pub properties: BTreeMap<String, SchemaNode>,
}

impl SchemaNode {
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            properties: BTreeMap::new(),
        }
    }

    /// Object node declaring the given properties.
    pub fn object<K, I>(properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SchemaNode)>,
    {
        Self {
            schema_type: Some(SchemaType::Object),
            properties: properties
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        }
    }

    pub fn is_object(&self) -> bool {
        self.schema_type == Some(SchemaType::Object)
    }

    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.get(name)
    }

    /// Build a schema tree from an already-decoded document.
    ///
    /// The document is first checked against a structural meta-schema so that
    /// a malformed `type` or `properties` is reported with its location.
    pub fn from_value(document: &Value) -> Result<Self, SchemaValidationError> {
        let meta = validator_for(&structure_meta_schema())
            .map_err(|e| SchemaValidationError::SchemaShape(e.to_string()))?;
        meta.validate(document)
            .map_err(|e| SchemaValidationError::SchemaShape(e.to_string()))?;

        Ok(SchemaNode::deserialize(document)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SchemaValidationError> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_value(&document)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaValidationError> {
        let document: Value = serde_yaml::from_str(text)?;
        Self::from_value(&document)
    }

    pub fn from_str_as(text: &str, format: DocumentFormat) -> Result<Self, SchemaValidationError> {
        match format {
            DocumentFormat::Json => Self::from_json_str(text),
            DocumentFormat::Yaml => Self::from_yaml_str(text),
        }
    }
}

/// Shape accepted for schema documents: `type` is a name or a list of names,
/// and `properties` maps names to nested schema documents or booleans.
fn structure_meta_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "properties": {
            "type": {
                "anyOf": [
                    { "type": "string" },
                    { "type": "array", "items": { "type": "string" } }
                ]
            },
            "properties": {
                "type": "object",
                "additionalProperties": {
                    "anyOf": [{ "$ref": "#" }, { "type": "boolean" }]
                }
            }
        }
    })
}

/// Text format of a schema or instance document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` and `.yml` files are YAML, anything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }

    pub fn parse_instance(self, text: &str) -> Result<Instance, SchemaValidationError> {
        let value: Value = match self {
            DocumentFormat::Json => serde_json::from_str(text)?,
            DocumentFormat::Yaml => serde_yaml::from_str(text)?,
        };
        Ok(Instance::from(value))
    }
}

/// Check a JSON instance against a JSON schema document.
/// Returns Ok(()) if every instance key is declared, Err otherwise.
pub fn check_json(schema_str: &str, instance_str: &str) -> Result<(), SchemaValidationError> {
    check_documents(schema_str, DocumentFormat::Json, instance_str, DocumentFormat::Json)
}

pub fn check_documents(
    schema_text: &str,
    schema_format: DocumentFormat,
    instance_text: &str,
    instance_format: DocumentFormat,
) -> Result<(), SchemaValidationError> {
    let schema = SchemaNode::from_str_as(schema_text, schema_format)?;
    let instance = instance_format.parse_instance(instance_text)?;
    consistency::validate(&instance, &schema)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keywords_and_types_are_tolerated() {
        let schema = SchemaNode::from_json_str(
            r#"{
              "type": "object",
              "required": ["id"],
              "properties": {
                "id": { "type": "integer", "format": "int64" },
                "when": { "type": "timestamp" },
                "tags": { "type": "array", "items": { "type": "string" } }
              }
            }"#,
        )
        .unwrap();

        assert!(schema.is_object());
        assert_eq!(schema.property("when").unwrap().schema_type, Some(SchemaType::Other));
        assert_eq!(schema.property("tags").unwrap().schema_type, Some(SchemaType::Array));
        assert!(schema.property("tags").unwrap().properties.is_empty());
    }

    #[test]
    fn missing_type_is_none() {
        let schema = SchemaNode::from_json_str(r#"{ "properties": { "a": {} } }"#).unwrap();
        assert_eq!(schema.schema_type, None);
        assert!(!schema.is_object());
        assert_eq!(schema.property("a"), Some(&SchemaNode::default()));
    }

    #[test]
    fn non_schema_property_values_are_rejected() {
        let err = SchemaNode::from_json_str(r#"{ "type": "object", "properties": { "a": 5 } }"#)
            .unwrap_err();
        assert!(matches!(err, SchemaValidationError::SchemaShape(_)), "got {err:?}");
    }

    #[test]
    fn type_unions_load() {
        let schema = SchemaNode::from_json_str(
            r#"{
              "type": ["object", "null"],
              "properties": {
                "a": { "type": ["string", "null"] },
                "b": { "type": ["integer"] }
              }
            }"#,
        )
        .unwrap();

        assert!(schema.is_object());
        assert_eq!(schema.property("a").unwrap().schema_type, Some(SchemaType::Other));
        assert_eq!(schema.property("b").unwrap().schema_type, Some(SchemaType::Integer));
    }

    #[test]
    fn boolean_subschemas_load_as_untyped_nodes() {
        let schema = SchemaNode::from_json_str(
            r#"{ "type": "object", "properties": { "a": true, "b": false } }"#,
        )
        .unwrap();

        assert_eq!(schema.property("a"), Some(&SchemaNode::default()));
        assert_eq!(schema.property("b"), Some(&SchemaNode::default()));
        check_json(
            r#"{ "type": "object", "properties": { "a": true } }"#,
            r#"{ "a": { "anything": 1 } }"#,
        )
        .expect("boolean subschema must not constrain keys");
    }

    #[test]
    fn non_string_type_is_rejected() {
        let err = SchemaNode::from_json_str(r#"{ "type": 7 }"#).unwrap_err();
        assert!(matches!(err, SchemaValidationError::SchemaShape(_)), "got {err:?}");

        let err = SchemaNode::from_json_str(r#"{ "type": ["object", 1] }"#).unwrap_err();
        assert!(matches!(err, SchemaValidationError::SchemaShape(_)), "got {err:?}");
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a/schema.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("schema.YML")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("schema.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("schema")), DocumentFormat::Json);
    }
}
