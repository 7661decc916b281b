use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::datatype::{FieldType, parse_field_type};

/// Declared type of one field, plus the optional primary-key marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(rename = "primaryKey", default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<bool>,
}

impl FieldSpec {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            primary_key: None,
        }
    }

    pub fn primary(field_type: FieldType) -> Self {
        Self {
            field_type,
            primary_key: Some(true),
        }
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key.unwrap_or(false)
    }
}

/// Describes a table's fields in declaration order.
///
/// Purely descriptive: the engine only consults it when the database was
/// opened with row validation enabled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Schema {
    pub fields: IndexMap<String, FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper, mostly for callers assembling schemas in code
    pub fn with_field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(name.into(), spec);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Name of the first field marked as primary key
    pub fn primary_key(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|(_, spec)| spec.is_primary_key())
            .map(|(name, _)| name.as_str())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds a schema from `name:type[:pk]` column definitions
    pub fn from_column_defs<'a>(defs: impl IntoIterator<Item = &'a str>) -> Result<Self, String> {
        let mut schema = Schema::new();
        for def in defs {
            let (name, spec) = parse_column_def(def)?;
            if schema.fields.contains_key(&name) {
                return Err(format!("Duplicate column '{name}'"));
            }
            schema.fields.insert(name, spec);
        }
        Ok(schema)
    }
}

/// Parses a single `name:type[:pk]` column definition
pub fn parse_column_def(def: &str) -> Result<(String, FieldSpec), String> {
    let mut parts = def.split(':');
    let name = parts.next().unwrap_or("").trim();
    if name.is_empty() {
        return Err(format!("Missing column name in '{def}'"));
    }
    let dtype = parts
        .next()
        .ok_or_else(|| format!("Missing type for column '{name}'. Use name:type[:pk]"))?;
    let field_type = parse_field_type(dtype)?;
    let spec = match parts.next() {
        None => FieldSpec::new(field_type),
        Some(flag) if flag.eq_ignore_ascii_case("pk") => FieldSpec::primary(field_type),
        Some(other) => return Err(format!("Unknown column flag '{other}'. Only 'pk' is supported")),
    };
    if parts.next().is_some() {
        return Err(format!("Too many ':' segments in column definition '{def}'"));
    }
    Ok((name.to_string(), spec))
}

// Older writers nested the field map under a "fields" key; accept both shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaRepr {
    Wrapped { fields: IndexMap<String, FieldSpec> },
    Flat(IndexMap<String, FieldSpec>),
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = match SchemaRepr::deserialize(deserializer)? {
            SchemaRepr::Wrapped { fields } => fields,
            SchemaRepr::Flat(fields) => fields,
        };
        Ok(Schema { fields })
    }
}
