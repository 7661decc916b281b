use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    /// Reference to an uploaded file, kept as a string (path or URL)
    File,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::File => "file",
        }
    }

    /// Whether `value` is an acceptable payload for a field of this type.
    /// `null` stands for "no value" and is accepted by every type.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (FieldType::String | FieldType::File, Value::String(_)) => true,
            (FieldType::Number, Value::Number(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_field_type(s)
    }
}

pub fn parse_field_type(s: &str) -> Result<FieldType, String> {
    match s.trim().to_lowercase().as_str() {
        "string" => Ok(FieldType::String),
        "number" => Ok(FieldType::Number),
        "file" => Ok(FieldType::File),
        other => Err(format!("Unknown type '{other}'. Use string|number|file")),
    }
}
