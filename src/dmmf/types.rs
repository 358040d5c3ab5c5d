use serde::Deserialize;
use serde_json::Value;

/// Field kind as reported by the Prisma DMMF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Scalar,
    /// Relation to another model
    Object,
    Enum,
    Unsupported,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Scalar => write!(f, "scalar"),
            FieldKind::Object => write!(f, "object"),
            FieldKind::Enum => write!(f, "enum"),
            FieldKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// One attribute of a [`Model`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    /// Scalar tag (`String`, `Int`, ...) or the related model / enum name
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_id: bool,
    #[serde(default)]
    pub is_generated: bool,
    #[serde(default)]
    pub is_updated_at: bool,
    #[serde(default)]
    pub has_default_value: bool,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub relation_from_fields: Vec<String>,
    #[serde(default)]
    pub documentation: Option<String>,
}

/// Default functions whose value the database assigns on insert.
const SERVER_DEFAULTS: &[&str] = &["autoincrement", "now", "uuid", "cuid", "dbgenerated"];

impl Field {
    /// Build a plain scalar field; mostly useful for tests and fixtures.
    pub fn scalar(name: &str, ty: &str) -> Self {
        Field {
            name: name.to_string(),
            kind: FieldKind::Scalar,
            ty: ty.to_string(),
            is_list: false,
            is_required: true,
            is_id: false,
            is_generated: false,
            is_updated_at: false,
            has_default_value: false,
            default: None,
            relation_from_fields: Vec::new(),
            documentation: None,
        }
    }

    /// Build a relation field pointing at `target`.
    pub fn relation(name: &str, target: &str) -> Self {
        Field {
            kind: FieldKind::Object,
            ..Field::scalar(name, target)
        }
    }

    pub fn is_relation(&self) -> bool {
        self.kind == FieldKind::Object
    }

    /// Whether the storage engine fills this field in on its own.
    ///
    /// Covers the DMMF `isGenerated` flag, `@updatedAt` and database-side
    /// defaults such as `autoincrement()` or `now()`. Such fields never show
    /// up in example payloads.
    pub fn is_server_assigned(&self) -> bool {
        if self.is_generated || self.is_updated_at {
            return true;
        }
        match &self.default {
            Some(Value::Object(default)) => default
                .get("name")
                .and_then(Value::as_str)
                .map(|name| SERVER_DEFAULTS.contains(&name))
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Human-readable type label, `Book[]` for lists.
    pub fn type_label(&self) -> String {
        if self.is_list {
            format!("{}[]", self.ty)
        } else {
            self.ty.clone()
        }
    }
}

/// A named entity with an ordered field list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
    pub fields: Vec<Field>,
    #[serde(default)]
    pub documentation: Option<String>,
}

impl Model {
    pub fn new(name: &str, fields: Vec<Field>) -> Self {
        Model {
            name: name.to_string(),
            db_name: None,
            fields,
            documentation: None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnumValue {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatamodelEnum {
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

/// The datamodel part of a DMMF document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Datamodel {
    #[serde(default)]
    pub models: Vec<Model>,
    #[serde(default)]
    pub enums: Vec<DatamodelEnum>,
}

impl Datamodel {
    pub fn enum_values(&self, name: &str) -> Option<&[EnumValue]> {
        self.enums
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.values.as_slice())
    }
}

/// A full DMMF document; only the datamodel is used.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub datamodel: Datamodel,
}
