// placeholder.rs

use crate::dmmf::{EnumValue, Field, FieldKind};
use serde_json::{json, Value};

/// Which example payload a placeholder is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    Create,
    Update,
}

/// Example value for `field` in a Create or Update request body.
///
/// `enum_values` are the variants when the field is enum-typed.
pub fn placeholder(field: &Field, enum_values: Option<&[EnumValue]>, sample: Sample) -> Value {
    if field.kind == FieldKind::Object {
        return json!({ "connect": { "id": 1 } });
    }

    let create = sample == Sample::Create;
    let value = match (field.kind, field.ty.as_str()) {
        (FieldKind::Enum, _) => {
            let variant = enum_values.and_then(|values| {
                if create {
                    values.first()
                } else {
                    values.last()
                }
            });
            match variant {
                Some(v) => Value::String(v.name.clone()),
                None => fallback(create),
            }
        }
        (_, "String") => Value::from(if create { "example" } else { "updated example" }),
        (_, "Int") | (_, "BigInt") => Value::from(if create { 1 } else { 2 }),
        (_, "Boolean") => Value::from(create),
        (_, "Float") | (_, "Decimal") => Value::from(if create { 1.5 } else { 2.5 }),
        (_, "DateTime") => Value::from(if create {
            "2024-01-01T00:00:00.000Z"
        } else {
            "2024-06-01T00:00:00.000Z"
        }),
        (_, "Json") => json!({}),
        _ => fallback(create),
    };

    if field.is_list {
        Value::Array(vec![value])
    } else {
        value
    }
}

fn fallback(create: bool) -> Value {
    Value::from(if create { "value" } else { "updated value" })
}

/// Render a placeholder the way it travels in a multipart text part.
///
/// Strings go as-is; everything else is JSON so the route's parse-or-fallback
/// step turns it back into a number, boolean or object.
pub fn form_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
