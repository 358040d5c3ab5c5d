use serde_json::{Map, Value};

use super::fields::ClassifiedFields;
use crate::dmmf::{Datamodel, Model};
use crate::placeholder::{placeholder, Sample};

/// One key of an example request body.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadPart {
    /// A file part (upload fields in multipart bodies)
    File,
    Value(Value),
}

/// Example Create/Update body for a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamplePayload {
    /// `multipart/form-data` when the model has upload fields, JSON otherwise
    pub multipart: bool,
    pub parts: Vec<(String, PayloadPart)>,
}

impl ExamplePayload {
    /// Build the body from every field the client may write.
    ///
    /// A relation backed by foreign key scalars is written through those
    /// scalars alone: Prisma rejects a create input that mixes `connect` with
    /// the scalar form.
    pub fn build(
        model: &Model,
        classified: &ClassifiedFields<'_>,
        datamodel: &Datamodel,
        sample: Sample,
    ) -> Self {
        let multipart = classified.has_upload_fields();
        let writable = |name: &str| model.field(name).is_some_and(|f| !f.is_server_assigned());
        let parts = model
            .fields
            .iter()
            .filter(|f| !f.is_server_assigned())
            .filter(|f| {
                f.relation_from_fields.is_empty()
                    || !f.relation_from_fields.iter().all(|fk| writable(fk))
            })
            .map(|f| {
                let part = if multipart && classified.is_upload(&f.name) {
                    PayloadPart::File
                } else {
                    PayloadPart::Value(placeholder(f, datamodel.enum_values(&f.ty), sample))
                };
                (f.name.clone(), part)
            })
            .collect();
        ExamplePayload { multipart, parts }
    }

    /// The non-file parts as a JSON object, in field order.
    pub fn json(&self) -> Value {
        let mut map = Map::new();
        for (name, part) in &self.parts {
            if let PayloadPart::Value(v) = part {
                map.insert(name.clone(), v.clone());
            }
        }
        Value::Object(map)
    }

    /// Pretty JSON with two-space indentation.
    pub fn json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.json()).unwrap_or_else(|_| "{}".to_string())
    }
}
