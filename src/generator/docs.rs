//! Combined static HTML reference for every generated model.

use askama::Template;

use super::fields::ClassifiedFields;
use super::payload::{ExamplePayload, PayloadPart};
use super::routes::RouteIr;
use crate::config::GeneratorSettings;
use crate::dmmf::Model;
use crate::placeholder::form_text;

/// A row of a model's field table.
#[derive(Debug, Clone)]
pub struct FieldRow {
    pub name: String,
    pub type_label: String,
    pub required: &'static str,
    pub note: &'static str,
}

/// One CRUD operation with its example calls.
#[derive(Debug, Clone)]
pub struct OperationDoc {
    pub title: &'static str,
    pub method: &'static str,
    pub path: String,
    pub curl: String,
    pub fetch: String,
}

/// Everything rendered for one model.
#[derive(Debug, Clone)]
pub struct ModelDoc {
    pub name: String,
    pub anchor: String,
    pub multipart: bool,
    pub fields: Vec<FieldRow>,
    /// Example Create body (pretty JSON or a multipart part list)
    pub example_body: String,
    pub operations: Vec<OperationDoc>,
}

#[derive(Template)]
#[template(path = "docs.html")]
pub struct DocsTemplate<'a> {
    pub base_url: &'a str,
    pub models: &'a [ModelDoc],
}

fn field_rows(model: &Model, classified: &ClassifiedFields<'_>) -> Vec<FieldRow> {
    model
        .fields
        .iter()
        .map(|f| {
            if classified.is_upload(&f.name) {
                FieldRow {
                    name: f.name.clone(),
                    type_label: "File".to_string(),
                    required: "No",
                    note: "multipart file part",
                }
            } else {
                FieldRow {
                    name: f.name.clone(),
                    type_label: f.type_label(),
                    required: if f.is_required { "Yes" } else { "No" },
                    note: if f.is_relation() {
                        "relation, included in responses"
                    } else if f.is_server_assigned() {
                        "assigned by the database"
                    } else {
                        ""
                    },
                }
            }
        })
        .collect()
}

fn multipart_description(payload: &ExamplePayload) -> String {
    payload
        .parts
        .iter()
        .map(|(key, part)| match part {
            PayloadPart::File => format!("{key}: <file>"),
            PayloadPart::Value(v) => format!("{key}: {}", form_text(v)),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn curl_body(payload: &ExamplePayload) -> String {
    if payload.multipart {
        payload
            .parts
            .iter()
            .map(|(key, part)| match part {
                PayloadPart::File => format!(" \\\n  -F '{key}=@./{key}.png'"),
                PayloadPart::Value(v) => format!(" \\\n  -F '{key}={}'", form_text(v)),
            })
            .collect()
    } else {
        format!(
            " \\\n  -H 'Content-Type: application/json' \\\n  -d '{}'",
            payload.json()
        )
    }
}

fn fetch_with_body(method: &str, path: &str, payload: &ExamplePayload) -> String {
    if payload.multipart {
        let appends: String = payload
            .parts
            .iter()
            .map(|(key, part)| match part {
                PayloadPart::File => format!("form.append('{key}', fileInput.files[0])\n"),
                PayloadPart::Value(v) => format!("form.append('{key}', {:?})\n", form_text(v)),
            })
            .collect();
        format!(
            "const form = new FormData()\n{appends}const res = await fetch('{path}', {{ method: '{method}', body: form }})\nconst record = await res.json()"
        )
    } else {
        let body = payload.json_pretty().replace('\n', "\n  ");
        format!(
            "const res = await fetch('{path}', {{\n  method: '{method}',\n  headers: {{ 'Content-Type': 'application/json' }},\n  body: JSON.stringify({body}),\n}})\nconst record = await res.json()"
        )
    }
}

/// Collect the documentation of one model.
pub fn model_doc(
    model: &Model,
    classified: &ClassifiedFields<'_>,
    ir: &RouteIr,
    create: &ExamplePayload,
    update: &ExamplePayload,
    settings: &GeneratorSettings,
) -> ModelDoc {
    let collection_path = format!("{}/{}", settings.api_prefix, ir.segment);
    let item_path = format!("{collection_path}/1");
    let collection_url = format!("{}{collection_path}", settings.base_url);
    let item_url = format!("{}{item_path}", settings.base_url);

    let operations = vec![
        OperationDoc {
            title: "Get All",
            method: "GET",
            path: collection_path.clone(),
            curl: format!("curl {collection_url}"),
            fetch: format!(
                "const res = await fetch('{collection_path}')\nconst {} = await res.json()",
                ir.collection_var
            ),
        },
        OperationDoc {
            title: "Get By Id",
            method: "GET",
            path: format!("{collection_path}/{{id}}"),
            curl: format!("curl {item_url}"),
            fetch: format!(
                "const res = await fetch('{item_path}')\nconst {} = await res.json()",
                ir.record_var
            ),
        },
        OperationDoc {
            title: "Create",
            method: "POST",
            path: collection_path.clone(),
            curl: format!("curl -X POST {collection_url}{}", curl_body(create)),
            fetch: fetch_with_body("POST", &collection_path, create),
        },
        OperationDoc {
            title: "Update",
            method: "PUT",
            path: format!("{collection_path}/{{id}}"),
            curl: format!("curl -X PUT {item_url}{}", curl_body(update)),
            fetch: fetch_with_body("PUT", &item_path, update),
        },
        OperationDoc {
            title: "Delete",
            method: "DELETE",
            path: format!("{collection_path}/{{id}}"),
            curl: format!("curl -X DELETE {item_url}"),
            fetch: format!("await fetch('{item_path}', {{ method: 'DELETE' }})"),
        },
    ];

    ModelDoc {
        name: model.name.clone(),
        anchor: ir.segment.clone(),
        multipart: create.multipart,
        fields: field_rows(model, classified),
        example_body: if create.multipart {
            multipart_description(create)
        } else {
            create.json_pretty()
        },
        operations,
    }
}

/// Render the combined `docs.html`.
pub fn render_docs(models: &[ModelDoc], settings: &GeneratorSettings) -> anyhow::Result<String> {
    Ok(DocsTemplate {
        base_url: &settings.base_url,
        models,
    }
    .render()?)
}
