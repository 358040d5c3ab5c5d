//! Postman v2.1 collections, one per model.

use serde_json::{json, Value};

use super::payload::{ExamplePayload, PayloadPart};
use super::routes::RouteIr;
use crate::config::GeneratorSettings;
use crate::placeholder::form_text;

pub const POSTMAN_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

fn request(name: &str, method: &str, url: &str, body: Option<Value>) -> Value {
    let mut request = json!({
        "method": method,
        "url": { "raw": url },
    });
    if let Some(body) = body {
        if body["mode"] == "raw" {
            request["header"] = json!([
                { "key": "Content-Type", "value": "application/json" }
            ]);
        }
        request["body"] = body;
    }
    json!({ "name": name, "request": request })
}

fn body(payload: &ExamplePayload) -> Value {
    if !payload.multipart {
        return json!({
            "mode": "raw",
            "raw": payload.json_pretty(),
            "options": { "raw": { "language": "json" } },
        });
    }
    let formdata: Vec<Value> = payload
        .parts
        .iter()
        .map(|(key, part)| match part {
            PayloadPart::File => json!({ "key": key, "type": "file", "src": "" }),
            PayloadPart::Value(v) => json!({ "key": key, "value": form_text(v), "type": "text" }),
        })
        .collect();
    json!({ "mode": "formdata", "formdata": formdata })
}

/// Build the collection for one model.
///
/// `create` and `update` are the example bodies for the POST and PUT requests.
pub fn postman_collection(
    ir: &RouteIr,
    create: &ExamplePayload,
    update: &ExamplePayload,
    settings: &GeneratorSettings,
) -> Value {
    let collection_url = format!("{}{}/{}", settings.base_url, settings.api_prefix, ir.segment);
    let item_url = format!("{collection_url}/1");

    json!({
        "info": {
            "name": format!("{} API", ir.model_name),
            "schema": POSTMAN_SCHEMA,
        },
        "item": [
            request("Get All", "GET", &collection_url, None),
            request("Get By Id", "GET", &item_url, None),
            request("Create", "POST", &collection_url, Some(body(create))),
            request("Update", "PUT", &item_url, Some(body(update))),
            request("Delete", "DELETE", &item_url, None),
        ],
    })
}
