#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use serde_json::{json, Value};
use std::io::Cursor;
use std::path::{Path, PathBuf};

fn run_lines(lines: &[Value]) -> Vec<Value> {
    let input: String = lines.iter().map(|l| format!("{l}\n")).collect();
    run_raw(&input)
}

fn run_raw(input: &str) -> Vec<Value> {
    let mut output = Vec::new();
    serve(Cursor::new(input.as_bytes()), &mut output).unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn dmmf() -> Value {
    json!({
        "datamodel": {
            "models": [{
                "name": "Category",
                "fields": [
                    {"name": "id", "kind": "scalar", "type": "Int", "isId": true,
                     "isRequired": true, "default": {"name": "autoincrement", "args": []}},
                    {"name": "name", "kind": "scalar", "type": "String", "isRequired": true}
                ]
            }],
            "enums": []
        }
    })
}

fn generate_request(id: i64, output: &Path, config: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": "generate",
        "id": id,
        "params": {
            "generator": {
                "name": "api",
                "provider": {"fromEnvVar": null, "value": "nextapi-gen"},
                "output": {"fromEnvVar": null, "value": output.to_string_lossy()},
                "config": config,
                "binaryTargets": [],
                "previewFeatures": []
            },
            "otherGenerators": [],
            "schemaPath": "/project/prisma/schema.prisma",
            "dmmf": dmmf(),
            "datasources": [],
            "datamodel": "",
            "version": "0000000000000000000000000000000000000000"
        }
    })
}

#[test]
fn test_get_manifest() {
    let replies = run_lines(&[json!({
        "jsonrpc": "2.0",
        "method": "getManifest",
        "params": {"name": "api"},
        "id": 1
    })]);
    assert_eq!(replies.len(), 1);
    let reply = &replies[0];
    assert_eq!(reply["jsonrpc"], "2.0");
    assert_eq!(reply["id"], 1);
    let manifest = &reply["result"]["manifest"];
    assert_eq!(manifest["defaultOutput"], "../api");
    assert_eq!(manifest["prettyName"], PRETTY_NAME);
    assert_eq!(manifest["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(manifest["requiresGenerators"], json!(["prisma-client-js"]));
    assert!(reply.get("error").is_none());
}

#[test]
fn test_unknown_method() {
    let replies = run_lines(&[json!({"jsonrpc": "2.0", "method": "shutdown", "id": 7})]);
    assert_eq!(replies[0]["id"], 7);
    assert_eq!(replies[0]["error"]["code"], METHOD_NOT_FOUND);
    assert!(replies[0].get("result").is_none());
}

#[test]
fn test_malformed_lines_are_skipped() {
    let input = "not json\n\n{\"jsonrpc\":\"2.0\",\"method\":\"getManifest\",\"id\":2}\n";
    let replies = run_raw(input);
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["id"], 2);
}

#[test]
fn test_generate_writes_routes() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("api");
    let replies = run_lines(&[generate_request(3, &out, json!({"extension": "js"}))]);
    assert_eq!(replies[0]["id"], 3);
    assert_eq!(replies[0]["result"], Value::Null);
    assert!(replies[0].get("error").is_none());
    assert!(out.join("category/route.js").is_file());
    assert!(out.join("category/[id]/route.js").is_file());
    assert!(out.join("_lib/prisma.js").is_file());
    assert!(out.join("docs.html").is_file());
    assert!(!out.join("_lib/uploads.js").exists());
}

#[test]
fn test_generate_failure_reply() {
    let dir = tempfile::tempdir().unwrap();
    let replies = run_lines(&[generate_request(4, dir.path(), json!({"colour": "red"}))]);
    let error = &replies[0]["error"];
    assert_eq!(error["code"], GENERATION_FAILED);
    let message = error["message"].as_str().unwrap();
    assert!(message.contains("Invalid config for generator 'api'"));
    assert!(message.contains("Unknown generator config key 'colour'"));
    assert!(error["data"]["stack"].is_string());
}

#[test]
fn test_generate_invalid_params() {
    let replies = run_lines(&[json!({
        "jsonrpc": "2.0",
        "method": "generate",
        "id": 5,
        "params": {"dmmf": dmmf()}
    })]);
    assert_eq!(replies[0]["error"]["code"], INVALID_PARAMS);
}

#[test]
fn test_several_requests_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let replies = run_lines(&[
        json!({"jsonrpc": "2.0", "method": "getManifest", "id": 1}),
        generate_request(2, dir.path(), json!({})),
    ]);
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["id"], 1);
    assert_eq!(replies[1]["id"], 2);
    assert!(dir.path().join("category/route.ts").is_file());
}

#[test]
fn test_output_dir_resolution() {
    let options: GeneratorOptions = serde_json::from_value(json!({
        "generator": {"name": "api", "output": {"value": "../app/api"}, "config": {}},
        "dmmf": dmmf(),
        "schemaPath": "/project/prisma/schema.prisma"
    }))
    .unwrap();
    assert_eq!(
        options.output_dir().unwrap(),
        PathBuf::from("/project/prisma/../app/api")
    );

    let missing: GeneratorOptions = serde_json::from_value(json!({
        "generator": {"name": "api", "output": null, "config": {}},
        "dmmf": dmmf()
    }))
    .unwrap();
    assert!(missing.output_dir().is_err());
}

#[test]
fn test_response_serialization() {
    let ok = serde_json::to_value(Response::success(json!(1), Value::Null)).unwrap();
    assert_eq!(ok, json!({"jsonrpc": "2.0", "id": 1, "result": null}));
    let err = serde_json::to_value(Response::error(json!(2), METHOD_NOT_FOUND, "nope")).unwrap();
    assert_eq!(
        err,
        json!({"jsonrpc": "2.0", "id": 2, "error": {"code": -32601, "message": "nope"}})
    );
}
