#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Unit tests for the datamodel linter

use crate::config::{UploadDetection, UploadRules};
use crate::dmmf::{Datamodel, Field, Model};
use crate::linter::{fail_if_errors, lint_datamodel, lint_dmmf, LintIssue, LintSeverity};
use std::io::Write;
use tempfile::NamedTempFile;

fn id_field() -> Field {
    let mut id = Field::scalar("id", "Int");
    id.is_id = true;
    id.is_generated = true;
    id
}

fn documented(name: &str, ty: &str, doc: &str) -> Field {
    Field {
        documentation: Some(doc.to_string()),
        ..Field::scalar(name, ty)
    }
}

fn lint(models: Vec<Model>) -> Vec<LintIssue> {
    lint_datamodel(
        &Datamodel {
            models,
            enums: Vec::new(),
        },
        &UploadRules::default(),
    )
}

fn kinds(issues: &[LintIssue]) -> Vec<&str> {
    issues.iter().map(|i| i.kind.as_str()).collect()
}

#[test]
fn test_clean_datamodel() {
    let issues = lint(vec![Model::new(
        "Book",
        vec![
            id_field(),
            Field::scalar("title", "String"),
            Field::scalar("coverImage", "String"),
        ],
    )]);
    assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    assert!(fail_if_errors(&issues).is_ok());
}

#[test]
fn test_missing_id() {
    let issues = lint(vec![Model::new("Tag", vec![Field::scalar("label", "String")])]);
    assert_eq!(kinds(&issues), vec!["missing_int_id"]);
    assert_eq!(issues[0].severity, LintSeverity::Error);
    assert_eq!(issues[0].location, "model:Tag");
    assert!(fail_if_errors(&issues).is_err());
}

#[test]
fn test_string_id() {
    let mut id = Field::scalar("id", "String");
    id.is_id = true;
    let issues = lint(vec![Model::new("Session", vec![id])]);
    assert_eq!(kinds(&issues), vec!["missing_int_id"]);
    assert!(issues[0].message.contains("is a String"));
}

#[test]
fn test_route_collision() {
    let issues = lint(vec![
        Model::new("Person", vec![id_field()]),
        Model::new("PERSON", vec![id_field()]),
    ]);
    assert_eq!(kinds(&issues), vec!["route_collision"]);
    assert_eq!(issues[0].location, "model:PERSON");
    assert!(issues[0].message.contains("'person'"));
}

#[test]
fn test_upload_annotation_on_non_string() {
    let issues = lint(vec![Model::new(
        "Report",
        vec![id_field(), documented("pages", "Int", "@upload")],
    )]);
    assert_eq!(kinds(&issues), vec!["upload_annotation_type"]);
    assert_eq!(issues[0].severity, LintSeverity::Warning);
    assert_eq!(issues[0].location, "field:Report.pages");
}

#[test]
fn test_prefix_shadowing() {
    let issues = lint(vec![Model::new(
        "User",
        vec![
            id_field(),
            Field::scalar("avatar", "String"),
            Field::scalar("avatarAltText", "String"),
        ],
    )]);
    // avatarAltText matches the pattern too, so nothing is shadowed
    assert!(issues.is_empty());

    let issues = lint(vec![Model::new(
        "Book",
        vec![
            id_field(),
            documented("cover", "String", "@upload"),
            Field::scalar("coverCaption", "String"),
        ],
    )]);
    let shadow: Vec<_> = issues
        .iter()
        .filter(|i| i.kind == "upload_prefix_shadow")
        .collect();
    assert_eq!(shadow.len(), 1);
    assert_eq!(shadow[0].location, "field:Book.coverCaption");
}

#[test]
fn test_pattern_on_non_string_is_info() {
    let issues = lint(vec![Model::new(
        "Doc",
        vec![id_field(), Field::scalar("fileSize", "Int")],
    )]);
    assert_eq!(kinds(&issues), vec!["upload_pattern_non_string"]);
    assert_eq!(issues[0].severity, LintSeverity::Info);

    let annotated = lint_datamodel(
        &Datamodel {
            models: vec![Model::new(
                "Doc",
                vec![id_field(), Field::scalar("fileSize", "Int")],
            )],
            enums: Vec::new(),
        },
        &UploadRules {
            detection: UploadDetection::Annotated,
            ..UploadRules::default()
        },
    );
    assert!(annotated.is_empty());
}

#[test]
fn test_lint_dmmf_file() {
    let mut temp = NamedTempFile::with_suffix(".json").expect("create temp file");
    temp.write_all(
        br#"{"datamodel": {"models": [{"name": "Tag", "fields": [
            {"name": "label", "kind": "scalar", "type": "String", "isRequired": true}
        ]}], "enums": []}}"#,
    )
    .expect("write dmmf");
    temp.flush().expect("flush");
    let issues = lint_dmmf(temp.path(), &UploadRules::default()).expect("lint dmmf");
    assert_eq!(kinds(&issues), vec!["missing_int_id"]);
}
