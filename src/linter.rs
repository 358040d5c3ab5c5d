//! # Datamodel Linter Module
//!
//! Checks a Prisma datamodel for things the generated routes cannot handle,
//! before any file is written.
//!
//! ## Checks Performed
//!
//! 1. **Integer id** - item routes look records up by a numeric `id` (error)
//! 2. **Route folder collisions** - model names equal after lowercasing (error)
//! 3. **Upload annotation type** - `@upload` on a field that isn't a `String` (warning)
//! 4. **Shadowed form keys** - a field whose name starts with an upload field's name is
//!    skipped when a multipart body is parsed (warning)
//! 5. **Pattern on non-String fields** - a name that looks like an upload but can't
//!    hold a path (info)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nextapi::config::UploadRules;
//! use nextapi::linter::{lint_dmmf, print_lint_issues};
//!
//! let issues = lint_dmmf("dmmf.json".as_ref(), &UploadRules::default())?;
//! print_lint_issues(&issues);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::config::{UploadDetection, UploadRules};
use crate::dmmf::{load_datamodel, Datamodel, FieldKind, Model};
use crate::generator::{classify, matches_upload_pattern, upload_annotation};

#[cfg(test)]
mod tests;

/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Error - the generated routes would be broken
    Error,
    /// Warning - generation works but the result is probably not what was meant
    Warning,
    /// Info - worth knowing
    Info,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSeverity::Error => write!(f, "error"),
            LintSeverity::Warning => write!(f, "warning"),
            LintSeverity::Info => write!(f, "info"),
        }
    }
}

/// A lint issue found in a datamodel
#[derive(Debug, Clone)]
pub struct LintIssue {
    /// Where the issue occurred (e.g. "model:Book", "field:Book.coverImage")
    pub location: String,
    pub severity: LintSeverity,
    /// Type of lint issue (e.g. "missing_int_id")
    pub kind: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl LintIssue {
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Lint a DMMF file (JSON or YAML)
pub fn lint_dmmf(path: &Path, rules: &UploadRules) -> anyhow::Result<Vec<LintIssue>> {
    let datamodel = load_datamodel(path)?;
    Ok(lint_datamodel(&datamodel, rules))
}

/// Lint every model of `datamodel`, in document order
pub fn lint_datamodel(datamodel: &Datamodel, rules: &UploadRules) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    let mut segments: HashMap<String, &str> = HashMap::new();

    for model in &datamodel.models {
        let segment = model.name.to_lowercase();
        if let Some(first) = segments.get(&segment) {
            issues.push(
                LintIssue::new(
                    format!("model:{}", model.name),
                    LintSeverity::Error,
                    "route_collision",
                    format!(
                        "Models '{first}' and '{}' both map to the route folder '{segment}'",
                        model.name
                    ),
                )
                .with_suggestion("Rename one of the models"),
            );
        } else {
            segments.insert(segment, &model.name);
        }

        lint_id(&mut issues, model);
        lint_upload_fields(&mut issues, model, rules);
    }

    issues
}

fn lint_id(issues: &mut Vec<LintIssue>, model: &Model) {
    let location = format!("model:{}", model.name);
    match model.field("id") {
        Some(id) if id.is_id && id.ty == "Int" && !id.is_list => {}
        Some(id) => issues.push(
            LintIssue::new(
                location,
                LintSeverity::Error,
                "missing_int_id",
                format!(
                    "Field '{}.id' is a {}{}, but item routes parse the id path segment as an integer",
                    model.name,
                    id.type_label(),
                    if id.is_id { "" } else { " that is not the primary key" }
                ),
            )
            .with_suggestion("Use `id Int @id @default(autoincrement())`"),
        ),
        None => issues.push(
            LintIssue::new(
                location,
                LintSeverity::Error,
                "missing_int_id",
                format!("Model '{}' has no 'id' field", model.name),
            )
            .with_suggestion("Add `id Int @id @default(autoincrement())`"),
        ),
    }
}

fn lint_upload_fields(issues: &mut Vec<LintIssue>, model: &Model, rules: &UploadRules) {
    let classified = classify(model, rules);

    for field in &model.fields {
        let location = format!("field:{}.{}", model.name, field.name);

        if upload_annotation(field) == Some(true) && field.ty != "String" {
            issues.push(
                LintIssue::new(
                    location.clone(),
                    LintSeverity::Warning,
                    "upload_annotation_type",
                    format!(
                        "'{}' is annotated with @upload but is a {}; only String fields can store an upload path",
                        field.name,
                        field.type_label()
                    ),
                )
                .with_suggestion("Remove the annotation or change the field type to String"),
            );
        }

        if !classified.is_upload(&field.name) {
            if let Some(upload) = classified
                .upload_fields
                .iter()
                .find(|u| field.name.starts_with(u.name.as_str()))
            {
                issues.push(
                    LintIssue::new(
                        location.clone(),
                        LintSeverity::Warning,
                        "upload_prefix_shadow",
                        format!(
                            "'{}' starts with the upload field name '{}' and is dropped from multipart request bodies",
                            field.name, upload.name
                        ),
                    )
                    .with_suggestion(format!("Rename '{}'", field.name)),
                );
            }
        }

        if rules.detection == UploadDetection::Heuristic
            && field.kind == FieldKind::Scalar
            && field.ty != "String"
            && upload_annotation(field).is_none()
            && matches_upload_pattern(&field.name, rules)
        {
            issues.push(LintIssue::new(
                location,
                LintSeverity::Info,
                "upload_pattern_non_string",
                format!(
                    "'{}' looks like an upload field but is a {}, so it is treated as a plain value",
                    field.name,
                    field.type_label()
                ),
            ));
        }
    }
}

/// Print lint issues grouped by severity
pub fn print_lint_issues(issues: &[LintIssue]) {
    if issues.is_empty() {
        println!("✅ No lint issues found!");
        return;
    }

    let count = |severity| issues.iter().filter(|i| i.severity == severity).count();
    println!("\n📋 Lint Results:");
    println!(
        "   {} error(s), {} warning(s), {} info(s)\n",
        count(LintSeverity::Error),
        count(LintSeverity::Warning),
        count(LintSeverity::Info)
    );

    for (severity, heading) in [
        (LintSeverity::Error, "❌ Errors (must fix):"),
        (LintSeverity::Warning, "⚠️  Warnings (should fix):"),
        (LintSeverity::Info, "ℹ️  Info:"),
    ] {
        let group: Vec<_> = issues.iter().filter(|i| i.severity == severity).collect();
        if group.is_empty() {
            continue;
        }
        println!("{heading}");
        for issue in group {
            println!("   [{}] {}", issue.kind, issue.location);
            println!("      {}", issue.message);
            if let Some(suggestion) = &issue.suggestion {
                println!("      💡 Suggestion: {}", suggestion);
            }
        }
        println!();
    }
}

/// Fail if there are any error-level lint issues
pub fn fail_if_errors(issues: &[LintIssue]) -> anyhow::Result<()> {
    let errors = issues
        .iter()
        .filter(|i| i.severity == LintSeverity::Error)
        .count();
    if errors > 0 {
        anyhow::bail!("{errors} lint error(s) found");
    }
    Ok(())
}
