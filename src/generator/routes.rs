use askama::Template;

use super::fields::ClassifiedFields;
use crate::config::{GeneratorSettings, OutputLanguage};
use crate::dmmf::Model;

/// Private folder (ignored by the Next.js router) holding shared modules.
pub const LIB_DIR: &str = "_lib";

/// Identifiers that can't be used as a local variable in the emitted handlers,
/// either because JavaScript reserves them or because the route module already
/// binds them (handler locals, module helpers and imports).
const RESERVED_IDENTIFIERS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield", "data", "error",
    "handlers", "id", "params", "prisma", "req",
    // module-level helpers and imports of the route files
    "errorDetails", "parseId", "invalidId", "notFound", "UPLOAD_FIELDS", "NextResponse",
    "isMultipart", "isUploadedFile", "parseFormValue", "removeFile", "saveFile",
];

/// An upload field as the handlers see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFieldIr {
    pub name: String,
    /// Folder under the public dir, `<model><field>s`
    pub folder: String,
}

/// Everything the route templates branch on, computed once per model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteIr {
    /// Model name as declared (`BlogPost`)
    pub model_name: String,
    /// Lowercased name used for the URL segment and folders (`blogpost`)
    pub segment: String,
    /// Prisma client delegate (`blogPost`)
    pub delegate: String,
    /// Local variable holding one record
    pub record_var: String,
    /// Local variable holding the record list
    pub collection_var: String,
    /// Singular noun in log and error messages
    pub label: String,
    /// Plural noun in log and error messages
    pub plural_label: String,
    pub relation_fields: Vec<String>,
    pub upload_fields: Vec<UploadFieldIr>,
    pub has_relation_fields: bool,
    pub has_upload_fields: bool,
    pub typescript: bool,
}

/// Prisma's client delegate for a model: the name with its first letter lowercased.
pub fn delegate_name(model_name: &str) -> String {
    let mut chars = model_name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn sanitize_js_identifier(name: &str) -> String {
    if RESERVED_IDENTIFIERS.contains(&name) {
        format!("{name}Record")
    } else {
        name.to_string()
    }
}

impl RouteIr {
    pub fn new(model: &Model, classified: &ClassifiedFields<'_>, settings: &GeneratorSettings) -> Self {
        let segment = model.name.to_lowercase();
        let delegate = delegate_name(&model.name);
        let record_var = sanitize_js_identifier(&delegate);
        let collection_var = match format!("{record_var}s") {
            plural if RESERVED_IDENTIFIERS.contains(&plural.as_str()) => {
                format!("{delegate}Records")
            }
            plural => plural,
        };
        RouteIr {
            model_name: model.name.clone(),
            collection_var,
            record_var,
            label: segment.clone(),
            plural_label: format!("{segment}s"),
            relation_fields: classified
                .relation_fields
                .iter()
                .map(|f| f.name.clone())
                .collect(),
            upload_fields: classified
                .upload_fields
                .iter()
                .map(|f| UploadFieldIr {
                    name: f.name.clone(),
                    folder: format!("{segment}{}s", f.name),
                })
                .collect(),
            has_relation_fields: classified.has_relation_fields(),
            has_upload_fields: classified.has_upload_fields(),
            typescript: settings.language == OutputLanguage::TypeScript,
            segment,
            delegate,
        }
    }
}

/// Collection route: `GET` (list) and `POST` (create).
#[derive(Template)]
#[template(path = "collection_route.txt", escape = "none")]
pub struct CollectionRouteTemplate<'a> {
    pub ir: &'a RouteIr,
    pub client_import: String,
    pub uploads_import: String,
}

/// Item route: `GET`, `PUT` and `DELETE` by numeric id.
#[derive(Template)]
#[template(path = "item_route.txt", escape = "none")]
pub struct ItemRouteTemplate<'a> {
    pub ir: &'a RouteIr,
    pub client_import: String,
    pub uploads_import: String,
}

/// Shared Prisma client cached on `globalThis`.
#[derive(Template)]
#[template(path = "prisma_client.txt", escape = "none")]
pub struct PrismaClientTemplate {
    pub typescript: bool,
}

/// File helpers shared by every upload-capable route.
#[derive(Template)]
#[template(path = "uploads.txt", escape = "none")]
pub struct UploadHelpersTemplate {
    pub typescript: bool,
    pub public_dir: String,
}

/// Import specifier for a shared module, seen from a route `depth` folders below the output root.
fn lib_import(depth: usize, module: &str) -> String {
    format!("{}{LIB_DIR}/{module}", "../".repeat(depth))
}

fn client_import(settings: &GeneratorSettings, depth: usize) -> String {
    settings
        .client_module
        .clone()
        .unwrap_or_else(|| lib_import(depth, "prisma"))
}

/// Render `<model>/route.(ts|js)`.
pub fn render_collection_route(ir: &RouteIr, settings: &GeneratorSettings) -> anyhow::Result<String> {
    Ok(CollectionRouteTemplate {
        ir,
        client_import: client_import(settings, 1),
        uploads_import: lib_import(1, "uploads"),
    }
    .render()?)
}

/// Render `<model>/[id]/route.(ts|js)`.
pub fn render_item_route(ir: &RouteIr, settings: &GeneratorSettings) -> anyhow::Result<String> {
    Ok(ItemRouteTemplate {
        ir,
        client_import: client_import(settings, 2),
        uploads_import: lib_import(2, "uploads"),
    }
    .render()?)
}

pub fn render_prisma_client(settings: &GeneratorSettings) -> anyhow::Result<String> {
    Ok(PrismaClientTemplate {
        typescript: settings.language == OutputLanguage::TypeScript,
    }
    .render()?)
}

pub fn render_upload_helpers(settings: &GeneratorSettings) -> anyhow::Result<String> {
    Ok(UploadHelpersTemplate {
        typescript: settings.language == OutputLanguage::TypeScript,
        public_dir: settings.public_dir.clone(),
    }
    .render()?)
}
