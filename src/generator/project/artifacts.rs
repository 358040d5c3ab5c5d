use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use anyhow::Context;

use crate::config::GeneratorSettings;
use crate::dmmf::Datamodel;
use crate::generator::docs::{model_doc, render_docs};
use crate::generator::fields::classify;
use crate::generator::payload::ExamplePayload;
use crate::generator::postman::postman_collection;
use crate::generator::routes::{
    render_collection_route, render_item_route, render_prisma_client, render_upload_helpers,
    RouteIr, LIB_DIR,
};
use crate::placeholder::Sample;

/// What a generated file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    CollectionRoute,
    ItemRoute,
    PostmanCollection,
    HtmlDocs,
    PrismaClient,
    UploadHelpers,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArtifactKind::CollectionRoute => "collection route",
            ArtifactKind::ItemRoute => "item route",
            ArtifactKind::PostmanCollection => "postman collection",
            ArtifactKind::HtmlDocs => "html docs",
            ArtifactKind::PrismaClient => "prisma client",
            ArtifactKind::UploadHelpers => "upload helpers",
        };
        f.write_str(label)
    }
}

/// A rendered file, keyed by its path relative to the output directory.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub kind: ArtifactKind,
    /// Owning model; `None` for shared files
    pub model: Option<String>,
    pub contents: String,
}

/// Render every file of one generation run, in write order.
///
/// Per model: `<model>/route.<ext>`, `<model>/[id]/route.<ext>` and, with docs
/// enabled, `<model>/postman-collection.json`. Shared files follow: `docs.html`,
/// `_lib/prisma.<ext>` when no client module is configured and
/// `_lib/uploads.<ext>` when any model stores uploads.
pub fn render_artifacts(
    datamodel: &Datamodel,
    settings: &GeneratorSettings,
) -> anyhow::Result<Vec<Artifact>> {
    let ext = settings.language.extension();
    let mut artifacts = Vec::new();
    let mut model_docs = Vec::new();
    let mut segments: HashMap<String, &str> = HashMap::new();
    let mut any_uploads = false;

    for model in &datamodel.models {
        let classified = classify(model, &settings.uploads);
        let ir = RouteIr::new(model, &classified, settings);
        if let Some(other) = segments.insert(ir.segment.clone(), &model.name) {
            anyhow::bail!(
                "Models '{other}' and '{}' both map to the route folder '{}'",
                model.name,
                ir.segment
            );
        }
        any_uploads |= ir.has_upload_fields;

        let model_dir = PathBuf::from(&ir.segment);
        artifacts.push(Artifact {
            path: model_dir.join(format!("route.{ext}")),
            kind: ArtifactKind::CollectionRoute,
            model: Some(model.name.clone()),
            contents: render_collection_route(&ir, settings)
                .with_context(|| format!("Failed to render collection route for {}", model.name))?,
        });
        artifacts.push(Artifact {
            path: model_dir.join("[id]").join(format!("route.{ext}")),
            kind: ArtifactKind::ItemRoute,
            model: Some(model.name.clone()),
            contents: render_item_route(&ir, settings)
                .with_context(|| format!("Failed to render item route for {}", model.name))?,
        });

        if settings.docs {
            let create = ExamplePayload::build(model, &classified, datamodel, Sample::Create);
            let update = ExamplePayload::build(model, &classified, datamodel, Sample::Update);
            let collection = postman_collection(&ir, &create, &update, settings);
            artifacts.push(Artifact {
                path: model_dir.join("postman-collection.json"),
                kind: ArtifactKind::PostmanCollection,
                model: Some(model.name.clone()),
                contents: serde_json::to_string_pretty(&collection)?,
            });
            model_docs.push(model_doc(
                model,
                &classified,
                &ir,
                &create,
                &update,
                settings,
            ));
        }
    }

    if settings.docs {
        artifacts.push(Artifact {
            path: PathBuf::from("docs.html"),
            kind: ArtifactKind::HtmlDocs,
            model: None,
            contents: render_docs(&model_docs, settings).context("Failed to render docs.html")?,
        });
    }
    if settings.client_module.is_none() && !datamodel.models.is_empty() {
        artifacts.push(Artifact {
            path: PathBuf::from(LIB_DIR).join(format!("prisma.{ext}")),
            kind: ArtifactKind::PrismaClient,
            model: None,
            contents: render_prisma_client(settings)?,
        });
    }
    if any_uploads {
        artifacts.push(Artifact {
            path: PathBuf::from(LIB_DIR).join(format!("uploads.{ext}")),
            kind: ArtifactKind::UploadHelpers,
            model: None,
            contents: render_upload_helpers(settings)?,
        });
    }

    Ok(artifacts)
}
