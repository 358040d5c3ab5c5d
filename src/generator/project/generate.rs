use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use super::artifacts::{render_artifacts, Artifact};
use crate::config::GeneratorSettings;
use crate::dmmf::Datamodel;
use crate::generator::fields::classify;

/// Outcome of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    /// Every artifact path, relative to `output_dir`, in write order
    pub files: Vec<PathBuf>,
    pub models: usize,
    /// Nothing was written
    pub dry_run: bool,
}

/// Write rendered artifacts below `output_dir`, creating directories as needed.
///
/// Existing files are overwritten; every run regenerates the whole tree.
pub fn write_artifacts(output_dir: &Path, artifacts: &[Artifact]) -> anyhow::Result<()> {
    for artifact in artifacts {
        let path = output_dir.join(&artifact.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &artifact.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), kind = %artifact.kind, "wrote artifact");
    }
    Ok(())
}

/// Generate routes and documentation for every model of `datamodel` into `output_dir`.
///
/// Models are processed in document order. The first render or I/O failure
/// aborts the run; files written before it stay on disk.
pub fn generate(
    datamodel: &Datamodel,
    settings: &GeneratorSettings,
    output_dir: &Path,
    dry_run: bool,
) -> anyhow::Result<GenerationReport> {
    let artifacts = render_artifacts(datamodel, settings)?;

    if !dry_run {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;
        write_artifacts(output_dir, &artifacts)?;
    }

    for model in &datamodel.models {
        let files = artifacts
            .iter()
            .filter(|a| a.model.as_deref() == Some(model.name.as_str()))
            .count();
        let classified = classify(model, &settings.uploads);
        info!(
            model = %model.name,
            files,
            relations = classified.relation_fields.len(),
            uploads = classified.upload_fields.len(),
            dry_run,
            "generated model"
        );
    }

    Ok(GenerationReport {
        output_dir: output_dir.to_path_buf(),
        files: artifacts.into_iter().map(|a| a.path).collect(),
        models: datamodel.models.len(),
        dry_run,
    })
}
