mod artifacts;
mod generate;

pub use artifacts::{render_artifacts, Artifact, ArtifactKind};
pub use generate::{generate, write_artifacts, GenerationReport};
