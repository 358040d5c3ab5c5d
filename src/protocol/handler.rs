use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::jsonrpc::{Request, Response, INVALID_PARAMS, METHOD_NOT_FOUND};
use crate::config::{ConfigValue, GeneratorSettings};
use crate::dmmf::datamodel_from_value;
use crate::generator::generate;

/// Name the Prisma CLI prints next to the generator
pub const PRETTY_NAME: &str = "Next.js CRUD API";
/// Output path used when the generator block has no `output`, relative to the schema
pub const DEFAULT_OUTPUT: &str = "../api";

/// A value that may come from an environment variable (`output = env("API_DIR")`).
/// Prisma resolves it before calling the generator.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvValue {
    #[serde(default)]
    pub from_env_var: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// The `generator` block as sent by the Prisma CLI
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub output: Option<EnvValue>,
    #[serde(default)]
    pub config: BTreeMap<String, ConfigValue>,
}

/// Params of the `generate` call; fields this generator does not use are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOptions {
    pub generator: GeneratorConfig,
    pub dmmf: Value,
    #[serde(default)]
    pub schema_path: Option<String>,
}

impl GeneratorOptions {
    /// Absolute output directory. Relative paths are taken relative to the schema file.
    pub fn output_dir(&self) -> anyhow::Result<PathBuf> {
        let output = self
            .generator
            .output
            .as_ref()
            .and_then(|o| o.value.as_deref())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!("Generator '{}' has no output directory", self.generator.name)
            })?;
        let path = PathBuf::from(output);
        if path.is_absolute() {
            return Ok(path);
        }
        let base = self
            .schema_path
            .as_deref()
            .and_then(|p| Path::new(p).parent())
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(base.join(path))
    }
}

/// Reply to `getManifest`
pub fn manifest() -> Value {
    json!({
        "manifest": {
            "prettyName": PRETTY_NAME,
            "defaultOutput": DEFAULT_OUTPUT,
            "version": env!("CARGO_PKG_VERSION"),
            "requiresGenerators": ["prisma-client-js"],
        }
    })
}

fn run_generate(options: &GeneratorOptions) -> anyhow::Result<()> {
    let output_dir = options.output_dir()?;
    let settings = GeneratorSettings::from_map(&options.generator.config)
        .with_context(|| format!("Invalid config for generator '{}'", options.generator.name))?;
    let datamodel = datamodel_from_value(options.dmmf.clone())?;
    let report = generate(&datamodel, &settings, &output_dir, false)?;
    info!(
        output = %report.output_dir.display(),
        models = report.models,
        files = report.files.len(),
        "generation complete"
    );
    Ok(())
}

/// Answer one request.
pub fn handle_request(request: &Request) -> Response {
    debug!(method = %request.method, id = %request.id, "request");
    match request.method.as_str() {
        "getManifest" => Response::success(request.id.clone(), manifest()),
        "generate" => {
            let options: GeneratorOptions = match request.params_as() {
                Ok(options) => options,
                Err(e) => {
                    return Response::error(
                        request.id.clone(),
                        INVALID_PARAMS,
                        format!("Invalid generate params: {e}"),
                    )
                }
            };
            match run_generate(&options) {
                Ok(()) => Response::success(request.id.clone(), Value::Null),
                Err(err) => {
                    warn!(error = %format!("{err:#}"), "generation failed");
                    Response::from_error(request.id.clone(), &err)
                }
            }
        }
        other => Response::error(
            request.id.clone(),
            METHOD_NOT_FOUND,
            format!("Method not found: {other}"),
        ),
    }
}

/// Serve requests from `input` until EOF, writing one response line per request to `output`.
///
/// Lines that are not valid requests are logged and skipped.
pub fn serve<R: BufRead, W: Write>(input: R, mut output: W) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line.context("Failed to read request")?;
        if line.trim().is_empty() {
            continue;
        }
        let request: Request = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "skipping malformed request line");
                continue;
            }
        };
        let response = handle_request(&request);
        serde_json::to_writer(&mut output, &response).context("Failed to encode response")?;
        output.write_all(b"\n")?;
        output.flush()?;
    }
    debug!("input closed");
    Ok(())
}

/// Run as a Prisma generator: requests on stdin, responses on stderr.
pub fn serve_stdio() -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let stderr = std::io::stderr();
    serve(stdin.lock(), stderr.lock())
}
