//! Manifest file loading

use std::path::Path;

use anyhow::{Context, Result};
use cf_rest_api_contract::{AppManifest, Manifest};

/// Parse manifest YAML holding either an `applications:` list or a bare app
pub fn parse_manifest(content: &str) -> Result<Manifest> {
    let manifest: Manifest = serde_yaml::from_str(content).context("Invalid manifest YAML")?;
    if !manifest.applications.is_empty() {
        return Ok(manifest);
    }
    let app: AppManifest = serde_yaml::from_str(content).context("Invalid manifest YAML")?;
    Ok(Manifest::single(app))
}

/// Load the app to push from `path`, picking `app_name` when given
pub fn load_manifest(path: &Path, app_name: Option<&str>) -> Result<AppManifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    let manifest = parse_manifest(&content)
        .with_context(|| format!("Failed to load manifest {}", path.display()))?;
    Ok(manifest.select(app_name)?)
}
