use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::border::Border;
use crate::highlight::ColorPolicy;
use crate::model::OutputFormat;
use crate::prompt::ask_integer;
use crate::Cli;

pub const DEFAULT_CONFIG_FILE: &str = "border-prune.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    directories: Option<Vec<PathBuf>>,
    border: Option<FileBorder>,
    format: Option<OutputFormat>,
    color: Option<ColorPolicy>,
    strict: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct FileBorder {
    center_x: Option<i64>,
    center_z: Option<i64>,
    diameter: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub directories: Vec<PathBuf>,
    pub border: Border,
    pub format: OutputFormat,
    pub color: ColorPolicy,
    pub strict: bool,
}

impl EffectiveConfig {
    /// Merges the config file with CLI flags, prompting on stderr for any
    /// border value neither of them provides.
    ///
    /// Without `--config`, `border-prune.toml` is looked up in the world
    /// directory first, then in the working directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let stdin = std::io::stdin();
        Self::load_with(cli, &mut stdin.lock(), &mut std::io::stderr())
    }

    pub fn load_with<R: BufRead, W: Write>(cli: &Cli, input: &mut R, out: &mut W) -> Result<Self> {
        let path = cli.config.clone().or_else(|| {
            [cli.world().join(DEFAULT_CONFIG_FILE), PathBuf::from(DEFAULT_CONFIG_FILE)]
                .into_iter()
                .find(|p| p.exists())
        });

        let fcfg = if let Some(path) = path {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed reading config {}", path.display()))?;
            toml::from_str::<FileConfig>(&raw)
                .with_context(|| format!("failed parsing config {}", path.display()))?
        } else {
            FileConfig::default()
        };

        let mut directories = fcfg.directories.unwrap_or_else(default_directories);
        if !cli.dir.is_empty() {
            directories = cli.dir.clone();
        }

        let fb = fcfg.border.unwrap_or_default();
        let center_x = match cli.center_x.or(fb.center_x) {
            Some(v) => v,
            None => ask_integer(input, out, "World border center X")?,
        };
        let center_z = match cli.center_z.or(fb.center_z) {
            Some(v) => v,
            None => ask_integer(input, out, "World border center Z")?,
        };
        let diameter = match cli.diameter.or(fb.diameter) {
            Some(v) => v,
            None => ask_integer(input, out, "World border diameter")?,
        };
        let border = Border::new(center_x, center_z, diameter);

        let strict = cli.strict || fcfg.strict.unwrap_or(false);
        if strict {
            border.validate_strict()?;
        }

        Ok(Self {
            directories,
            border,
            format: cli.format.or(fcfg.format).unwrap_or(OutputFormat::Human),
            color: cli.color.or(fcfg.color).unwrap_or(ColorPolicy::Auto),
            strict,
        })
    }
}

/// Per-dimension data categories that hold tile files.
pub fn default_directories() -> Vec<PathBuf> {
    ["region", "entities", "poi"].into_iter().map(PathBuf::from).collect()
}
