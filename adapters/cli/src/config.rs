use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use maze_forge_core::DEFAULT_MAZE_SIZE;
use maze_forge_grid::CellGrid;
use maze_forge_system_instances::DEFAULT_CELL_SPACING;
use serde::Deserialize;

/// Settings that drive a command-line run.
///
/// Values come from an optional TOML file and are then overridden by flags.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct MazeConfig {
    /// Side length of the square grid; odd and within 3..=4095.
    pub(crate) size: u32,
    /// Seed for the random source. A fresh seed is drawn from entropy when absent.
    pub(crate) seed: Option<u64>,
    /// World units between adjacent wall positions.
    pub(crate) cell_spacing: f32,
    /// Number of back-to-back regenerations to run.
    pub(crate) regenerations: u32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_MAZE_SIZE,
            seed: None,
            cell_spacing: DEFAULT_CELL_SPACING,
            regenerations: 1,
        }
    }
}

impl MazeConfig {
    /// Reads a configuration file from disk.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read maze config at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid maze config at {}", path.display()))
    }

    /// Parses a configuration from TOML text; missing keys take defaults.
    pub(crate) fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse maze config toml contents")
    }

    /// Rejects settings the maze crates cannot honour.
    pub(crate) fn validate(&self) -> Result<()> {
        CellGrid::validate_size(self.size)?;
        if !self.cell_spacing.is_finite() || self.cell_spacing <= 0.0 {
            bail!(
                "cell spacing must be a positive number, got {}",
                self.cell_spacing
            );
        }
        if self.regenerations == 0 {
            bail!("at least one regeneration is required");
        }
        Ok(())
    }
}
