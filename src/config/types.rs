use serde::{Deserialize, Serialize};

use crate::cli::CompressionLevel;
use crate::ledger::PurgeOptions;
use crate::sprite::SheetLayout;

/// PNG compression level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

impl CompressConfig {
    pub fn level(&self) -> Result<CompressionLevel, String> {
        match self {
            CompressConfig::Level(n) => n.to_string().parse(),
            CompressConfig::Max(s) => s.parse(),
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Ledger purge settings
    pub purge: PurgeConfig,
    /// Sprite sheet settings
    pub sheet: SheetConfig,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            version: 1,
            purge: PurgeConfig::default(),
            sheet: SheetConfig::default(),
        }
    }
}

/// Ledger purge settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurgeConfig {
    /// Account ledger file name
    pub account_file: String,
    /// Character ledger file name
    pub character_file: String,
    /// Suffix appended to each rewritten ledger
    pub output_suffix: String,
    /// Account type value marking server accounts
    pub server_account_type: String,
}

impl Default for PurgeConfig {
    fn default() -> Self {
        let options = PurgeOptions::default();
        Self {
            account_file: options.account_file,
            character_file: options.character_file,
            output_suffix: options.output_suffix,
            server_account_type: options.server_account_type,
        }
    }
}

/// Sprite sheet grid settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Cell width in pixels
    pub cell_width: u32,
    /// Cell height in pixels
    pub cell_height: u32,
    /// Number of directions (source columns)
    pub directions: u32,
    /// Number of animation frames (source rows)
    pub frames: u32,
    /// RGB color treated as transparent
    pub transparent_key: [u8; 3],
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        let layout = SheetLayout::default();
        Self {
            cell_width: layout.cell_width,
            cell_height: layout.cell_height,
            directions: layout.directions,
            frames: layout.frames,
            transparent_key: layout.transparent_key,
            compress: None,
        }
    }
}
