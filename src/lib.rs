pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod output;
pub mod sprite;

pub use cli::{CliArgs, Command, CompressionLevel};
pub use config::ToolsConfig;
pub use error::ToolError;
pub use ledger::{PurgeOptions, PurgeReport, purge_folder};
pub use sprite::{Rect, Reorganized, SheetLayout, reorganize};
