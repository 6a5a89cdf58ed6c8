mod load;
mod types;

pub use types::{CompressConfig, PurgeConfig, SheetConfig, ToolsConfig};
