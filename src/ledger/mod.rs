mod line;
mod purge;
mod record;
mod report;

pub use line::{LineKind, RawLine, classify, read_lines, write_line};
pub use purge::{
    AccountPass, PurgeOptions, parse_cutoff, purge_accounts, purge_characters, purge_folder,
};
pub use record::{AccountRecord, CharacterRecord, RecordError};
pub use report::{AccountStats, CharacterStats, PurgeReport};
