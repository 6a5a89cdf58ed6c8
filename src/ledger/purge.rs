use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, error, info, warn};

use super::line::{LineKind, RawLine, classify, read_lines, write_line};
use super::record::{AccountRecord, CharacterRecord};
use super::report::{AccountStats, CharacterStats, PurgeReport};
use crate::error::ToolError;

/// File names and markers used by a purge run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeOptions {
    /// Account ledger file name inside the purge folder
    pub account_file: String,
    /// Character ledger file name inside the purge folder
    pub character_file: String,
    /// Appended to each ledger path to name its rewritten copy
    pub output_suffix: String,
    /// Account type value that marks a server account
    pub server_account_type: String,
}

impl Default for PurgeOptions {
    fn default() -> Self {
        Self {
            account_file: "account.txt".to_string(),
            character_file: "athena.txt".to_string(),
            output_suffix: ".new".to_string(),
            server_account_type: "S".to_string(),
        }
    }
}

/// Parse the purge cutoff, `dd/mm/yy` (a four digit year is accepted too).
pub fn parse_cutoff(input: &str) -> Result<NaiveDate, ToolError> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%d/%m/%y")
        .or_else(|_e| NaiveDate::parse_from_str(input, "%d/%m/%Y"))
        .map_err(|source| ToolError::InvalidCutoff {
            input: input.to_string(),
            source,
        })
}

/// Result of the account pass: counters plus the ids that survived it
#[derive(Debug, Clone, Default)]
pub struct AccountPass {
    pub stats: AccountStats,
    pub active: HashSet<String>,
}

/// Filter the account ledger, keeping server accounts and accounts created
/// strictly after `cutoff`.
///
/// Server account lines are copied but neither counted as processed nor
/// added to the active set.
pub fn purge_accounts<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    cutoff: NaiveDate,
    server_account_type: &str,
) -> Result<AccountPass> {
    let mut pass = AccountPass::default();

    for line in read_lines(input) {
        let line = line.context("failed to read account ledger")?;
        let text = line.text();

        let keep = match classify(&text) {
            LineKind::Metadata => true,
            LineKind::Record => {
                let record = AccountRecord::parse(&text).map_err(|source| {
                    ToolError::MalformedRecord {
                        line: line.number,
                        source,
                    }
                })?;

                if record.is_server(server_account_type) {
                    pass.stats.servers += 1;
                    true
                } else {
                    pass.stats.processed += 1;
                    match record.created_on() {
                        Ok(created) if created > cutoff => {
                            pass.active.insert(record.id.to_string());
                            pass.stats.retained += 1;
                            true
                        }
                        Ok(_) => false,
                        Err(e) => {
                            warn!(
                                "Wrong date format in account ledger ({}: {}): {}",
                                line.number, text, e
                            );
                            pass.stats.malformed_dates += 1;
                            false
                        }
                    }
                }
            }
        };

        if keep {
            copy_line(output, &line, &mut pass.stats.write_errors);
        }
    }

    debug!(
        "Account pass: {} processed, {} retained, {} server accounts",
        pass.stats.processed, pass.stats.retained, pass.stats.servers
    );

    Ok(pass)
}

/// Filter the character ledger, keeping characters owned by an active account.
pub fn purge_characters<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    active: &HashSet<String>,
) -> Result<CharacterStats> {
    let mut stats = CharacterStats::default();

    for line in read_lines(input) {
        let line = line.context("failed to read character ledger")?;
        let text = line.text();

        let keep = match classify(&text) {
            LineKind::Metadata => true,
            LineKind::Record => {
                let record = CharacterRecord::parse(&text).map_err(|source| {
                    ToolError::MalformedRecord {
                        line: line.number,
                        source,
                    }
                })?;

                stats.processed += 1;
                if active.contains(record.account_id) {
                    true
                } else {
                    stats.deleted += 1;
                    false
                }
            }
        };

        if keep {
            copy_line(output, &line, &mut stats.write_errors);
        }
    }

    debug!(
        "Character pass: {} processed, {} deleted",
        stats.processed, stats.deleted
    );

    Ok(stats)
}

/// Purge the account and character ledgers found in `folder`.
///
/// Each ledger is rewritten next to the original with `output_suffix`
/// appended to its name; the originals are left in place.
pub fn purge_folder(
    folder: &Path,
    cutoff: NaiveDate,
    options: &PurgeOptions,
) -> Result<PurgeReport> {
    let account_path = folder.join(&options.account_file);
    let character_path = folder.join(&options.character_file);

    info!("Purging accounts created on or before {}", cutoff);

    let input = open_ledger(&account_path)?;
    let output_path = suffixed(&account_path, &options.output_suffix);
    let mut output = create_ledger(&output_path)?;
    let mut accounts = purge_accounts(input, &mut output, cutoff, &options.server_account_type)
        .with_context(|| format!("unable to process {}", account_path.display()))?;
    finish_ledger(output, &output_path, &mut accounts.stats.write_errors);
    info!("Wrote {}", output_path.display());

    let input = open_ledger(&character_path)?;
    let output_path = suffixed(&character_path, &options.output_suffix);
    let mut output = create_ledger(&output_path)?;
    let mut characters = purge_characters(input, &mut output, &accounts.active)
        .with_context(|| format!("unable to process {}", character_path.display()))?;
    finish_ledger(output, &output_path, &mut characters.write_errors);
    info!("Wrote {}", output_path.display());

    Ok(PurgeReport {
        cutoff,
        accounts: accounts.stats,
        characters,
    })
}

/// Write failures are logged and counted, the pass carries on.
fn copy_line<W: Write>(output: &mut W, line: &RawLine, write_errors: &mut usize) {
    if let Err(e) = write_line(output, line) {
        error!("Unable to write line {}: {}", line.number, e);
        *write_errors += 1;
    }
}

fn open_ledger(path: &Path) -> Result<BufReader<File>, ToolError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ToolError::InputNotFound(absolute(path)),
            _ => ToolError::LedgerRead {
                path: path.to_path_buf(),
                source,
            },
        })
}

fn create_ledger(path: &Path) -> Result<BufWriter<File>, ToolError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| ToolError::LedgerCreate {
            path: path.to_path_buf(),
            source,
        })
}

fn finish_ledger(mut output: BufWriter<File>, path: &Path, write_errors: &mut usize) {
    if let Err(e) = output.flush() {
        error!("Unable to write file {}: {}", path.display(), e);
        *write_errors += 1;
    }
}

fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_e| path.to_path_buf())
}
