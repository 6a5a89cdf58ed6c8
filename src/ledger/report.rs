use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;

/// Counters collected by the account pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountStats {
    /// Non-server account records examined
    pub processed: usize,
    /// Accounts created after the cutoff and kept
    pub retained: usize,
    /// Server accounts, always kept and not counted as processed
    pub servers: usize,
    /// Records dropped because their creation date could not be parsed
    pub malformed_dates: usize,
    /// Lines that could not be written to the output ledger
    pub write_errors: usize,
}

impl AccountStats {
    pub fn removed(&self) -> usize {
        self.processed.saturating_sub(self.retained)
    }
}

/// Counters collected by the character pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterStats {
    /// Character records examined
    pub processed: usize,
    /// Characters whose account did not survive the account pass
    pub deleted: usize,
    /// Lines that could not be written to the output ledger
    pub write_errors: usize,
}

impl CharacterStats {
    pub fn retained(&self) -> usize {
        self.processed.saturating_sub(self.deleted)
    }

    pub fn removed(&self) -> usize {
        self.deleted
    }
}

/// Outcome of a complete purge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeReport {
    pub cutoff: NaiveDate,
    pub accounts: AccountStats,
    pub characters: CharacterStats,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport {
    cutoff: NaiveDate,
    accounts: JsonCounts,
    characters: JsonCounts,
    server_accounts: usize,
    malformed_dates: usize,
    write_errors: usize,
}

#[derive(Serialize)]
struct JsonCounts {
    processed: usize,
    retained: usize,
    removed: usize,
}

impl PurgeReport {
    pub fn log_summary(&self) {
        info!(
            "Removed {}/{} accounts.",
            self.accounts.removed(),
            self.accounts.processed
        );
        info!(
            "Removed {}/{} characters.",
            self.characters.removed(),
            self.characters.processed
        );

        if self.accounts.malformed_dates > 0 {
            warn!(
                "{} account(s) dropped because of a malformed creation date",
                self.accounts.malformed_dates
            );
        }

        let write_errors = self.write_errors();
        if write_errors > 0 {
            warn!("{} line(s) could not be written, output may be incomplete", write_errors);
        }
    }

    pub fn write_errors(&self) -> usize {
        self.accounts.write_errors + self.characters.write_errors
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        let report = JsonReport {
            cutoff: self.cutoff,
            accounts: JsonCounts {
                processed: self.accounts.processed,
                retained: self.accounts.retained,
                removed: self.accounts.removed(),
            },
            characters: JsonCounts {
                processed: self.characters.processed,
                retained: self.characters.retained(),
                removed: self.characters.removed(),
            },
            server_accounts: self.accounts.servers,
            malformed_dates: self.accounts.malformed_dates,
            write_errors: self.write_errors(),
        };
        serde_json::to_string_pretty(&report)
    }
}
