use chrono::NaiveDate;
use thiserror::Error;

/// Date format of the account creation field. Trailing time-of-day text is ignored.
pub const ACCOUNT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected at least {expected} tab-separated fields, found {found}")]
    MissingField { expected: usize, found: usize },

    #[error("character key '{0}' has no account separator")]
    MissingAccountSeparator(String),
}

/// Split a record line and check it has at least `expected` fields.
fn fields(line: &str, expected: usize) -> Result<Vec<&str>, RecordError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < expected {
        return Err(RecordError::MissingField {
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

/// A line of the account ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountRecord<'a> {
    /// Account id (field 0)
    pub id: &'a str,
    /// Creation date, `yyyy-mm-dd` (field 3)
    pub creation_date: &'a str,
    /// Account type (field 4)
    pub account_type: &'a str,
}

impl<'a> AccountRecord<'a> {
    const ID: usize = 0;
    const CREATION_DATE: usize = 3;
    const ACCOUNT_TYPE: usize = 4;

    pub fn parse(line: &'a str) -> Result<Self, RecordError> {
        let fields = fields(line, Self::ACCOUNT_TYPE + 1)?;
        Ok(Self {
            id: fields[Self::ID],
            creation_date: fields[Self::CREATION_DATE],
            account_type: fields[Self::ACCOUNT_TYPE],
        })
    }

    /// Server accounts are exempt from purging
    pub fn is_server(&self, server_account_type: &str) -> bool {
        self.account_type == server_account_type
    }

    pub fn created_on(&self) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_and_remainder(self.creation_date, ACCOUNT_DATE_FORMAT)
            .map(|(date, _rest)| date)
    }
}

/// A line of the character ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterRecord<'a> {
    /// Character id (field 0)
    pub id: &'a str,
    /// Owning account id, the part of field 1 before the first comma
    pub account_id: &'a str,
    /// Remainder of field 1 after the first comma
    pub slot: &'a str,
}

impl<'a> CharacterRecord<'a> {
    const ID: usize = 0;
    const KEY: usize = 1;

    pub fn parse(line: &'a str) -> Result<Self, RecordError> {
        let fields = fields(line, Self::KEY + 1)?;
        let key = fields[Self::KEY];
        let (account_id, slot) = key
            .split_once(',')
            .ok_or_else(|| RecordError::MissingAccountSeparator(key.to_string()))?;

        Ok(Self {
            id: fields[Self::ID],
            account_id,
            slot,
        })
    }
}
