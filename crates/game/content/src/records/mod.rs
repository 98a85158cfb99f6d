//! Record formats.
//!
//! All records share one lexical layer, [`Record`]: blank lines are ignored,
//! `Label: value` lines become fields and any other line contributes bare
//! whitespace-separated tokens. Labels match case-insensitively and numbers
//! are read from the first token of a value.

mod battlefield;
mod item;
mod level;
mod unit;
mod weapon;
mod writer;

use std::str::FromStr;

pub use battlefield::parse_battlefield;
pub use item::parse_item;
pub use level::{LevelRecord, Placement, parse_level};
pub use unit::{ItemRef, UnitRecord, UnitSheet, display_name, parse_unit};
pub use weapon::parse_weapon;
pub use writer::{write_battlefield, write_level, write_unit};

use crate::error::RecordError;

/// Placeholder name for an empty weapon or item slot.
pub const DUMMY: &str = "DUMMY";

pub(crate) fn is_dummy(name: &str) -> bool {
    name.eq_ignore_ascii_case(DUMMY)
}

/// `Label: value` fields and bare tokens of one record, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
    bare: Vec<String>,
}

impl Record {
    pub fn parse(text: &str) -> Self {
        let mut record = Self::default();
        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            match line.split_once(':') {
                Some((label, value)) => record
                    .fields
                    .push((label.trim().to_owned(), value.trim().to_owned())),
                None => record
                    .bare
                    .extend(line.split_whitespace().map(str::to_owned)),
            }
        }
        record
    }

    /// First value recorded under `label`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.all(label).next()
    }

    /// Every value recorded under `label`, in file order.
    pub fn all<'a, 'b>(&'a self, label: &'b str) -> impl Iterator<Item = &'a str> + use<'a, 'b> {
        self.fields
            .iter()
            .filter(move |(name, _)| name.eq_ignore_ascii_case(label))
            .map(|(_, value)| value.as_str())
    }

    pub fn text(&self, label: &str) -> Result<&str, RecordError> {
        self.get(label).ok_or_else(|| RecordError::missing(label))
    }

    pub fn number<T: FromStr>(&self, label: &str) -> Result<T, RecordError> {
        parse_number(label, self.text(label)?)
    }

    /// Tokens from lines without a label.
    pub fn bare(&self) -> &[String] {
        &self.bare
    }
}

/// Parses the first whitespace-separated token of `value`.
pub(crate) fn parse_number<T: FromStr>(field: &str, value: &str) -> Result<T, RecordError> {
    let token = value
        .split_whitespace()
        .next()
        .ok_or_else(|| RecordError::number(field, value))?;
    token.parse().map_err(|_| RecordError::number(field, value))
}
