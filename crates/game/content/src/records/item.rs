use game_core::{Item, StatKind};

use super::Record;
use crate::error::RecordError;

/// Reads an item record (`Name`, `Type`, `Bonus`, `Uses`, `Description`).
pub fn parse_item(text: &str) -> Result<Item, RecordError> {
    let record = Record::parse(text);
    let name = record.text("Name")?;
    let stat_text = record.text("Type")?;
    let stat: StatKind = stat_text.parse().map_err(|_| RecordError::UnknownStat {
        value: stat_text.to_owned(),
    })?;

    let item = Item::new(name, stat, record.number("Bonus")?, record.number("Uses")?)
        .with_description(record.get("Description").unwrap_or_default());
    Ok(item)
}
