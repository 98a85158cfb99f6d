use game_core::{RangeSet, Weapon, WeaponKind};

use super::{Record, parse_number};
use crate::error::RecordError;

/// Reads a weapon record. The weapon takes its name from the record's file.
///
/// Attack distances come from `Range:` lines and from bare numbers, so both
/// `Range: 1` / `Range: 2` and a trailing `1 2` line are accepted.
pub fn parse_weapon(name: &str, text: &str) -> Result<Weapon, RecordError> {
    let record = Record::parse(text);
    let level = record.text("Level")?;
    let kind_text = record.text("Kind")?;
    let kind: WeaponKind = kind_text
        .parse()
        .map_err(|_| RecordError::UnknownWeaponKind {
            value: kind_text.to_owned(),
        })?;
    let might = record.number("Might")?;
    let weight = record.number("Weight")?;

    let mut range = RangeSet::new();
    let tokens = record
        .all("Range")
        .flat_map(str::split_whitespace)
        .chain(record.bare().iter().map(String::as_str));
    for token in tokens {
        range.insert(parse_number("Range", token)?);
    }
    if range.is_empty() {
        return Err(RecordError::missing("Range"));
    }

    Ok(Weapon::new(name, kind, might, weight, range).with_level(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_labelled_and_bare_ranges() {
        let bow = parse_weapon(
            "Longbow",
            "Level: Iron\nKind: bow\nMight: 5\nWeight: 9\nRange: 2\n3\n",
        )
        .unwrap();
        assert_eq!(bow.name, "Longbow");
        assert_eq!(bow.level, "Iron");
        assert_eq!(bow.kind, WeaponKind::Bow);
        assert_eq!(bow.range, RangeSet::from([2, 3]));
    }

    #[test]
    fn range_is_required() {
        assert_eq!(
            parse_weapon("Stick", "Level: Wood\nKind: Sword\nMight: 1\nWeight: 1\n"),
            Err(RecordError::MissingField {
                field: "Range".into()
            })
        );
        assert!(matches!(
            parse_weapon("Stick", "Level: Wood\nKind: Club\nMight: 1\nWeight: 1\nRange: 1"),
            Err(RecordError::UnknownWeaponKind { .. })
        ));
    }
}
