use game_core::{Location, SideId};

use super::parse_number;
use crate::error::RecordError;

/// One unit placed by a level roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub side: SideId,
    /// Unit record name, without the `*` marker.
    pub unit: String,
    /// The record lives in the level's own unit directory.
    pub local: bool,
    pub location: Location,
}

impl Placement {
    /// Name of the unit record relative to the units directory.
    pub fn record_name(&self, level: &str) -> String {
        if self.local {
            format!("{level}/{}", self.unit)
        } else {
            self.unit.clone()
        }
    }
}

/// A level: the battlefield to fight on and who stands where.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelRecord {
    pub battlefield: String,
    pub placements: Vec<Placement>,
}

impl LevelRecord {
    /// Number of sides, counting any side id skipped by the roster.
    pub fn side_count(&self) -> usize {
        self.placements
            .iter()
            .map(|placement| placement.side.index() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Reads a level roster: a `Battlefield: <name>` line, then one
/// `side unit x y` line per unit.
pub fn parse_level(text: &str) -> Result<LevelRecord, RecordError> {
    let mut battlefield = None;
    let mut placements = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((label, value)) = line.split_once(':') {
            if label.trim().eq_ignore_ascii_case("Battlefield") {
                battlefield = Some(value.trim().to_owned());
                continue;
            }
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [side, unit, x, y] = tokens[..] else {
            return Err(RecordError::MalformedLine {
                line: index + 1,
                content: line.to_owned(),
            });
        };
        let (local, unit) = match unit.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, unit),
        };
        placements.push(Placement {
            side: SideId(parse_number("side", side)?),
            unit: unit.to_owned(),
            local,
            location: Location::new(parse_number("x", x)?, parse_number("y", y)?),
        });
    }

    Ok(LevelRecord {
        battlefield: battlefield.ok_or_else(|| RecordError::missing("Battlefield"))?,
        placements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_roster_lines() {
        let level = parse_level("Battlefield: plains\n0 Seth 1 1\n\n1 *Brigand_1 4 2\n").unwrap();
        assert_eq!(level.battlefield, "plains");
        assert_eq!(level.side_count(), 2);
        assert_eq!(level.placements[0].record_name("intro"), "Seth");

        let brigand = &level.placements[1];
        assert!(brigand.local);
        assert_eq!(brigand.location, Location::new(4, 2));
        assert_eq!(brigand.record_name("intro"), "intro/Brigand_1");
    }

    #[test]
    fn rejects_short_lines_and_missing_battlefield() {
        assert_eq!(
            parse_level("Battlefield: plains\n0 Seth 1\n"),
            Err(RecordError::MalformedLine {
                line: 2,
                content: "0 Seth 1".into()
            })
        );
        assert_eq!(
            parse_level("0 Seth 1 1"),
            Err(RecordError::MissingField {
                field: "Battlefield".into()
            })
        );
    }
}
