use game_core::{Field, TerrainKind};

use super::parse_number;
use crate::error::RecordError;

/// Reads a battlefield: a `width height` line followed by rows of terrain
/// symbols, either whitespace separated or contiguous.
pub fn parse_battlefield(text: &str) -> Result<Field, RecordError> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    let header = lines
        .next()
        .ok_or_else(|| RecordError::missing("dimensions"))?;
    let mut dimensions = header.split_whitespace();
    let width: u32 = parse_number(
        "width",
        dimensions.next().ok_or_else(|| RecordError::missing("width"))?,
    )?;
    let height: u32 = parse_number(
        "height",
        dimensions.next().ok_or_else(|| RecordError::missing("height"))?,
    )?;

    let terrain = lines
        .flat_map(str::chars)
        .filter(|symbol| !symbol.is_whitespace())
        .map(|symbol| TerrainKind::from_symbol(symbol).ok_or(RecordError::UnknownTerrain { symbol }))
        .collect::<Result<Vec<_>, _>>()?;

    let expected = width as usize * height as usize;
    if terrain.len() != expected {
        return Err(RecordError::DimensionMismatch {
            expected,
            actual: terrain.len(),
        });
    }
    Ok(Field::new(width, height, terrain)?)
}
