//! Positions API DTOs

use serde::Deserialize;

/// Query string of `GET /positions/`. Both fields are free-form timestamps.
#[derive(Deserialize, Debug, Default)]
pub struct PositionQueryDto {
    pub st: Option<String>,
    pub et: Option<String>,
}

impl PositionQueryDto {
    /// Builds the DTO from raw query pairs. A repeated key keeps its first value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut dto = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "st" => &mut dto.st,
                "et" => &mut dto.et,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        dto
    }
}
