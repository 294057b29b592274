#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use garden_defence_core::{CellCoord, PlantKind, PlantView};
use serde::{Deserialize, Serialize};

const SNAPSHOT_DOMAIN: &str = "garden";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub(crate) const SNAPSHOT_HEADER: &str = "garden:v1";
/// Delimiter used to separate the prefix, lawn dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Snapshot of the plants rooted in the lawn together with its dimensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct GardenLayoutSnapshot {
    /// Number of lawn columns.
    pub columns: u32,
    /// Number of lawn rows.
    pub rows: u32,
    /// Plants composing the layout captured by the snapshot.
    pub plants: Vec<GardenLayoutPlant>,
}

impl GardenLayoutSnapshot {
    /// Captures the plants of a running game.
    pub(crate) fn capture(columns: u32, rows: u32, plants: &PlantView) -> Self {
        Self {
            columns,
            rows,
            plants: plants
                .iter()
                .map(|plant| GardenLayoutPlant {
                    kind: plant.kind,
                    cell: plant.cell,
                })
                .collect(),
        }
    }

    /// Encodes the snapshot into a single-line string suitable for clipboard transfer.
    pub(crate) fn encode(&self) -> Result<String, LayoutTransferError> {
        let payload = SerializableSnapshot {
            plants: self.plants.clone(),
        };
        let json = serde_json::to_vec(&payload).map_err(LayoutTransferError::InvalidPayload)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!(
            "{SNAPSHOT_HEADER}:{}x{}:{encoded}",
            self.columns, self.rows
        ))
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, LayoutTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LayoutTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(LayoutTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(LayoutTransferError::MissingVersion)?;
        let dimensions = parts
            .next()
            .ok_or(LayoutTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(LayoutTransferError::MissingPayload)?;

        if domain != SNAPSHOT_DOMAIN {
            return Err(LayoutTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != SNAPSHOT_VERSION {
            return Err(LayoutTransferError::UnsupportedVersion(version.to_owned()));
        }

        let (columns, rows) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(LayoutTransferError::InvalidEncoding)?;
        let decoded: SerializableSnapshot =
            serde_json::from_slice(&bytes).map_err(LayoutTransferError::InvalidPayload)?;

        if let Some(plant) = decoded
            .plants
            .iter()
            .find(|plant| plant.cell.column() >= columns || plant.cell.row() >= rows)
        {
            return Err(LayoutTransferError::CellOutOfBounds(plant.cell));
        }

        Ok(Self {
            columns,
            rows,
            plants: decoded.plants,
        })
    }
}

/// Plant description captured within a layout snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct GardenLayoutPlant {
    /// Type of plant represented by the snapshot.
    pub kind: PlantKind,
    /// Lawn cell hosting the plant.
    pub cell: CellCoord,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableSnapshot {
    plants: Vec<GardenLayoutPlant>,
}

/// Errors that can occur while encoding or decoding layout transfer strings.
#[derive(Debug)]
pub(crate) enum LayoutTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded snapshot.
    MissingPrefix,
    /// The encoded snapshot did not contain a version segment.
    MissingVersion,
    /// The encoded snapshot did not include lawn dimensions.
    MissingDimensions,
    /// The encoded snapshot did not include the payload segment.
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The lawn dimensions could not be parsed from the encoded snapshot.
    InvalidDimensions(String),
    /// A plant sits outside the declared lawn.
    CellOutOfBounds(CellCoord),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The payload could not be serialised or deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for LayoutTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "layout string was empty"),
            Self::MissingPrefix => write!(f, "layout string is missing the prefix"),
            Self::MissingVersion => write!(f, "layout string is missing the version"),
            Self::MissingDimensions => write!(f, "layout string is missing the lawn dimensions"),
            Self::MissingPayload => write!(f, "layout string is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "layout prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "layout version '{version}' is not supported")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(f, "could not parse lawn dimensions '{dimensions}'")
            }
            Self::CellOutOfBounds(cell) => write!(
                f,
                "plant at column {} row {} lies outside the lawn",
                cell.column(),
                cell.row()
            ),
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode layout payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not process layout payload: {error}")
            }
        }
    }
}

impl Error for LayoutTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), LayoutTransferError> {
    let invalid = || LayoutTransferError::InvalidDimensions(dimensions.to_owned());
    let (columns, rows) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;

    let columns = columns.trim().parse::<u32>().map_err(|_| invalid())?;
    let rows = rows.trim().parse::<u32>().map_err(|_| invalid())?;

    if columns == 0 || rows == 0 {
        return Err(invalid());
    }

    Ok((columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_empty_layout() {
        let snapshot = GardenLayoutSnapshot {
            columns: 7,
            rows: 5,
            plants: Vec::new(),
        };

        let encoded = snapshot.encode().expect("snapshot encodes");
        assert!(encoded.starts_with(&format!("{SNAPSHOT_HEADER}:7x5:")));

        let decoded = GardenLayoutSnapshot::decode(&encoded).expect("snapshot decodes");
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn round_trip_populated_layout() {
        let snapshot = GardenLayoutSnapshot {
            columns: 9,
            rows: 6,
            plants: vec![
                GardenLayoutPlant {
                    kind: PlantKind::Peashooter,
                    cell: CellCoord::new(0, 3),
                },
                GardenLayoutPlant {
                    kind: PlantKind::Wallnut,
                    cell: CellCoord::new(8, 5),
                },
            ],
        };

        let encoded = snapshot.encode().expect("snapshot encodes");
        assert!(encoded.starts_with(&format!("{SNAPSHOT_HEADER}:9x6:")));

        let decoded = GardenLayoutSnapshot::decode(&encoded).expect("snapshot decodes");
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn rejects_foreign_prefix_and_version() {
        assert!(matches!(
            GardenLayoutSnapshot::decode("lawn:v1:7x5:e30"),
            Err(LayoutTransferError::InvalidPrefix(prefix)) if prefix == "lawn"
        ));
        assert!(matches!(
            GardenLayoutSnapshot::decode("garden:v2:7x5:e30"),
            Err(LayoutTransferError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            GardenLayoutSnapshot::decode("   "),
            Err(LayoutTransferError::EmptyPayload)
        ));
    }

    #[test]
    fn rejects_bad_dimensions() {
        for dimensions in ["7", "0x5", "sevenx5"] {
            let value = format!("garden:v1:{dimensions}:e30");
            assert!(matches!(
                GardenLayoutSnapshot::decode(&value),
                Err(LayoutTransferError::InvalidDimensions(_))
            ));
        }
    }

    #[test]
    fn rejects_plants_outside_declared_lawn() {
        let snapshot = GardenLayoutSnapshot {
            columns: 3,
            rows: 3,
            plants: vec![GardenLayoutPlant {
                kind: PlantKind::Sunflower,
                cell: CellCoord::new(4, 0),
            }],
        };
        let encoded = snapshot.encode().expect("snapshot encodes");

        assert!(matches!(
            GardenLayoutSnapshot::decode(&encoded),
            Err(LayoutTransferError::CellOutOfBounds(cell)) if cell == CellCoord::new(4, 0)
        ));
    }

    #[test]
    fn rejects_unknown_plant_kind() {
        let payload = STANDARD_NO_PAD.encode(
            r#"{"plants":[{"kind":"marigold","cell":{"column":0,"row":0}}]}"#,
        );
        let value = format!("{SNAPSHOT_HEADER}:7x5:{payload}");
        assert!(matches!(
            GardenLayoutSnapshot::decode(&value),
            Err(LayoutTransferError::InvalidPayload(_))
        ));
    }
}
