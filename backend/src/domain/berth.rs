//! Berth data model and occupancy state.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::VesselId;

/// Validation errors raised while building a [`BerthDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BerthValidationError {
    /// `null`, `false`, zero, or the empty string.
    EmptyNumber,
    /// Arrays and objects are not accepted as berth numbers.
    NonScalarNumber,
}

impl fmt::Display for BerthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNumber => write!(f, "berth number must not be empty, false, or zero"),
            Self::NonScalarNumber => write!(f, "berth number must be a string, number, or boolean"),
        }
    }
}

impl std::error::Error for BerthValidationError {}

/// Store-assigned berth identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BerthId(u64);

impl BerthId {
    /// Wrap a raw store identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw store identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BerthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Occupancy state of a berth.
///
/// Transitions happen only through the occupancy manager:
/// `Empty -> Occupied(v)` on assign, `Occupied(v) -> Empty` on release or
/// when `v` is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Occupancy {
    #[default]
    Empty,
    Occupied(VesselId),
}

impl Occupancy {
    /// Build from a nullable occupant.
    #[must_use]
    pub fn from_occupant(occupant: Option<VesselId>) -> Self {
        occupant.map_or(Self::Empty, Self::Occupied)
    }

    /// The occupying vessel, if any.
    #[must_use]
    pub fn occupant(self) -> Option<VesselId> {
        match self {
            Self::Empty => None,
            Self::Occupied(vessel_id) => Some(vessel_id),
        }
    }

    /// Whether no vessel occupies the berth.
    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Whether `vessel_id` is the occupant. Compared by identifier value.
    #[must_use]
    pub fn is_occupied_by(self, vessel_id: VesselId) -> bool {
        self.occupant() == Some(vessel_id)
    }
}

/// Caller-supplied berth label.
///
/// Stored and echoed back exactly as given: `12`, `"A7"` and `7.5` are all
/// valid. It is neither unique nor interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BerthNumber(Value);

impl BerthNumber {
    /// Validate a raw JSON scalar.
    pub fn new(raw: Value) -> Result<Self, BerthValidationError> {
        let empty = match &raw {
            Value::Null | Value::Bool(false) => true,
            Value::Bool(true) => false,
            Value::Number(number) => number.as_f64() == Some(0.0),
            Value::String(text) => text.is_empty(),
            Value::Array(_) | Value::Object(_) => {
                return Err(BerthValidationError::NonScalarNumber);
            }
        };
        if empty {
            return Err(BerthValidationError::EmptyNumber);
        }
        Ok(Self(raw))
    }

    /// The number as supplied.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for BerthNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated caller-supplied berth attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct BerthDraft {
    number: BerthNumber,
}

impl BerthDraft {
    /// Validate and build a draft.
    pub fn new(number: Value) -> Result<Self, BerthValidationError> {
        BerthNumber::new(number).map(|number| Self { number })
    }

    /// Caller-supplied berth number.
    #[must_use]
    pub fn number(&self) -> &BerthNumber {
        &self.number
    }
}

/// A persisted berth together with the revision it was read at.
///
/// The revision is the store's concurrency token; writes made on behalf of
/// this snapshot are conditional on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Berth {
    id: BerthId,
    number: BerthNumber,
    occupancy: Occupancy,
    revision: u64,
}

impl Berth {
    /// Assemble a berth snapshot.
    #[must_use]
    pub fn new(id: BerthId, number: BerthNumber, occupancy: Occupancy, revision: u64) -> Self {
        Self {
            id,
            number,
            occupancy,
            revision,
        }
    }

    /// Store identifier.
    #[must_use]
    pub fn id(&self) -> BerthId {
        self.id
    }

    /// Caller-supplied number.
    #[must_use]
    pub fn number(&self) -> &BerthNumber {
        &self.number
    }

    /// Current occupancy.
    #[must_use]
    pub fn occupancy(&self) -> Occupancy {
        self.occupancy
    }

    /// Revision this snapshot was read at.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Copy of this snapshot with a different occupancy; the revision is kept
    /// so the write stays conditional on what was read.
    #[must_use]
    pub fn with_occupancy(&self, occupancy: Occupancy) -> Self {
        Self {
            occupancy,
            ..self.clone()
        }
    }
}
