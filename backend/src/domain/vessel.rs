//! Vessel data model.
//!
//! A vessel carries no relationship fields; which berth it occupies is
//! recorded on the berth side only.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors raised while building a [`VesselDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VesselValidationError {
    EmptyName,
    EmptyKind,
    NonPositiveLength,
}

impl VesselValidationError {
    /// Request field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyKind => "type",
            Self::NonPositiveLength => "length",
        }
    }
}

impl fmt::Display for VesselValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "vessel name must not be empty"),
            Self::EmptyKind => write!(f, "vessel type must not be empty"),
            Self::NonPositiveLength => write!(f, "vessel length must be greater than zero"),
        }
    }
}

impl std::error::Error for VesselValidationError {}

/// Store-assigned vessel identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VesselId(u64);

impl VesselId {
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

impl fmt::Display for VesselId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated caller-supplied vessel attributes.
///
/// Used for both creation and wholesale replacement; all three attributes are
/// always required.
///
/// # Examples
/// ```
/// use marina::domain::VesselDraft;
///
/// let draft = VesselDraft::new("Orca", "sailboat", 30).expect("valid vessel");
/// assert_eq!(draft.name(), "Orca");
/// assert!(VesselDraft::new(" ", "sailboat", 30).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VesselDraft {
    name: String,
    kind: String,
    length: u32,
}

impl VesselDraft {
    /// Validate and build a draft.
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        length: u32,
    ) -> Result<Self, VesselValidationError> {
        let name = name.into();
        let kind = kind.into();
        if name.trim().is_empty() {
            return Err(VesselValidationError::EmptyName);
        }
        if kind.trim().is_empty() {
            return Err(VesselValidationError::EmptyKind);
        }
        if length == 0 {
            return Err(VesselValidationError::NonPositiveLength);
        }
        Ok(Self { name, kind, length })
    }

    /// Vessel name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vessel type, e.g. `sailboat`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Vessel length.
    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }
}

/// A persisted vessel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vessel {
    id: VesselId,
    draft: VesselDraft,
}

impl Vessel {
    /// Attach a store identifier to validated attributes.
    #[must_use]
    pub fn new(id: VesselId, draft: VesselDraft) -> Self {
        Self { id, draft }
    }

    /// Store identifier.
    #[must_use]
    pub fn id(&self) -> VesselId {
        self.id
    }

    /// Vessel name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.draft.name()
    }

    /// Vessel type.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.draft.kind()
    }

    /// Vessel length.
    #[must_use]
    pub fn length(&self) -> u32 {
        self.draft.length()
    }
}
