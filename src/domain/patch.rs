//! Tagged optional value used by partial updates.

use serde::{Deserialize, Deserializer};

/// A single field of a partial update.
///
/// `Absent` means "leave the stored value unchanged"; `Present` carries the
/// value the caller supplied, including an empty one. Keeping the two apart
/// lets services tell "not sent" from "sent as empty".
///
/// When decoded from JSON a missing key and an explicit `null` both become
/// `Absent` (fields must be marked `#[serde(default)]`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Present(T),
}

impl<T> Patch<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Patch::Present(_))
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Present(value) => Patch::Present(value),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Present(value) => Patch::Present(f(value)),
        }
    }

    /// Returns the supplied value, if any.
    pub fn present(self) -> Option<T> {
        match self {
            Patch::Absent => None,
            Patch::Present(value) => Some(value),
        }
    }

    /// Applies the patch to `target`, leaving it untouched when absent.
    pub fn apply_to(self, target: &mut T) {
        if let Patch::Present(value) = self {
            *target = value;
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Patch::Absent, Patch::Present)
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}
