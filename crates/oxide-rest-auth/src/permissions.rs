//! Roles, access levels and permission grants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A numeric role identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(pub u16);

impl Role {
    /// The role of anonymous callers.
    pub const DEFAULT: Self = Self(0);
}

impl Default for Role {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a grant lets a role do with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// The field may be selected, filtered and sorted on.
    Read,
    /// The field may be inserted and updated.
    Write,
}

impl AccessLevel {
    const fn bit(self) -> u8 {
        match self {
            Self::Read => 0b01,
            Self::Write => 0b10,
        }
    }
}

/// A grant of access levels to one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    role: Role,
    levels: u8,
}

impl Permission {
    /// Grants the given levels to a role.
    #[must_use]
    pub fn new(role: Role, levels: &[AccessLevel]) -> Self {
        Self {
            role,
            levels: levels.iter().fold(0, |acc, l| acc | l.bit()),
        }
    }

    /// Grants READ only.
    #[must_use]
    pub fn read_only(role: Role) -> Self {
        Self::new(role, &[AccessLevel::Read])
    }

    /// Grants WRITE only.
    #[must_use]
    pub fn write_only(role: Role) -> Self {
        Self::new(role, &[AccessLevel::Write])
    }

    /// Grants READ and WRITE.
    #[must_use]
    pub fn read_write(role: Role) -> Self {
        Self::new(role, &[AccessLevel::Read, AccessLevel::Write])
    }

    /// Returns the granted role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns true if the grant includes `level`.
    #[must_use]
    pub const fn allows(&self, level: AccessLevel) -> bool {
        self.levels & level.bit() != 0
    }

    /// Returns true if the grant includes every one of `levels`.
    ///
    /// An empty slice is never allowed.
    #[must_use]
    pub fn allows_all(&self, levels: &[AccessLevel]) -> bool {
        !levels.is_empty() && levels.iter().all(|l| self.allows(*l))
    }
}
