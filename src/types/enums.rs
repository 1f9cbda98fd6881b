// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Project lifecycle status.

use crate::error::{ContractError, Result};
use core::fmt;
use core::str::FromStr;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

macro_rules! project_statuses {
    ($($variant:ident = $index:literal => $name:literal,)+) => {
        /// Status of a project. Totally ordered by index; any status may
        /// follow any other.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u8)]
        pub enum ProjectStatus {
            $($variant = $index,)+
        }

        impl ProjectStatus {
            /// Every status, in index order.
            pub const ALL: &'static [ProjectStatus] = &[$(ProjectStatus::$variant,)+];

            /// Wire name of the status.
            pub fn name(self) -> &'static str {
                match self {
                    $(ProjectStatus::$variant => $name,)+
                }
            }

            pub fn from_index(v: u8) -> Option<Self> {
                match v {
                    $($index => Some(ProjectStatus::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

project_statuses! {
    Empty = 0 => "empty",
    Initialized = 1 => "initialized",
    Preparing = 2 => "preparing",
    PreparedOk = 3 => "preparedOK",
    PreparedErrored = 4 => "preparedErrored",
    UpdatingAttr = 5 => "updatingAttr",
    UpdatedAttrOk = 6 => "updatedAttrOK",
    UpdatedAttrErrored = 7 => "updatedAttrErrored",
    Unlocking = 8 => "unlocking",
    UnlockedOk = 9 => "unlockedOK",
    UnlockedErrored = 10 => "unlockedErrored",
    Deleting = 11 => "deleting",
    DeletedOk = 12 => "deletedOK",
    DeletedErrored = 13 => "deletedErrored",
}

impl ProjectStatus {
    pub fn index(self) -> u8 {
        self as u8
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Empty
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectStatus {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self> {
        ProjectStatus::ALL
            .iter()
            .copied()
            .find(|status| status.name() == s)
            .ok_or_else(|| ContractError::Validation(format!("unknown project status {s:?}")))
    }
}

// Stored as the numeric index.
impl Serialize for ProjectStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index())
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let index = u8::deserialize(deserializer)?;
        ProjectStatus::from_index(index)
            .ok_or_else(|| de::Error::custom(format!("project status index {index} out of range")))
    }
}
