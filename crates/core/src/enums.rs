//! Closed value sets for the roster's enumerated fields.
//!
//! Every enum is stored as TEXT and travels over the wire as its upper-case
//! name. Unknown values are rejected when deserializing or parsing, so a
//! value that reaches the database is always one of the listed variants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $label:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// The stored / wire representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {}: '{other}'. Must be one of: {}",
                        $label,
                        [$( $wire ),+].join(", ")
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

define_text_enum! {
    /// Participant gender, used by the team gender counters.
    Gender as "gender" {
        Male = "MALE",
        Female = "FEMALE",
    }
}

define_text_enum! {
    /// Academic department a participant belongs to.
    Department as "department" {
        Aero = "AERO",
        Ce = "CE",
        Civil = "CIVIL",
        Ec = "EC",
        Ele = "ELE",
        Ic = "IC",
        It = "IT",
        Mca = "MCA",
    }
}

define_text_enum! {
    ShirtSize as "shirt size" {
        Xs = "XS",
        S = "S",
        M = "M",
        L = "L",
        Xl = "XL",
        Xxl = "XXL",
        Xxxl = "XXXL",
    }
}

define_text_enum! {
    /// Year-of-study classification that replaces gender in the `batch`
    /// roster schema.
    Batch as "batch" {
        First = "FIRST",
        Second = "SECOND",
        Third = "THIRD",
        Fourth = "FOURTH",
    }
}

define_text_enum! {
    ProjectType as "project type" {
        Hardware = "HARDWARE",
        Iot = "IOT",
        Software = "SOFTWARE",
    }
}

define_text_enum! {
    /// Building wing a location sits in.
    Wing as "wing" {
        Cef = "CEF",
        Ces = "CES",
        It = "IT",
        Ec = "EC",
        Mca = "MCA",
        Arch = "ARCH",
    }
}
