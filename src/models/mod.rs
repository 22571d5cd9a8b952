//! Domain models
//!
//! Wire types exchanged with the judge API. The console never persists them;
//! they live for the duration of an editor or viewer session.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default (the judge encodes empty lists as `null`)
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Integer-coded enum value the judge sent but the console does not know
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} code {code}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: u8,
}

/// Implements the integer wire encoding for a fieldless enum
macro_rules! coded_enum {
    ($name:ident, $kind:literal, { $($variant:ident = $code:literal),+ $(,)? }) => {
        impl TryFrom<u8> for $name {
            type Error = $crate::models::UnknownCode;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    _ => Err($crate::models::UnknownCode { kind: $kind, code }),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                match value {
                    $($name::$variant => $code,)+
                }
            }
        }
    };
}

pub(crate) use coded_enum;

pub mod problem;
pub mod resource;
pub mod submission;
pub mod verdict;

pub use problem::*;
pub use resource::*;
pub use submission::*;
pub use verdict::*;
