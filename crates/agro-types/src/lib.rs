//! AgroChain Types - Pure type definitions
//!
//! This crate contains only pure data types with no async runtime dependencies,
//! shared by the server, the core library and the command-line client.

use thiserror::Error;

/// Entity identifier, assigned by the store at creation time
pub type Id = i64;

/// Returned when a string is not one of an enumeration's wire values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value '{value}', expected one of: {expected}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

/// Declares a lowercase wire enumeration with `Display`, `FromStr` and a
/// list of its accepted values.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::ParseEnumError {
                        kind: $kind,
                        value: other.to_string(),
                        expected: Self::VALUES.join(", "),
                    }),
                }
            }
        }
    };
}

pub(crate) use text_enum;

pub mod barter;
pub mod governance;
pub mod liquidity;
pub mod marketplace;
pub mod microjob;
pub mod user;

pub use barter::*;
pub use governance::*;
pub use liquidity::*;
pub use marketplace::*;
pub use microjob::*;
pub use user::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(UserType::Government.to_string(), "government");
        assert_eq!("assigned".parse::<MicrojobStatus>(), Ok(MicrojobStatus::Assigned));
        assert_eq!(
            serde_json::to_string(&RiskLevel::Medium).unwrap(),
            "\"medium\""
        );
        assert_eq!(Vote::VALUES, &["for", "against"]);
    }

    #[test]
    fn test_enum_parse_error() {
        let err = "archived".parse::<BarterStatus>().unwrap_err();
        assert_eq!(err.kind, "barter status");
        assert_eq!(err.expected, "pending, accepted, rejected");
        assert!(err.to_string().contains("archived"));
    }
}
