//! String- and integer-valued API enums with lenient coercion.
//!
//! A literal is matched against each member's canonical value first, then
//! case-insensitively against member names. The lookup table for each enum
//! is built once, on first use.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Canonical wire value of an enum member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumValue {
    Str(&'static str),
    Int(i64),
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::Str(s) => f.write_str(s),
            EnumValue::Int(i) => write!(f, "{i}"),
        }
    }
}

/// An unvalidated literal offered for an enum field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumLiteral {
    Int(i64),
    Str(String),
}

impl EnumLiteral {
    fn lookup_key(&self) -> String {
        match self {
            EnumLiteral::Int(i) => i.to_string(),
            EnumLiteral::Str(s) => s.trim().to_lowercase(),
        }
    }
}

impl fmt::Display for EnumLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumLiteral::Int(i) => write!(f, "{i}"),
            EnumLiteral::Str(s) => f.write_str(s),
        }
    }
}

pub trait ApiEnum: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    const NAME: &'static str;

    fn members() -> &'static [Self];

    /// Member name as written in code, e.g. `Celsius`.
    fn name(self) -> &'static str;

    fn value(self) -> EnumValue;

    /// Lowercased names and values mapped to members.
    fn lookup() -> &'static HashMap<String, Self>;

    fn coerce(literal: &EnumLiteral) -> Option<Self> {
        if let Some(member) = Self::members().iter().find(|m| match (m.value(), literal) {
            (EnumValue::Str(v), EnumLiteral::Str(s)) => v == s,
            (EnumValue::Int(v), EnumLiteral::Int(i)) => v == *i,
            _ => false,
        }) {
            return Some(*member);
        }
        Self::lookup().get(&literal.lookup_key()).copied()
    }

    fn valid_values() -> Vec<String> {
        Self::members().iter().map(|m| m.value().to_string()).collect()
    }
}

pub(crate) fn build_lookup<E: ApiEnum>() -> HashMap<String, E> {
    let mut table = HashMap::new();
    for member in E::members() {
        table.insert(member.value().to_string().to_lowercase(), *member);
    }
    // Names win over values that happen to collide with another member's name.
    for member in E::members() {
        table.insert(member.name().to_lowercase(), *member);
    }
    table
}

/// An enum argument as a caller may supply it: a member or a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumArg<E> {
    Member(E),
    Literal(EnumLiteral),
}

impl<E: ApiEnum> From<&str> for EnumArg<E> {
    fn from(value: &str) -> Self {
        EnumArg::Literal(EnumLiteral::Str(value.to_string()))
    }
}

impl<E: ApiEnum> From<String> for EnumArg<E> {
    fn from(value: String) -> Self {
        EnumArg::Literal(EnumLiteral::Str(value))
    }
}

impl<E: ApiEnum> From<i64> for EnumArg<E> {
    fn from(value: i64) -> Self {
        EnumArg::Literal(EnumLiteral::Int(value))
    }
}

/// Resolve an endpoint argument to a member of `E`.
///
/// Fails with [`Error::InvalidEnumValue`] listing every valid value.
pub fn validate_enum_param<E: ApiEnum>(
    param: &str,
    value: impl Into<EnumArg<E>>,
) -> Result<E, Error> {
    match value.into() {
        EnumArg::Member(member) => Ok(member),
        EnumArg::Literal(literal) => E::coerce(&literal).ok_or_else(|| Error::InvalidEnumValue {
            param: param.to_string(),
            value: literal.to_string(),
            valid: E::valid_values(),
        }),
    }
}

/// Declare an API enum.
///
/// `str` enums carry string values, `int` enums integer values. Both get
/// coercing `Deserialize`, value-writing `Serialize`, `Display` of the value
/// and `FromStr`.
macro_rules! api_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident: str {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        $crate::model::enums::api_enum!(@common $name, [$($variant),+], |m| $crate::model::EnumValue::Str(m.as_str()));

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };

    (
        $(#[$meta:meta])*
        pub enum $name:ident: int {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub fn as_i64(self) -> i64 {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        $crate::model::enums::api_enum!(@common $name, [$($variant),+], |m| $crate::model::EnumValue::Int(m.as_i64()));

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_i64(self.as_i64())
            }
        }
    };

    (@common $name:ident, [$($variant:ident),+], |$m:ident| $value:expr) => {
        impl $crate::model::ApiEnum for $name {
            const NAME: &'static str = stringify!($name);

            fn members() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }

            fn value(self) -> $crate::model::EnumValue {
                let $m = self;
                $value
            }

            fn lookup() -> &'static std::collections::HashMap<String, Self> {
                static TABLE: std::sync::OnceLock<std::collections::HashMap<String, $name>> =
                    std::sync::OnceLock::new();
                TABLE.get_or_init($crate::model::enums::build_lookup::<$name>)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                use $crate::model::ApiEnum;
                write!(f, "{}", self.value())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                use $crate::model::ApiEnum;
                $crate::model::validate_enum_param(Self::NAME, s)
            }
        }

        impl From<$name> for $crate::model::EnumArg<$name> {
            fn from(value: $name) -> Self {
                $crate::model::EnumArg::Member(value)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                use $crate::model::ApiEnum;
                let literal =
                    <$crate::model::EnumLiteral as serde::Deserialize>::deserialize(deserializer)?;
                Self::coerce(&literal).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "Invalid {}: {:?}. Valid: {:?}",
                        Self::NAME,
                        literal.to_string(),
                        Self::valid_values(),
                    ))
                })
            }
        }
    };
}

pub(crate) use api_enum;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    api_enum! {
        pub enum Colour: str {
            Red = "r",
            DarkBlue = "dark_blue",
        }
    }

    api_enum! {
        pub enum Step: int {
            One = 1,
            Five = 5,
        }
    }

    #[test]
    fn canonical_values_and_any_case_of_names_resolve_to_the_same_member() {
        for literal in ["r", "Red", "RED", "red", "R"] {
            assert_eq!(validate_enum_param::<Colour>("colour", literal).unwrap(), Colour::Red);
        }
        assert_eq!(
            validate_enum_param::<Colour>("colour", "darkblue").unwrap(),
            Colour::DarkBlue
        );
        assert_eq!(
            validate_enum_param::<Colour>("colour", Colour::DarkBlue).unwrap(),
            Colour::DarkBlue
        );
    }

    #[test]
    fn unknown_literals_list_every_valid_value() {
        let err = validate_enum_param::<Colour>("colour", "green").unwrap_err();
        match err {
            Error::InvalidEnumValue { param, value, valid } => {
                assert_eq!(param, "colour");
                assert_eq!(value, "green");
                assert_eq!(valid, ["r", "dark_blue"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn integer_enums_accept_numbers_and_numeric_strings() {
        assert_eq!(validate_enum_param::<Step>("bucket", 5_i64).unwrap(), Step::Five);
        assert_eq!(validate_enum_param::<Step>("bucket", "1").unwrap(), Step::One);
        assert_eq!(validate_enum_param::<Step>("bucket", "five").unwrap(), Step::Five);
        assert!(validate_enum_param::<Step>("bucket", 2_i64).is_err());
    }

    #[test]
    fn serde_uses_canonical_values() {
        assert_eq!(serde_json::to_value(Colour::DarkBlue).unwrap(), json!("dark_blue"));
        assert_eq!(serde_json::to_value(Step::Five).unwrap(), json!(5));

        let c: Colour = serde_json::from_value(json!("DarkBlue")).unwrap();
        assert_eq!(c, Colour::DarkBlue);
        let s: Step = serde_json::from_value(json!(1)).unwrap();
        assert_eq!(s, Step::One);

        let err = serde_json::from_value::<Colour>(json!("green")).unwrap_err();
        assert!(err.to_string().contains(r#"Valid: ["r", "dark_blue"]"#));
    }

    #[test]
    fn display_and_from_str_round_trip() {
        assert_eq!(Colour::Red.to_string(), "r");
        assert_eq!("dark_blue".parse::<Colour>().unwrap(), Colour::DarkBlue);
        assert_eq!(Step::Five.to_string(), "5");
    }
}
