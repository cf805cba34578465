//! Value types understood by the bundled backend.

use std::fmt;

use crate::convert::{BaseDetection, IntegerScan, parse_bool, scan_integer};

/// Type of a backend flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FlagType {
    /// `true` or `false`.
    Bool,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer.
    Uint64,
    /// 64-bit floating point.
    Double,
    /// Free-form text.
    String,
}

impl FlagType {
    /// The type name reported through [`super::BackendFlag::flag_type`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Double => "double",
            Self::String => "string",
        }
    }

    /// Parses `text` strictly and renders it in canonical form.
    ///
    /// Integers are decimal unless prefixed with `0x`. Returns `None` when
    /// the text is not a complete value of this type or falls outside its
    /// range.
    #[must_use]
    pub fn normalise(self, text: &str) -> Option<String> {
        match self {
            Self::String => Some(text.to_owned()),
            Self::Bool => parse_bool(text).map(|value| value.to_string()),
            Self::Double => text
                .trim()
                .parse::<f64>()
                .ok()
                .map(|value| value.to_string()),
            Self::Int32 | Self::Int64 => {
                let scan = scan_whole_integer(text)?;
                if scan.exceeds_signed() {
                    return None;
                }
                let value = scan.signed();
                if self == Self::Int32 {
                    i32::try_from(value).ok().map(|narrow| narrow.to_string())
                } else {
                    Some(value.to_string())
                }
            }
            Self::Uint32 | Self::Uint64 => {
                let scan = scan_whole_integer(text)?;
                if text.trim_start().starts_with('-') {
                    return None;
                }
                let value = scan.unsigned();
                if scan.exceeds_unsigned() {
                    return None;
                }
                if self == Self::Uint32 {
                    u32::try_from(value).ok().map(|narrow| narrow.to_string())
                } else {
                    Some(value.to_string())
                }
            }
        }
    }
}

fn scan_whole_integer(text: &str) -> Option<IntegerScan> {
    scan_integer(text, BaseDetection::HexOnly).filter(|scan| scan.is_complete(text))
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::FlagType;
    use rstest::rstest;

    #[rstest]
    #[case(FlagType::Bool, "YES", Some("true"))]
    #[case(FlagType::Bool, "maybe", None)]
    #[case(FlagType::Int32, "0x1F", Some("31"))]
    #[case(FlagType::Int32, "2147483648", None)]
    #[case(FlagType::Int32, "12ms", None)]
    #[case(FlagType::Int32, "010", Some("10"))]
    #[case(FlagType::Uint64, "0010", Some("10"))]
    #[case(FlagType::Int64, "-42", Some("-42"))]
    #[case(FlagType::Uint32, "-1", None)]
    #[case(FlagType::Uint64, "18446744073709551615", Some("18446744073709551615"))]
    #[case(FlagType::Uint64, "18446744073709551616", None)]
    #[case(FlagType::Double, "2.50", Some("2.5"))]
    #[case(FlagType::Double, "fast", None)]
    #[case(FlagType::String, " kept ", Some(" kept "))]
    fn normalises_by_type(
        #[case] flag_type: FlagType,
        #[case] text: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(flag_type.normalise(text).as_deref(), expected);
    }

    #[test]
    fn displays_type_names() {
        assert_eq!(FlagType::Uint32.to_string(), "uint32");
        assert_eq!(FlagType::Bool.as_str(), "bool");
    }
}
