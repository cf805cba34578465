//! Conversions between flag text and typed Rust values.
//!
//! Every value crosses the backend boundary as text. Integer conversions use
//! the C `strtol` family rules: leading whitespace is skipped, the base is
//! detected from a `0x` or `0` prefix, the longest valid prefix is used and
//! anything unparsable becomes zero. Narrow integer types truncate the 64-bit
//! intermediate rather than rejecting it.

/// A value that can be read from and written to flag text.
pub trait FlagValue: Sized {
    /// Converts flag text into a value, falling back to the type's zero
    /// value when nothing parses.
    fn from_flag_str(text: &str) -> Self;

    /// Renders the value the way the flag backend stores it.
    fn to_flag_string(&self) -> String;
}

/// Parses the boolean spellings accepted by the flag backend.
///
/// Matching is case-insensitive. Returns `None` for anything else.
#[must_use]
pub fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IntegerScan {
    negative: bool,
    magnitude: u64,
    overflow: bool,
    consumed: usize,
}

impl IntegerScan {
    /// Whether the scan used every byte of `text`.
    pub(crate) const fn is_complete(&self, text: &str) -> bool {
        self.consumed == text.len()
    }

    pub(crate) fn signed(&self) -> i64 {
        let saturated = if self.negative { i64::MIN } else { i64::MAX };
        if self.overflow {
            return saturated;
        }
        if self.negative {
            i64::try_from(self.magnitude).map_or(saturated, |value| -value)
        } else {
            i64::try_from(self.magnitude).unwrap_or(saturated)
        }
    }

    pub(crate) const fn unsigned(&self) -> u64 {
        if self.overflow {
            u64::MAX
        } else if self.negative {
            self.magnitude.wrapping_neg()
        } else {
            self.magnitude
        }
    }

    /// Whether the value lies outside the signed 64-bit range.
    pub(crate) const fn exceeds_signed(&self) -> bool {
        let limit = if self.negative {
            i64::MIN.unsigned_abs()
        } else {
            i64::MAX.unsigned_abs()
        };
        self.overflow || self.magnitude > limit
    }

    /// Whether the magnitude overflowed 64 bits.
    pub(crate) const fn exceeds_unsigned(&self) -> bool {
        self.overflow
    }
}

/// Which prefixes switch an integer scan out of base 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BaseDetection {
    /// `0x` selects hex and a leading `0` selects octal, as `strtol` base 0.
    HexOrOctal,
    /// Only `0x` selects hex; a leading `0` is an ordinary decimal digit.
    HexOnly,
}

/// Scans the longest integer prefix of `text`, picking the base from its
/// prefix according to `bases`.
///
/// Returns `None` when no digit is found.
pub(crate) fn scan_integer(text: &str, bases: BaseDetection) -> Option<IntegerScan> {
    let bytes = text.as_bytes();
    let mut pos = bytes.iter().take_while(|b| b.is_ascii_whitespace()).count();
    let mut negative = false;
    if let Some(&sign @ (b'+' | b'-')) = bytes.get(pos) {
        negative = sign == b'-';
        pos += 1;
    }
    let radix: u32 = match (bytes.get(pos), bytes.get(pos + 1), bytes.get(pos + 2)) {
        (Some(b'0'), Some(b'x' | b'X'), Some(digit)) if digit.is_ascii_hexdigit() => {
            pos += 2;
            16
        }
        (Some(b'0'), _, _) if bases == BaseDetection::HexOrOctal => 8,
        _ => 10,
    };

    let digits_start = pos;
    let mut magnitude: u64 = 0;
    let mut overflow = false;
    for &byte in bytes.get(pos..).unwrap_or_default() {
        let Some(digit) = char::from(byte).to_digit(radix) else {
            break;
        };
        match magnitude
            .checked_mul(u64::from(radix))
            .and_then(|shifted| shifted.checked_add(u64::from(digit)))
        {
            Some(next) => magnitude = next,
            None => overflow = true,
        }
        pos += 1;
    }

    (pos > digits_start).then_some(IntegerScan {
        negative,
        magnitude,
        overflow,
        consumed: pos,
    })
}

/// `strtol` with base detection.
pub(crate) fn parse_signed(text: &str) -> i64 {
    scan_integer(text, BaseDetection::HexOrOctal).map_or(0, |scan| scan.signed())
}

/// `strtoul` with base detection; negative input wraps.
pub(crate) fn parse_unsigned(text: &str) -> u64 {
    scan_integer(text, BaseDetection::HexOrOctal).map_or(0, |scan| scan.unsigned())
}

/// Returns the longest prefix of `text` that reads as a floating-point
/// number, with leading whitespace removed.
fn float_prefix(text: &str) -> &str {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut pos = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let rest = trimmed.get(pos..).unwrap_or_default().to_ascii_lowercase();
    for word in ["infinity", "inf", "nan"] {
        if rest.starts_with(word) {
            return trimmed.get(..pos + word.len()).unwrap_or_default();
        }
    }

    let count_digits = |from: usize| {
        bytes
            .get(from..)
            .unwrap_or_default()
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_digits = count_digits(pos);
    pos += int_digits;
    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(pos + 1);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return "";
    }
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(pos + 1), Some(b'+' | b'-')));
        let exp_digits = count_digits(pos + 1 + sign);
        if exp_digits > 0 {
            pos += 1 + sign + exp_digits;
        }
    }
    trimmed.get(..pos).unwrap_or_default()
}

impl FlagValue for String {
    fn from_flag_str(text: &str) -> Self {
        text.to_owned()
    }

    fn to_flag_string(&self) -> String {
        self.clone()
    }
}

impl FlagValue for bool {
    fn from_flag_str(text: &str) -> Self {
        parse_bool(text).unwrap_or(false)
    }

    fn to_flag_string(&self) -> String {
        self.to_string()
    }
}

impl FlagValue for f64 {
    fn from_flag_str(text: &str) -> Self {
        float_prefix(text).parse().unwrap_or(0.0)
    }

    fn to_flag_string(&self) -> String {
        self.to_string()
    }
}

impl FlagValue for f32 {
    fn from_flag_str(text: &str) -> Self {
        float_prefix(text).parse().unwrap_or(0.0)
    }

    fn to_flag_string(&self) -> String {
        self.to_string()
    }
}

impl FlagValue for i64 {
    fn from_flag_str(text: &str) -> Self {
        parse_signed(text)
    }

    fn to_flag_string(&self) -> String {
        self.to_string()
    }
}

impl FlagValue for u64 {
    fn from_flag_str(text: &str) -> Self {
        parse_unsigned(text)
    }

    fn to_flag_string(&self) -> String {
        self.to_string()
    }
}

macro_rules! truncating_flag_value {
    ($($ty:ty => $parse:ident),+ $(,)?) => {
        $(
            impl FlagValue for $ty {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "narrow integers keep the low bits of the 64-bit parse"
                )]
                fn from_flag_str(text: &str) -> Self {
                    $parse(text) as $ty
                }

                fn to_flag_string(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

truncating_flag_value!(
    i16 => parse_signed,
    i32 => parse_signed,
    u16 => parse_unsigned,
    u32 => parse_unsigned,
);

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests panic to surface registry mistakes"
)]
mod tests {
    use super::{BaseDetection, FlagValue, float_prefix, parse_bool, scan_integer};
    use rstest::rstest;

    #[rstest]
    #[case("42", 42)]
    #[case("  -17", -17)]
    #[case("0x1f", 31)]
    #[case("010", 8)]
    #[case("12abc", 12)]
    #[case("abc", 0)]
    #[case("", 0)]
    #[case("0x", 0)]
    #[case("99999999999999999999", i64::MAX)]
    #[case("-99999999999999999999", i64::MIN)]
    #[case("-9223372036854775808", i64::MIN)]
    fn parses_signed_like_strtol(#[case] text: &str, #[case] expected: i64) {
        assert_eq!(i64::from_flag_str(text), expected);
    }

    #[rstest]
    #[case("42", 42)]
    #[case("-1", u64::MAX)]
    #[case("0xFFFFFFFFFFFFFFFFF", u64::MAX)]
    fn parses_unsigned_like_strtoul(#[case] text: &str, #[case] expected: u64) {
        assert_eq!(u64::from_flag_str(text), expected);
    }

    #[test]
    fn narrow_integers_truncate() {
        assert_eq!(i32::from_flag_str("4294967297"), 1);
        assert_eq!(u16::from_flag_str("65537"), 1);
        assert_eq!(i16::from_flag_str("32768"), i16::MIN);
        assert_eq!(u32::from_flag_str("-1"), u32::MAX);
    }

    #[rstest]
    #[case("1.5", "1.5")]
    #[case("  2.5e3xyz", "2.5e3")]
    #[case("-.5", "-.5")]
    #[case("7.", "7.")]
    #[case("1e", "1")]
    #[case("inf", "inf")]
    #[case("-Infinity!", "-Infinity")]
    #[case(".", "")]
    #[case("value", "")]
    fn finds_float_prefix(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(float_prefix(text), expected);
    }

    #[test]
    fn floats_default_to_zero() {
        assert!(f64::from_flag_str("nope").abs() < f64::EPSILON);
        assert!((f32::from_flag_str("0.25s") - 0.25).abs() < f32::EPSILON);
    }

    #[rstest]
    #[case("TRUE", Some(true))]
    #[case("y", Some(true))]
    #[case("0", Some(false))]
    #[case("No", Some(false))]
    #[case("maybe", None)]
    fn recognises_boolean_words(#[case] text: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool(text), expected);
    }

    #[test]
    fn scan_reports_completeness() {
        let full = scan_integer("0x10", BaseDetection::HexOrOctal).expect("digits present");
        assert!(full.is_complete("0x10"));
        let partial = scan_integer("10ms", BaseDetection::HexOrOctal).expect("digits present");
        assert!(!partial.is_complete("10ms"));
    }

    #[rstest]
    #[case("010", BaseDetection::HexOrOctal, 8)]
    #[case("010", BaseDetection::HexOnly, 10)]
    #[case("0x10", BaseDetection::HexOnly, 16)]
    #[case("-007", BaseDetection::HexOnly, -7)]
    fn leading_zero_selects_octal_only_when_asked(
        #[case] text: &str,
        #[case] bases: BaseDetection,
        #[case] expected: i64,
    ) {
        let scan = scan_integer(text, bases).expect("digits present");
        assert!(scan.is_complete(text));
        assert_eq!(scan.signed(), expected);
    }

    #[test]
    fn renders_values_as_text() {
        assert_eq!(30_i32.to_flag_string(), "30");
        assert_eq!(true.to_flag_string(), "true");
        assert_eq!(0.5_f64.to_flag_string(), "0.5");
        assert_eq!(String::from("x").to_flag_string(), "x");
    }
}
