// ── Loosely-typed scalars ──
//
// The legacy API reports the same counter as `12`, `"12"` or `[]` depending
// on model and firmware. These types accept every observed shape and keep
// both the numeric and the textual form so callers can pick the one they
// need (text for tags, numbers for fields).

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, SeqAccess, Unexpected, Visitor};

/// Render a float in its shortest round-trippable decimal form.
///
/// No exponent, no trailing zeros, integral values without a fractional part:
/// `12.0` → `"12"`, `0.25` → `"0.25"`.
pub fn format_number(value: f64) -> String {
    value.to_string()
}

/// Parse numeric text, treating anything unparseable or non-finite as zero.
fn parse_number(text: &str) -> f64 {
    text.parse::<f64>().ok().filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Consume a sequence, succeeding only if it is empty.
fn expect_empty_seq<'de, A, V>(mut seq: A, visitor: &V) -> Result<(), A::Error>
where
    A: SeqAccess<'de>,
    V: Visitor<'de>,
{
    match seq.next_element::<IgnoredAny>()? {
        None => Ok(()),
        Some(_) => Err(de::Error::invalid_type(Unexpected::Seq, visitor)),
    }
}

// ── FlexNumber ──────────────────────────────────────────────────────

/// A counter that may arrive as a JSON number or as numeric text.
///
/// After decoding, [`text`](Self::text) is always populated when the source
/// carried a value. [`number`](Self::number) is populated when the source was
/// numeric or numeric text, and stays `0.0` for non-numeric text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlexNumber {
    number: f64,
    text: String,
}

impl FlexNumber {
    /// Build from a JSON number; the text form is derived from it.
    pub fn from_number(number: f64) -> Self {
        Self {
            number,
            text: format_number(number),
        }
    }

    /// Build from JSON text; the numeric form is parsed when possible.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            number: parse_number(&text),
            text,
        }
    }

    /// Numeric projection. Use for metric fields.
    pub fn number(&self) -> f64 {
        self.number
    }

    /// Textual projection. Use for metric tags.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for FlexNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for FlexNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlexNumberVisitor)
    }
}

struct FlexNumberVisitor;

impl<'de> Visitor<'de> for FlexNumberVisitor {
    type Value = FlexNumber;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a numeric string, or an empty array")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(FlexNumber::from_number(v))
    }

    #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(FlexNumber::from_number(v as f64))
    }

    #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(FlexNumber::from_number(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(FlexNumber::from_text(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(FlexNumber::from_text(v))
    }

    // Disabled devices report `[]` instead of stats.
    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        expect_empty_seq(seq, &self)?;
        Ok(FlexNumber::default())
    }
}

// ── FlexBool ────────────────────────────────────────────────────────

/// A status flag that may arrive as a JSON boolean, `"true"`, `"1"` or `1`.
///
/// [`text`](Self::text) keeps the canonical token so tags stay stable across
/// firmware: `true`/`false` for JSON booleans and for those words in any
/// case, the raw string otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlexBool {
    value: bool,
    text: String,
}

impl FlexBool {
    pub fn from_bool(value: bool) -> Self {
        Self {
            value,
            text: value.to_string(),
        }
    }

    /// Build from a raw token. Only `1` and `true` (any case) are truthy.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.eq_ignore_ascii_case("true") {
            Self::from_bool(true)
        } else if text.eq_ignore_ascii_case("false") {
            Self::from_bool(false)
        } else {
            Self {
                value: text == "1",
                text,
            }
        }
    }

    /// Boolean projection. Use for metric fields.
    pub fn value(&self) -> bool {
        self.value
    }

    /// Textual projection. Use for metric tags.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for FlexBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for FlexBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlexBoolVisitor)
    }
}

struct FlexBoolVisitor;

impl<'de> Visitor<'de> for FlexBoolVisitor {
    type Value = FlexBool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, a number, a string, or an empty array")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(FlexBool::from_bool(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(FlexBool::from_text(format_number(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(FlexBool::from_text(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(FlexBool::from_text(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(FlexBool::from_text(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(FlexBool::from_text(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        expect_empty_seq(seq, &self)?;
        Ok(FlexBool::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn number(json: &str) -> Result<FlexNumber, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn flag(json: &str) -> Result<FlexBool, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn number_from_json_number_derives_text() {
        let n = number("1234").unwrap();
        assert_eq!(n.number(), 1234.0);
        assert_eq!(n.text(), "1234");

        let n = number("0.25").unwrap();
        assert_eq!(n.number(), 0.25);
        assert_eq!(n.text(), "0.25");
    }

    #[test]
    fn number_text_has_no_trailing_zeros_or_exponent() {
        assert_eq!(number("12.0").unwrap().text(), "12");
        assert_eq!(number("1e21").unwrap().text(), "1000000000000000000000");
        assert_eq!(number("-3.50").unwrap().text(), "-3.5");
    }

    #[test]
    fn number_text_round_trips() {
        for raw in ["0", "1", "-17", "3.141592653589793", "1e-7", "123456789012", "0.1"] {
            let n = number(raw).unwrap();
            let reparsed: f64 = n.text().parse().unwrap();
            assert!(
                (reparsed - n.number()).abs() <= f64::EPSILON * n.number().abs().max(1.0),
                "{raw} -> {} did not round-trip",
                n.text()
            );
        }
    }

    #[test]
    fn number_from_numeric_string() {
        let n = number(r#""0.42""#).unwrap();
        assert_eq!(n.number(), 0.42);
        assert_eq!(n.text(), "0.42");
    }

    #[test]
    fn number_from_non_numeric_string_keeps_text() {
        let n = number(r#""ugw4""#).unwrap();
        assert_eq!(n.number(), 0.0);
        assert_eq!(n.text(), "ugw4");
    }

    #[test]
    fn number_non_finite_text_is_zero() {
        assert_eq!(number(r#""NaN""#).unwrap().number(), 0.0);
        assert_eq!(number(r#""inf""#).unwrap().number(), 0.0);
    }

    #[test]
    fn number_from_empty_array_is_zero() {
        assert_eq!(number("[]").unwrap(), FlexNumber::default());
    }

    #[test]
    fn number_rejects_other_shapes() {
        for bad in ["{}", "[1]", "true", "null"] {
            let err = number(bad).unwrap_err();
            assert!(
                err.to_string().contains("expected a number"),
                "{bad}: unexpected message {err}"
            );
        }
    }

    #[test]
    fn flag_from_bool_and_text() {
        let f = flag("true").unwrap();
        assert!(f.value());
        assert_eq!(f.text(), "true");

        let f = flag(r#""1""#).unwrap();
        assert!(f.value());
        assert_eq!(f.text(), "1");

        let f = flag(r#""TRUE""#).unwrap();
        assert!(f.value());
        assert_eq!(f.text(), "true");
        assert_eq!(f, flag("true").unwrap());

        let f = flag(r#""False""#).unwrap();
        assert!(!f.value());
        assert_eq!(f.text(), "false");

        let f = flag(r#""yes""#).unwrap();
        assert!(!f.value());
        assert_eq!(f.text(), "yes");
    }

    #[test]
    fn flag_from_number() {
        assert!(flag("1").unwrap().value());
        assert!(!flag("0").unwrap().value());
        assert_eq!(flag("0").unwrap().text(), "0");
    }

    #[test]
    fn flag_from_empty_array_is_false() {
        assert_eq!(flag("[]").unwrap(), FlexBool::default());
    }

    #[test]
    fn flag_rejects_objects() {
        assert!(flag("{}").is_err());
        assert!(flag("null").is_err());
    }
}
