// ── Object-or-empty-array blocks ──
//
// When a device (or a geo lookup) has nothing to report, the controller
// sends `[]` or `null` where it would normally send an object.
// `Emptyable<T>` accepts all three; the helper functions plug it into
// `#[serde(deserialize_with)]`.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use super::flex::FlexNumber;

/// An object of type `T`, or `[]`/`null` standing in for "no data".
#[derive(Debug, Clone, PartialEq)]
pub struct Emptyable<T>(Option<T>);

impl<T> Emptyable<T> {
    /// `true` if the source was an empty array or `null`.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn into_option(self) -> Option<T> {
        self.0
    }
}

impl<T: Default> Emptyable<T> {
    /// The decoded object, or `T::default()` if the source was `[]` or `null`.
    pub fn into_inner(self) -> T {
        self.0.unwrap_or_default()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Emptyable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EmptyableVisitor(PhantomData))
    }
}

struct EmptyableVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for EmptyableVisitor<T> {
    type Value = Emptyable<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object or an empty array")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        T::deserialize(de::value::MapAccessDeserializer::new(map)).map(|v| Emptyable(Some(v)))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        match seq.next_element::<de::IgnoredAny>()? {
            None => Ok(Emptyable(None)),
            Some(_) => Err(de::Error::invalid_type(de::Unexpected::Seq, &self)),
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Emptyable(None))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Emptyable(None))
    }
}

/// `deserialize_with` helper for blocks that default when sent as `[]` or `null`.
pub(crate) fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Emptyable::<T>::deserialize(deserializer).map(Emptyable::into_inner)
}

/// `deserialize_with` helper for blocks that may be absent, `null`, or `[]`.
pub(crate) fn optional_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Emptyable<T>>::deserialize(deserializer)?.and_then(Emptyable::into_option))
}

/// `deserialize_with` helper for strings and lists: `null` decodes to the
/// zero value instead of failing the whole record.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Integer field that also tolerates `[]` and numeric text.
///
/// Geo lookups send `asn` as a bare integer; anything that decodes as a
/// [`FlexNumber`] is accepted and truncated toward zero.
#[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
pub(crate) fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let flex = FlexNumber::deserialize(deserializer)?;
    Ok(flex.number().trunc() as i64)
}
