// ── Metrics sink capability ──
//
// The projector hands each series to a `PointSink` and keeps whatever point
// type it returns. Backends implement the trait; `SeriesSink` is the
// in-process implementation that validates and returns the series itself.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::series::{FieldValue, Fields, Series, Tags};

/// Builds a backend point from one series description.
pub trait PointSink {
    type Point;
    type Error: std::error::Error + Send + Sync + 'static;

    fn build(
        &self,
        name: &str,
        tags: Tags,
        fields: Fields,
        timestamp: DateTime<Utc>,
    ) -> Result<Self::Point, Self::Error>;
}

/// Why a series was refused.
#[derive(Debug, Error, PartialEq)]
pub enum SinkError {
    #[error("series name is empty")]
    EmptyName,

    #[error("series `{series}` has no fields")]
    NoFields { series: String },

    #[error("series `{series}` has an empty tag key")]
    EmptyTagKey { series: String },

    #[error("series `{series}` has an empty field key")]
    EmptyFieldKey { series: String },

    #[error("series `{series}` field `{field}` is not a finite number")]
    NonFinite { series: String, field: String },
}

/// Validating sink whose points are the [`Series`] themselves.
///
/// Applies the same checks a line-protocol writer would: a name, at least
/// one field, no empty keys and no NaN or infinite values.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesSink;

impl PointSink for SeriesSink {
    type Point = Series;
    type Error = SinkError;

    fn build(
        &self,
        name: &str,
        tags: Tags,
        fields: Fields,
        timestamp: DateTime<Utc>,
    ) -> Result<Series, SinkError> {
        let series = || name.to_owned();

        if name.is_empty() {
            return Err(SinkError::EmptyName);
        }
        if fields.is_empty() {
            return Err(SinkError::NoFields { series: series() });
        }
        if tags.keys().any(String::is_empty) {
            return Err(SinkError::EmptyTagKey { series: series() });
        }
        if fields.keys().any(String::is_empty) {
            return Err(SinkError::EmptyFieldKey { series: series() });
        }
        if let Some((field, _)) = fields
            .iter()
            .find(|(_, v)| matches!(v, FieldValue::Float(f) if !f.is_finite()))
        {
            return Err(SinkError::NonFinite {
                series: series(),
                field: field.clone(),
            });
        }

        Ok(Series {
            name: name.to_owned(),
            tags,
            fields,
            timestamp,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, FieldValue)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn builds_valid_series() {
        let now = Utc::now();
        let mut tags = Tags::new();
        tags.insert("site_name".into(), "default".into());

        let s = SeriesSink
            .build("usg", tags, fields(&[("uptime", 5.0.into())]), now)
            .unwrap();
        assert_eq!(s.name, "usg");
        assert_eq!(s.tag("site_name"), Some("default"));
        assert_eq!(s.timestamp, now);
    }

    #[test]
    fn rejects_empty_name_and_fields() {
        let now = Utc::now();
        assert_eq!(
            SeriesSink.build("", Tags::new(), fields(&[("a", 1.0.into())]), now),
            Err(SinkError::EmptyName)
        );
        assert_eq!(
            SeriesSink.build("usw", Tags::new(), Fields::new(), now),
            Err(SinkError::NoFields {
                series: "usw".into()
            })
        );
    }

    #[test]
    fn rejects_empty_keys() {
        let now = Utc::now();
        let mut tags = Tags::new();
        tags.insert(String::new(), "x".into());
        assert!(matches!(
            SeriesSink.build("usw", tags, fields(&[("a", 1.0.into())]), now),
            Err(SinkError::EmptyTagKey { .. })
        ));
        assert!(matches!(
            SeriesSink.build("usw", Tags::new(), fields(&[("", 1.0.into())]), now),
            Err(SinkError::EmptyFieldKey { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = SeriesSink
            .build(
                "usw_ports",
                Tags::new(),
                fields(&[("poe_power", f64::NAN.into())]),
                Utc::now(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            SinkError::NonFinite {
                series: "usw_ports".into(),
                field: "poe_power".into()
            }
        );
    }
}
