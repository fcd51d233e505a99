// ── Geo-IP lookup ──

use serde::{Deserialize, Serialize};

use super::emptyable;

/// Result of a geo-IP lookup.
///
/// Decode through [`decode_geo`](crate::decode::decode_geo), which accepts the
/// `[]` the controller sends when it has no geo data for an address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpGeo {
    #[serde(deserialize_with = "emptyable::integer")]
    pub asn: i64,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub city: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub continent_code: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub country_code: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub country_name: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub latitude: f64,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub longitude: f64,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub organization: String,
}
