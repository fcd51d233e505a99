// ── Document decoding ──
//
// Every payload is parsed into a `serde_json::Value` first, then decoded
// field by field through serde. A failing field aborts the whole document;
// the error carries the dotted path to that field and the JSON kind that was
// found there, recovered by walking the same `Value`.

use serde::Deserialize;
use serde_json::Value;
use serde_path_to_error::{Path, Segment};
use strum::Display;
use thiserror::Error;

use crate::model::{Device, Emptyable, IpGeo};

/// The JSON type of a value, as reported in decode errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl From<&Value> for JsonKind {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

/// A payload that could not be turned into a typed record.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not JSON at all.
    #[error("malformed JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// A field holds a JSON type none of its accepted shapes allow.
    #[error("field `{path}`: unexpected {kind}: {message}")]
    Field {
        path: String,
        kind: JsonKind,
        message: String,
    },
}

impl DecodeError {
    /// Dotted path of the failing field, if the document was valid JSON.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Field { path, .. } => Some(path),
            Self::Syntax(_) => None,
        }
    }

    fn at(root: &Value, err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().clone();
        let kind = locate(root, &path).map_or(JsonKind::Null, JsonKind::from);
        Self::Field {
            path: path.to_string(),
            kind,
            message: err.into_inner().to_string(),
        }
    }
}

/// Follow a serde path back to the value it points at.
fn locate<'v>(root: &'v Value, path: &Path) -> Option<&'v Value> {
    path.iter().try_fold(root, |node, segment| match segment {
        Segment::Seq { index } => node.get(*index),
        Segment::Map { key } => node.get(key.as_str()),
        _ => None,
    })
}

fn parse(bytes: &[u8]) -> Result<Value, DecodeError> {
    serde_json::from_slice(bytes).map_err(DecodeError::Syntax)
}

/// Decode any record type from an already-parsed document.
pub fn decode_value<'v, T: Deserialize<'v>>(value: &'v Value) -> Result<T, DecodeError> {
    serde_path_to_error::deserialize(value).map_err(|err| DecodeError::at(value, err))
}

// ── Devices ─────────────────────────────────────────────────────────

/// Decode one device object.
pub fn decode_device(bytes: &[u8]) -> Result<Device, DecodeError> {
    decode_device_value(&parse(bytes)?)
}

pub fn decode_device_value(value: &Value) -> Result<Device, DecodeError> {
    decode_value(value)
}

/// Decode a device list. A bare object is accepted as a one-element list.
pub fn decode_devices(bytes: &[u8]) -> Result<Vec<Device>, DecodeError> {
    decode_devices_value(&parse(bytes)?)
}

pub fn decode_devices_value(value: &Value) -> Result<Vec<Device>, DecodeError> {
    match value {
        Value::Array(_) => decode_value(value),
        _ => decode_value(value).map(|device| vec![device]),
    }
}

// ── Geo ─────────────────────────────────────────────────────────────

/// Decode a geo-IP document. `[]` means "no geo data" and yields zero values.
pub fn decode_geo(bytes: &[u8]) -> Result<IpGeo, DecodeError> {
    decode_geo_value(&parse(bytes)?)
}

pub fn decode_geo_value(value: &Value) -> Result<IpGeo, DecodeError> {
    decode_value::<Emptyable<IpGeo>>(value).map(Emptyable::into_inner)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::{NetworkEntry, PortEntry};

    #[test]
    fn geo_from_object() {
        let geo = decode_geo(br#"{"asn": 123}"#).unwrap();
        assert_eq!(geo.asn, 123);
    }

    #[test]
    fn geo_from_empty_array() {
        let geo = decode_geo(b"[]").unwrap();
        assert_eq!(geo.asn, 0);
        assert_eq!(geo, IpGeo::default());
    }

    #[test]
    fn geo_full_document() {
        let geo = decode_geo(
            br#"{"asn": "7922", "city": "Denver", "country_code": "US",
                 "latitude": 39.7, "longitude": -104.9, "organization": "Comcast"}"#,
        )
        .unwrap();
        assert_eq!(geo.asn, 7922);
        assert_eq!(geo.city, "Denver");
        assert_eq!(geo.latitude, 39.7);
    }

    #[test]
    fn malformed_field_names_the_field() {
        let err = decode_device(br#"{"name": "udm", "uptime": {}}"#).unwrap_err();
        match err {
            DecodeError::Field { ref path, kind, .. } => {
                assert_eq!(path, "uptime");
                assert_eq!(kind, JsonKind::Object);
            }
            DecodeError::Syntax(_) => panic!("expected a field error, got {err:?}"),
        }
        assert!(err.to_string().contains("uptime"));
        assert!(err.to_string().contains("object"));
    }

    #[test]
    fn nested_failure_reports_full_path() {
        let doc = json!([
            {"name": "ok"},
            {"port_table": [{"port_idx": 1}, {"speed": [1000]}]}
        ]);
        let err = decode_devices_value(&doc).unwrap_err();
        assert_eq!(err.path(), Some("[1].port_table[1].speed"));
        assert!(matches!(err, DecodeError::Field { kind: JsonKind::Array, .. }));
    }

    #[test]
    fn boolean_in_counter_is_rejected() {
        let err = decode_device(br#"{"wan1": {"rx_bytes": true}}"#).unwrap_err();
        assert_eq!(err.path(), Some("wan1.rx_bytes"));
        assert!(matches!(err, DecodeError::Field { kind: JsonKind::Bool, .. }));
    }

    #[test]
    fn non_json_is_a_syntax_error() {
        let err = decode_device(b"<html>").unwrap_err();
        assert!(matches!(err, DecodeError::Syntax(_)));
        assert_eq!(err.path(), None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let device =
            decode_device(br#"{"name": "udm", "brand_new_field": {"x": [1, 2]}}"#).unwrap();
        assert_eq!(device.name, "udm");
    }

    #[test]
    fn absent_fields_are_zero() {
        let device = decode_device(b"{}").unwrap();
        assert_eq!(device.uptime.number(), 0.0);
        assert_eq!(device.uptime.text(), "");
        assert!(device.network_table.is_empty());
        assert!(device.stat.gw.is_none());
        assert!(device.stat.sw.is_none());
    }

    #[test]
    fn single_object_decodes_as_list() {
        let devices = decode_devices(br#"{"name": "udm"}"#).unwrap();
        assert_eq!(devices.len(), 1);
        assert!(decode_devices(b"[]").unwrap().is_empty());
    }

    #[test]
    fn array_tolerant_fields_accept_empty_arrays() {
        let device = decode_device(
            br#"{
                "uptime": [], "bytes": [], "adopted": [],
                "sys_stats": [], "system-stats": [], "speedtest-status": [],
                "uplink": [], "wan1": [], "wan2": {"rx_bytes": []},
                "config_network": [], "stat": {"gw": [], "sw": []},
                "network_table": [], "port_table": [{"speed": [], "up": []}]
            }"#,
        )
        .unwrap();
        assert_eq!(device.uptime.number(), 0.0);
        assert_eq!(device.wan2.rx_bytes.number(), 0.0);
        assert!(device.stat.gw.is_none());
        assert_eq!(device.port_table.len(), 1);
        assert!(!device.port_table[0].up.value());
    }

    const NETWORK_FLEX_KEYS: &[&str] = &[
        "attr_no_delete",
        "dhcpd_enabled",
        "dhcpd_dns_enabled",
        "dhcpd_gateway_enabled",
        "dhcpd_time_offset_enabled",
        "dhcp_relay_enabled",
        "enabled",
        "up",
        "vlan_enabled",
        "is_guest",
        "is_nat",
        "num_sta",
        "rx_bytes",
        "rx_packets",
        "tx_bytes",
        "tx_packets",
    ];

    const PORT_FLEX_KEYS: &[&str] = &[
        "port_idx",
        "stp_pathcost",
        "aggregated_by",
        "autoneg",
        "enable",
        "up",
        "is_uplink",
        "full_duplex",
        "flowctrl_rx",
        "flowctrl_tx",
        "jumbo",
        "masked",
        "sfp_found",
        "speed",
        "port_poe",
        "poe_enable",
        "poe_good",
        "poe_caps",
        "poe_current",
        "poe_power",
        "poe_voltage",
        "bytes-r",
        "rx_broadcast",
        "rx_bytes",
        "rx_bytes-r",
        "rx_dropped",
        "rx_errors",
        "rx_multicast",
        "rx_packets",
        "tx_broadcast",
        "tx_bytes",
        "tx_bytes-r",
        "tx_dropped",
        "tx_errors",
        "tx_multicast",
        "tx_packets",
    ];

    fn all_keys(keys: &[&str], value: &Value) -> Value {
        Value::Object(keys.iter().map(|k| ((*k).to_owned(), value.clone())).collect())
    }

    #[test]
    fn every_network_flex_field_accepts_empty_array() {
        let entry = all_keys(NETWORK_FLEX_KEYS, &json!([]));
        let device = decode_device_value(&json!({ "network_table": [entry] })).unwrap();
        assert_eq!(device.network_table[0], NetworkEntry::default());

        // Each key must be a real field, not an ignored unknown one.
        for key in NETWORK_FLEX_KEYS {
            let device =
                decode_device_value(&json!({ "network_table": [{ *key: 1 }] })).unwrap();
            assert_ne!(device.network_table[0], NetworkEntry::default(), "{key}");
        }
    }

    #[test]
    fn every_port_flex_field_accepts_empty_array() {
        let entry = all_keys(PORT_FLEX_KEYS, &json!([]));
        let device = decode_device_value(&json!({ "port_table": [entry] })).unwrap();
        assert_eq!(device.port_table[0], PortEntry::default());

        for key in PORT_FLEX_KEYS {
            let device = decode_device_value(&json!({ "port_table": [{ *key: 1 }] })).unwrap();
            assert_ne!(device.port_table[0], PortEntry::default(), "{key}");
        }
    }

    #[test]
    fn null_strings_lists_and_blocks_are_absent() {
        let device = decode_device(
            br#"{
                "name": "udm", "guest_token": null, "serial": null,
                "port_table": null, "uplink": null, "wan1": null,
                "config_network": null, "speedtest-status": null,
                "stat": null,
                "network_table": [{"name": null, "purpose": "corporate"}]
            }"#,
        )
        .unwrap();
        assert_eq!(device.name, "udm");
        assert_eq!(device.guest_token, "");
        assert_eq!(device.serial, "");
        assert!(device.port_table.is_empty());
        assert_eq!(device.uplink.name, "");
        assert_eq!(device.wan1.ip, "");
        assert!(device.stat.gw.is_none());
        assert_eq!(device.network_table[0].name, "");
        assert_eq!(device.network_table[0].purpose, "corporate");
    }

    #[test]
    fn null_counter_is_still_rejected() {
        let err = decode_device(br#"{"uptime": null}"#).unwrap_err();
        assert_eq!(err.path(), Some("uptime"));
        assert!(matches!(err, DecodeError::Field { kind: JsonKind::Null, .. }));
    }

    #[test]
    fn geo_tolerates_null_text() {
        let geo = decode_geo(br#"{"asn": 1, "city": null, "latitude": null}"#).unwrap();
        assert_eq!(geo.asn, 1);
        assert_eq!(geo.city, "");
        assert_eq!(geo.latitude, 0.0);
    }

    #[test]
    fn mixed_typing_across_firmware() {
        let device = decode_device(
            br#"{
                "_id": "5d1", "mac": "f0:9f:c2:00:00:01", "type": "udm",
                "uptime": "86400", "state": 1, "adopted": true,
                "sys_stats": {"loadavg_1": "0.42", "mem_total": 4096},
                "wan1": {"up": "true", "rx_bytes": 1.5e9, "max_speed": "1000"}
            }"#,
        )
        .unwrap();
        assert_eq!(device.id, "5d1");
        assert_eq!(device.device_type, "udm");
        assert_eq!(device.uptime.number(), 86400.0);
        assert_eq!(device.uptime.text(), "86400");
        assert_eq!(device.state.text(), "1");
        assert_eq!(device.adopted.text(), "true");
        assert_eq!(device.sys_stats.loadavg_1.number(), 0.42);
        assert_eq!(device.sys_stats.mem_total.text(), "4096");
        assert!(device.wan1.up.value());
        assert_eq!(device.wan1.rx_bytes.text(), "1500000000");
        assert_eq!(device.wan1.max_speed.number(), 1000.0);
    }
}
