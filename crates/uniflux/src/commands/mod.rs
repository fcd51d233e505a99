//! Subcommand handlers and the decode-then-project step they share.

pub mod decode;
pub mod geo;
pub mod poll;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use uniflux_api::decode_device_value;
use uniflux_core::{Projector, Series, SeriesSink};

use crate::error::CliError;

/// Decode and project every raw device record.
///
/// A device that fails to decode is logged and skipped. A sink rejection
/// keeps the points built before it.
pub fn project_devices(raw: &[Value], site_name: &str, timestamp: DateTime<Utc>) -> Vec<Series> {
    let mut series = Vec::new();

    for (index, value) in raw.iter().enumerate() {
        let mut device = match decode_device_value(value) {
            Ok(device) => device,
            Err(e) => {
                warn!(index, error = %e, "skipping device that failed to decode");
                continue;
            }
        };
        device.site_name = site_name.to_owned();

        match Projector::points(&device, timestamp, &SeriesSink) {
            Ok(points) => series.extend(points),
            Err(e) => {
                warn!(device = %device.name, mac = %device.mac, error = %e, "series rejected");
                series.extend(e.emitted);
            }
        }
    }

    debug!(devices = raw.len(), series = series.len(), "projection complete");
    series
}

pub fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}
