// Legacy API device endpoint
//
// `stat/device` returns every adopted device of the site with full
// statistics. Two flavours: raw values for callers that want to skip a
// single undecodable device, and fully decoded records.

use serde_json::Value;
use tracing::debug;

use crate::decode::decode_devices_value;
use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::model::Device;

impl LegacyClient {
    /// List all devices as raw JSON objects.
    ///
    /// `GET /api/s/{site}/stat/device`
    pub async fn list_devices_raw(&self) -> Result<Vec<Value>, Error> {
        self.get_data("stat/device").await
    }

    /// List all devices, decoded.
    ///
    /// One undecodable device fails the whole list with the path of the
    /// first bad field (e.g. `[3].uptime`).
    pub async fn list_devices(&self) -> Result<Vec<Device>, Error> {
        let data = Value::Array(self.list_devices_raw().await?);
        let devices = decode_devices_value(&data)?;
        debug!(count = devices.len(), "decoded devices");
        Ok(devices)
    }
}
