//! Session client and tolerant decoders for the UniFi controller legacy API.
//!
//! - **[`LegacyClient`]** logs in with a session cookie and fetches
//!   `stat/device`, unwrapping the `{ meta, data }` envelope.
//! - **[`model`]** holds the typed records. Counters that arrive as numbers,
//!   numeric strings or `[]` decode into [`FlexNumber`]; flags into
//!   [`FlexBool`]; blocks that may be sent as `[]` go through [`Emptyable`].
//! - **[`decode`]** turns raw bytes or values into records, reporting the
//!   dotted path of the first bad field.

pub mod auth;
pub mod decode;
pub mod error;
pub mod legacy;
pub mod model;
pub mod transport;

pub use auth::ControllerPlatform;
pub use decode::{
    DecodeError, JsonKind, decode_device, decode_device_value, decode_devices,
    decode_devices_value, decode_geo, decode_geo_value,
};
pub use error::Error;
pub use legacy::LegacyClient;
pub use model::{
    Device, DeviceStat, Emptyable, FlexBool, FlexNumber, GatewayStat, IpGeo, NetworkEntry,
    PortEntry, SwitchStat,
};
pub use transport::{TlsMode, TransportConfig};
