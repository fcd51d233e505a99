// Typed records for legacy API telemetry.

pub mod device;
pub mod emptyable;
pub mod flex;
pub mod geo;

pub use device::{
    ConfigNetwork, Device, DeviceStat, GatewayStat, NetworkEntry, PortEntry, SpeedtestStatus,
    SwitchStat, SysStats, SystemStats, Uplink, Wan,
};
pub use emptyable::Emptyable;
pub use flex::{FlexBool, FlexNumber, format_number};
pub use geo::IpGeo;
