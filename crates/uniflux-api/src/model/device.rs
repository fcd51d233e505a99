// ── Device records from `stat/device` ──
//
// A UniFi Dream Machine style unit reports gateway and switch state in one
// object. Every field is optional on the wire; containers use
// `#[serde(default)]` so an absent key decodes to its zero value and unknown
// keys are ignored. Strings, lists and nested blocks also treat `null` as
// absent; only the flexible scalars reject it.

use serde::Deserialize;

use super::emptyable;
use super::flex::{FlexBool, FlexNumber};

/// One gateway/switch-class device.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Device {
    #[serde(rename = "_id", deserialize_with = "emptyable::nullable")]
    pub id: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub mac: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub name: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub model: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub serial: String,
    #[serde(rename = "type", deserialize_with = "emptyable::nullable")]
    pub device_type: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub version: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub ip: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub site_id: String,
    /// Not sent by the controller; filled in by whoever fetched the device.
    #[serde(deserialize_with = "emptyable::nullable")]
    pub site_name: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub device_id: String,
    pub adopted: FlexBool,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub cfgversion: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub known_cfgversion: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub inform_ip: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub connect_request_ip: String,
    pub connect_request_port: FlexNumber,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub guest_token: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub license_state: String,
    pub state: FlexNumber,
    pub uptime: FlexNumber,
    pub last_seen: FlexNumber,
    pub bytes: FlexNumber,
    pub rx_bytes: FlexNumber,
    pub tx_bytes: FlexNumber,
    pub fw_caps: FlexNumber,
    pub usg_caps: FlexNumber,
    #[serde(rename = "guest-num_sta")]
    pub guest_num_sta: FlexNumber,
    #[serde(rename = "user-num_sta")]
    pub user_num_sta: FlexNumber,
    pub num_desktop: FlexNumber,
    pub num_handheld: FlexNumber,
    pub num_mobile: FlexNumber,

    // Switch role
    pub locating: FlexBool,
    pub dot1x_portctrl_enabled: FlexBool,
    pub flowctrl_enabled: FlexBool,
    pub jumboframe_enabled: FlexBool,
    pub has_fan: FlexBool,
    pub has_temperature: FlexBool,
    pub overheating: FlexBool,
    pub fan_level: FlexNumber,
    pub general_temperature: FlexNumber,
    pub stp_priority: FlexNumber,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub stp_version: String,
    pub uplink_depth: FlexNumber,

    // Nested blocks
    #[serde(deserialize_with = "emptyable::object")]
    pub config_network: ConfigNetwork,
    #[serde(rename = "speedtest-status", deserialize_with = "emptyable::object")]
    pub speedtest_status: SpeedtestStatus,
    #[serde(rename = "speedtest-status-saved")]
    pub speedtest_status_saved: FlexBool,
    #[serde(deserialize_with = "emptyable::object")]
    pub sys_stats: SysStats,
    #[serde(rename = "system-stats", deserialize_with = "emptyable::object")]
    pub system_stats: SystemStats,
    #[serde(deserialize_with = "emptyable::object")]
    pub uplink: Uplink,
    #[serde(deserialize_with = "emptyable::object")]
    pub wan1: Wan,
    #[serde(deserialize_with = "emptyable::object")]
    pub wan2: Wan,
    #[serde(deserialize_with = "emptyable::object")]
    pub stat: DeviceStat,

    // Sub-collections
    #[serde(deserialize_with = "emptyable::nullable")]
    pub network_table: Vec<NetworkEntry>,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub port_table: Vec<PortEntry>,
}

/// Management network the device was provisioned with.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigNetwork {
    #[serde(rename = "type", deserialize_with = "emptyable::nullable")]
    pub network_type: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub ip: String,
}

/// Last speed test run by the gateway.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpeedtestStatus {
    pub latency: FlexNumber,
    pub rundate: FlexNumber,
    pub runtime: FlexNumber,
    pub status_download: FlexNumber,
    pub status_ping: FlexNumber,
    pub status_summary: FlexNumber,
    pub status_upload: FlexNumber,
    pub xput_download: FlexNumber,
    pub xput_upload: FlexNumber,
}

/// `sys_stats`: load averages and memory, often sent as strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SysStats {
    pub loadavg_1: FlexNumber,
    pub loadavg_5: FlexNumber,
    pub loadavg_15: FlexNumber,
    pub mem_buffer: FlexNumber,
    pub mem_total: FlexNumber,
    pub mem_used: FlexNumber,
}

/// `system-stats`: CPU and memory percentages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SystemStats {
    pub cpu: FlexNumber,
    pub mem: FlexNumber,
    pub uptime: FlexNumber,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Uplink {
    #[serde(deserialize_with = "emptyable::nullable")]
    pub name: String,
    pub latency: FlexNumber,
    pub speed: FlexNumber,
    pub max_speed: FlexNumber,
    pub num_port: FlexNumber,
}

/// A WAN interface (`wan1` / `wan2`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Wan {
    #[serde(deserialize_with = "emptyable::nullable")]
    pub name: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub ifname: String,
    #[serde(rename = "type", deserialize_with = "emptyable::nullable")]
    pub wan_type: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub ip: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub mac: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub gateway: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub netmask: String,
    pub enable: FlexBool,
    pub up: FlexBool,
    pub full_duplex: FlexBool,
    pub speed: FlexNumber,
    pub max_speed: FlexNumber,
    #[serde(rename = "bytes-r")]
    pub bytes_r: FlexNumber,
    pub rx_bytes: FlexNumber,
    #[serde(rename = "rx_bytes-r")]
    pub rx_bytes_r: FlexNumber,
    pub rx_dropped: FlexNumber,
    pub rx_errors: FlexNumber,
    pub rx_multicast: FlexNumber,
    pub rx_packets: FlexNumber,
    pub tx_bytes: FlexNumber,
    #[serde(rename = "tx_bytes-r")]
    pub tx_bytes_r: FlexNumber,
    pub tx_dropped: FlexNumber,
    pub tx_errors: FlexNumber,
    pub tx_packets: FlexNumber,
}

/// Per-role statistics. Either block is missing on disabled devices.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeviceStat {
    #[serde(deserialize_with = "emptyable::optional_object")]
    pub gw: Option<GatewayStat>,
    #[serde(deserialize_with = "emptyable::optional_object")]
    pub sw: Option<SwitchStat>,
}

/// Gateway-role counters (`stat.gw`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GatewayStat {
    #[serde(deserialize_with = "emptyable::nullable")]
    pub site_id: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub o: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub oid: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub gw: String,
    pub time: FlexNumber,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub datetime: String,
    pub duration: FlexNumber,
    #[serde(rename = "wan-rx_packets")]
    pub wan_rx_packets: FlexNumber,
    #[serde(rename = "wan-rx_bytes")]
    pub wan_rx_bytes: FlexNumber,
    #[serde(rename = "wan-rx_dropped")]
    pub wan_rx_dropped: FlexNumber,
    #[serde(rename = "wan-tx_packets")]
    pub wan_tx_packets: FlexNumber,
    #[serde(rename = "wan-tx_bytes")]
    pub wan_tx_bytes: FlexNumber,
    #[serde(rename = "lan-rx_packets")]
    pub lan_rx_packets: FlexNumber,
    #[serde(rename = "lan-rx_bytes")]
    pub lan_rx_bytes: FlexNumber,
    #[serde(rename = "lan-tx_packets")]
    pub lan_tx_packets: FlexNumber,
    #[serde(rename = "lan-tx_bytes")]
    pub lan_tx_bytes: FlexNumber,
}

/// Switch-role counters (`stat.sw`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SwitchStat {
    #[serde(deserialize_with = "emptyable::nullable")]
    pub site_id: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub o: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub oid: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub sw: String,
    pub time: FlexNumber,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub datetime: String,
    pub duration: FlexNumber,
    pub bytes: FlexNumber,
    pub rx_packets: FlexNumber,
    pub rx_bytes: FlexNumber,
    pub rx_errors: FlexNumber,
    pub rx_dropped: FlexNumber,
    pub rx_crypts: FlexNumber,
    pub rx_frags: FlexNumber,
    pub tx_packets: FlexNumber,
    pub tx_bytes: FlexNumber,
    pub tx_errors: FlexNumber,
    pub tx_dropped: FlexNumber,
    pub tx_retries: FlexNumber,
}

/// One row of `network_table`: a logical network routed by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkEntry {
    #[serde(rename = "_id", deserialize_with = "emptyable::nullable")]
    pub id: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub name: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub site_id: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub purpose: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub networkgroup: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub domain_name: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub ip: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub ip_subnet: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub mac: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub ipv6_interface_type: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub attr_hidden_id: String,
    pub attr_no_delete: FlexBool,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub dhcpd_start: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub dhcpd_stop: String,
    pub dhcpd_enabled: FlexBool,
    pub dhcpd_dns_enabled: FlexBool,
    pub dhcpd_gateway_enabled: FlexBool,
    pub dhcpd_time_offset_enabled: FlexBool,
    pub dhcp_relay_enabled: FlexBool,
    pub enabled: FlexBool,
    pub up: FlexBool,
    pub vlan_enabled: FlexBool,
    pub is_guest: FlexBool,
    pub is_nat: FlexBool,
    pub num_sta: FlexNumber,
    pub rx_bytes: FlexNumber,
    pub rx_packets: FlexNumber,
    pub tx_bytes: FlexNumber,
    pub tx_packets: FlexNumber,
}

/// One row of `port_table`: a physical switch port.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PortEntry {
    #[serde(deserialize_with = "emptyable::nullable")]
    pub name: String,
    pub port_idx: FlexNumber,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub portconf_id: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub media: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub op_mode: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub stp_state: String,
    pub stp_pathcost: FlexNumber,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub dot1x_mode: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub dot1x_status: String,
    pub aggregated_by: FlexBool,
    pub autoneg: FlexBool,
    pub enable: FlexBool,
    pub up: FlexBool,
    pub is_uplink: FlexBool,
    pub full_duplex: FlexBool,
    pub flowctrl_rx: FlexBool,
    pub flowctrl_tx: FlexBool,
    pub jumbo: FlexBool,
    pub masked: FlexBool,
    pub sfp_found: FlexBool,
    pub speed: FlexNumber,
    pub port_poe: FlexBool,
    pub poe_enable: FlexBool,
    pub poe_good: FlexBool,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub poe_mode: String,
    #[serde(deserialize_with = "emptyable::nullable")]
    pub poe_class: String,
    pub poe_caps: FlexNumber,
    pub poe_current: FlexNumber,
    pub poe_power: FlexNumber,
    pub poe_voltage: FlexNumber,
    #[serde(rename = "bytes-r")]
    pub bytes_r: FlexNumber,
    pub rx_broadcast: FlexNumber,
    pub rx_bytes: FlexNumber,
    #[serde(rename = "rx_bytes-r")]
    pub rx_bytes_r: FlexNumber,
    pub rx_dropped: FlexNumber,
    pub rx_errors: FlexNumber,
    pub rx_multicast: FlexNumber,
    pub rx_packets: FlexNumber,
    pub tx_broadcast: FlexNumber,
    pub tx_bytes: FlexNumber,
    #[serde(rename = "tx_bytes-r")]
    pub tx_bytes_r: FlexNumber,
    pub tx_dropped: FlexNumber,
    pub tx_errors: FlexNumber,
    pub tx_multicast: FlexNumber,
    pub tx_packets: FlexNumber,
}
