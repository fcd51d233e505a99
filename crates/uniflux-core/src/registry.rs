// ── Tag and field registries ──
//
// Each series is assembled from static tables of `(key, extractor)` pairs.
// Blocks that repeat (`wan1`/`wan2`, speedtest, uplink, switch stats) have
// one table applied under a key prefix. Keys are read by dashboards and must
// not change.

use uniflux_api::model::{
    Device, FlexBool, FlexNumber, GatewayStat, NetworkEntry, PortEntry, SpeedtestStatus,
    SwitchStat, Uplink, Wan,
};

use crate::series::{FieldValue, Fields, Tags};

/// Tag extractors for records of type `R`.
pub struct TagTable<R: 'static>(pub &'static [(&'static str, fn(&R) -> String)]);

/// Field extractors for records of type `R`.
pub struct FieldTable<R: 'static>(pub &'static [(&'static str, fn(&R) -> FieldValue)]);

impl<R> TagTable<R> {
    /// Insert every tag of `source`, each key prefixed with `prefix`.
    pub fn apply(&self, source: &R, prefix: &str, tags: &mut Tags) {
        for (key, extract) in self.0 {
            tags.insert(format!("{prefix}{key}"), extract(source));
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(key, _)| *key)
    }
}

impl<R> FieldTable<R> {
    /// Insert every field of `source`, each key prefixed with `prefix`.
    pub fn apply(&self, source: &R, prefix: &str, fields: &mut Fields) {
        for (key, extract) in self.0 {
            fields.insert(format!("{prefix}{key}"), extract(source));
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(key, _)| *key)
    }
}

/// Parent-device identity copied into every sub-record series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceContext {
    pub id: String,
    pub name: String,
    pub mac: String,
    pub site_id: String,
    pub site_name: String,
}

impl From<&Device> for DeviceContext {
    fn from(d: &Device) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            mac: d.mac.clone(),
            site_id: d.site_id.clone(),
            site_name: d.site_name.clone(),
        }
    }
}

// ── Extractor helpers ───────────────────────────────────────────────

fn num(v: &FlexNumber) -> FieldValue {
    FieldValue::Float(v.number())
}

fn flag(v: &FlexBool) -> FieldValue {
    FieldValue::Bool(v.value())
}

fn text(v: &str) -> FieldValue {
    FieldValue::Text(v.to_owned())
}

// ── Device: shared by `usg` and `usw` ───────────────────────────────

pub static DEVICE_TAGS: TagTable<Device> = TagTable(&[
    ("id", |d| d.id.clone()),
    ("mac", |d| d.mac.clone()),
    ("site_id", |d| d.site_id.clone()),
    ("site_name", |d| d.site_name.clone()),
    ("name", |d| d.name.clone()),
    ("adopted", |d| d.adopted.text().to_owned()),
    ("cfgversion", |d| d.cfgversion.clone()),
    ("config_network_ip", |d| d.config_network.ip.clone()),
    ("config_network_type", |d| d.config_network.network_type.clone()),
    ("device_id", |d| d.device_id.clone()),
    ("inform_ip", |d| d.inform_ip.clone()),
    ("known_cfgversion", |d| d.known_cfgversion.clone()),
    ("model", |d| d.model.clone()),
    ("serial", |d| d.serial.clone()),
    ("type", |d| d.device_type.clone()),
]);

pub static DEVICE_FIELDS: FieldTable<Device> = FieldTable(&[
    ("ip", |d| text(&d.ip)),
    ("bytes", |d| num(&d.bytes)),
    ("last_seen", |d| num(&d.last_seen)),
    ("license_state", |d| text(&d.license_state)),
    ("fw_caps", |d| num(&d.fw_caps)),
    ("guest-num_sta", |d| num(&d.guest_num_sta)),
    ("user-num_sta", |d| num(&d.user_num_sta)),
    ("rx_bytes", |d| num(&d.rx_bytes)),
    ("tx_bytes", |d| num(&d.tx_bytes)),
    ("uptime", |d| num(&d.uptime)),
    ("state", |d| num(&d.state)),
    ("version", |d| text(&d.version)),
    ("loadavg_1", |d| num(&d.sys_stats.loadavg_1)),
    ("loadavg_5", |d| num(&d.sys_stats.loadavg_5)),
    ("loadavg_15", |d| num(&d.sys_stats.loadavg_15)),
    ("mem_used", |d| num(&d.sys_stats.mem_used)),
    ("mem_buffer", |d| num(&d.sys_stats.mem_buffer)),
    ("mem_total", |d| num(&d.sys_stats.mem_total)),
    ("cpu", |d| num(&d.system_stats.cpu)),
    ("mem", |d| num(&d.system_stats.mem)),
    ("system_uptime", |d| num(&d.system_stats.uptime)),
]);

// ── Gateway role (`usg`) ────────────────────────────────────────────

pub static GATEWAY_TAGS: TagTable<Device> = TagTable(&[
    ("connect_request_ip", |d| d.connect_request_ip.clone()),
    ("connect_request_port", |d| d.connect_request_port.text().to_owned()),
    ("guest_token", |d| d.guest_token.clone()),
    ("usg_caps", |d| d.usg_caps.text().to_owned()),
    ("speedtest-status-saved", |d| d.speedtest_status_saved.text().to_owned()),
    ("wan1_up", |d| d.wan1.up.text().to_owned()),
    ("wan2_up", |d| d.wan2.up.text().to_owned()),
]);

pub static GATEWAY_FIELDS: FieldTable<Device> = FieldTable(&[
    ("num_desktop", |d| num(&d.num_desktop)),
    ("num_handheld", |d| num(&d.num_handheld)),
    ("num_mobile", |d| num(&d.num_mobile)),
    ("config_network_wan_type", |d| text(&d.config_network.network_type)),
]);

pub static GATEWAY_STAT_TAGS: TagTable<GatewayStat> =
    TagTable(&[("device_oid", |s| s.oid.clone())]);

pub static GATEWAY_STAT_FIELDS: FieldTable<GatewayStat> = FieldTable(&[
    ("gw", |s| text(&s.gw)),
    ("lan-rx_bytes", |s| num(&s.lan_rx_bytes)),
    ("lan-rx_packets", |s| num(&s.lan_rx_packets)),
    ("lan-tx_bytes", |s| num(&s.lan_tx_bytes)),
    ("lan-tx_packets", |s| num(&s.lan_tx_packets)),
    ("wan-rx_bytes", |s| num(&s.wan_rx_bytes)),
    ("wan-rx_dropped", |s| num(&s.wan_rx_dropped)),
    ("wan-rx_packets", |s| num(&s.wan_rx_packets)),
    ("wan-tx_bytes", |s| num(&s.wan_tx_bytes)),
    ("wan-tx_packets", |s| num(&s.wan_tx_packets)),
]);

/// Applied under `speedtest-status_`.
pub static SPEEDTEST_FIELDS: FieldTable<SpeedtestStatus> = FieldTable(&[
    ("latency", |s| num(&s.latency)),
    ("rundate", |s| num(&s.rundate)),
    ("runtime", |s| num(&s.runtime)),
    ("download", |s| num(&s.status_download)),
    ("ping", |s| num(&s.status_ping)),
    ("summary", |s| num(&s.status_summary)),
    ("upload", |s| num(&s.status_upload)),
    ("xput_download", |s| num(&s.xput_download)),
    ("xput_upload", |s| num(&s.xput_upload)),
]);

/// Applied under `wan1_` and `wan2_`.
pub static WAN_FIELDS: FieldTable<Wan> = FieldTable(&[
    ("bytes-r", |w| num(&w.bytes_r)),
    ("enable", |w| flag(&w.enable)),
    ("full_duplex", |w| flag(&w.full_duplex)),
    ("gateway", |w| text(&w.gateway)),
    ("ifname", |w| text(&w.ifname)),
    ("ip", |w| text(&w.ip)),
    ("mac", |w| text(&w.mac)),
    ("max_speed", |w| num(&w.max_speed)),
    ("name", |w| text(&w.name)),
    ("netmask", |w| text(&w.netmask)),
    ("rx_bytes", |w| num(&w.rx_bytes)),
    ("rx_bytes-r", |w| num(&w.rx_bytes_r)),
    ("rx_dropped", |w| num(&w.rx_dropped)),
    ("rx_errors", |w| num(&w.rx_errors)),
    ("rx_multicast", |w| num(&w.rx_multicast)),
    ("rx_packets", |w| num(&w.rx_packets)),
    ("type", |w| text(&w.wan_type)),
    ("speed", |w| num(&w.speed)),
    ("up", |w| flag(&w.up)),
    ("tx_bytes", |w| num(&w.tx_bytes)),
    ("tx_bytes-r", |w| num(&w.tx_bytes_r)),
    ("tx_dropped", |w| num(&w.tx_dropped)),
    ("tx_errors", |w| num(&w.tx_errors)),
    ("tx_packets", |w| num(&w.tx_packets)),
]);

/// Applied under `uplink_`.
pub static UPLINK_FIELDS: FieldTable<Uplink> = FieldTable(&[
    ("name", |u| text(&u.name)),
    ("latency", |u| num(&u.latency)),
    ("speed", |u| num(&u.speed)),
    ("num_ports", |u| num(&u.num_port)),
    ("max_speed", |u| num(&u.max_speed)),
]);

// ── Switch role (`usw`) ─────────────────────────────────────────────

pub static SWITCH_TAGS: TagTable<Device> = TagTable(&[
    ("locating", |d| d.locating.text().to_owned()),
    ("dot1x_portctrl_enabled", |d| d.dot1x_portctrl_enabled.text().to_owned()),
    ("flowctrl_enabled", |d| d.flowctrl_enabled.text().to_owned()),
    ("has_fan", |d| d.has_fan.text().to_owned()),
    ("has_temperature", |d| d.has_temperature.text().to_owned()),
    ("jumboframe_enabled", |d| d.jumboframe_enabled.text().to_owned()),
    ("stp_priority", |d| d.stp_priority.text().to_owned()),
    ("stp_version", |d| d.stp_version.clone()),
]);

pub static SWITCH_FIELDS: FieldTable<Device> = FieldTable(&[
    ("fan_level", |d| num(&d.fan_level)),
    ("general_temperature", |d| num(&d.general_temperature)),
    ("overheating", |d| flag(&d.overheating)),
    ("uplink_depth", |d| num(&d.uplink_depth)),
]);

pub static SWITCH_STAT_TAGS: TagTable<SwitchStat> =
    TagTable(&[("device_oid", |s| s.oid.clone())]);

/// Applied under `stat_`.
pub static SWITCH_STAT_FIELDS: FieldTable<SwitchStat> = FieldTable(&[
    ("bytes", |s| num(&s.bytes)),
    ("rx_bytes", |s| num(&s.rx_bytes)),
    ("rx_crypts", |s| num(&s.rx_crypts)),
    ("rx_dropped", |s| num(&s.rx_dropped)),
    ("rx_errors", |s| num(&s.rx_errors)),
    ("rx_frags", |s| num(&s.rx_frags)),
    ("rx_packets", |s| num(&s.rx_packets)),
    ("tx_bytes", |s| num(&s.tx_bytes)),
    ("tx_dropped", |s| num(&s.tx_dropped)),
    ("tx_errors", |s| num(&s.tx_errors)),
    ("tx_packets", |s| num(&s.tx_packets)),
    ("tx_retries", |s| num(&s.tx_retries)),
]);

// ── Network table (`usg_networks`) ──────────────────────────────────

pub static NETWORK_CONTEXT_TAGS: TagTable<DeviceContext> = TagTable(&[
    ("device_name", |c| c.name.clone()),
    ("device_id", |c| c.id.clone()),
    ("device_mac", |c| c.mac.clone()),
    ("site_name", |c| c.site_name.clone()),
]);

pub static NETWORK_TAGS: TagTable<NetworkEntry> = TagTable(&[
    ("site_id", |n| n.site_id.clone()),
    ("up", |n| n.up.text().to_owned()),
    ("dhcpd_dns_enabled", |n| n.dhcpd_dns_enabled.text().to_owned()),
    ("dhcpd_enabled", |n| n.dhcpd_enabled.text().to_owned()),
    ("dhcpd_time_offset_enabled", |n| n.dhcpd_time_offset_enabled.text().to_owned()),
    // Misspelled key is what existing dashboards query.
    ("dhcp_relay_enabledy", |n| n.dhcp_relay_enabled.text().to_owned()),
    ("dhcpd_gateway_enabled", |n| n.dhcpd_gateway_enabled.text().to_owned()),
    ("enabled", |n| n.enabled.text().to_owned()),
    ("vlan_enabled", |n| n.vlan_enabled.text().to_owned()),
    ("attr_no_delete", |n| n.attr_no_delete.text().to_owned()),
    ("is_guest", |n| n.is_guest.text().to_owned()),
    ("is_nat", |n| n.is_nat.text().to_owned()),
    ("networkgroup", |n| n.networkgroup.clone()),
]);

pub static NETWORK_FIELDS: FieldTable<NetworkEntry> = FieldTable(&[
    ("domain_name", |n| text(&n.domain_name)),
    ("dhcpd_start", |n| text(&n.dhcpd_start)),
    ("dhcpd_stop", |n| text(&n.dhcpd_stop)),
    ("ip", |n| text(&n.ip)),
    ("ip_subnet", |n| text(&n.ip_subnet)),
    ("mac", |n| text(&n.mac)),
    ("name", |n| text(&n.name)),
    ("num_sta", |n| num(&n.num_sta)),
    ("purpose", |n| text(&n.purpose)),
    ("rx_bytes", |n| num(&n.rx_bytes)),
    ("rx_packets", |n| num(&n.rx_packets)),
    ("tx_bytes", |n| num(&n.tx_bytes)),
    ("tx_packets", |n| num(&n.tx_packets)),
    ("ipv6_interface_type", |n| text(&n.ipv6_interface_type)),
    ("attr_hidden_id", |n| text(&n.attr_hidden_id)),
]);

// ── Port table (`usw_ports`) ────────────────────────────────────────

pub static PORT_CONTEXT_TAGS: TagTable<DeviceContext> = TagTable(&[
    ("site_id", |c| c.site_id.clone()),
    ("site_name", |c| c.site_name.clone()),
    ("device_name", |c| c.name.clone()),
]);

pub static PORT_TAGS: TagTable<PortEntry> = TagTable(&[
    ("name", |p| p.name.clone()),
    ("enable", |p| p.enable.text().to_owned()),
    ("is_uplink", |p| p.is_uplink.text().to_owned()),
    ("up", |p| p.up.text().to_owned()),
    ("portconf_id", |p| p.portconf_id.clone()),
    ("dot1x_mode", |p| p.dot1x_mode.clone()),
    ("dot1x_status", |p| p.dot1x_status.clone()),
    ("stp_state", |p| p.stp_state.clone()),
    ("sfp_found", |p| p.sfp_found.text().to_owned()),
    ("op_mode", |p| p.op_mode.clone()),
    ("poe_mode", |p| p.poe_mode.clone()),
    ("port_poe", |p| p.port_poe.text().to_owned()),
    ("port_idx", |p| p.port_idx.text().to_owned()),
    ("poe_enable", |p| p.poe_enable.text().to_owned()),
    ("flowctrl_rx", |p| p.flowctrl_rx.text().to_owned()),
    ("flowctrl_tx", |p| p.flowctrl_tx.text().to_owned()),
    ("autoneg", |p| p.autoneg.text().to_owned()),
    ("full_duplex", |p| p.full_duplex.text().to_owned()),
    ("jumbo", |p| p.jumbo.text().to_owned()),
    ("masked", |p| p.masked.text().to_owned()),
    ("poe_good", |p| p.poe_good.text().to_owned()),
    ("media", |p| p.media.clone()),
    ("poe_class", |p| p.poe_class.clone()),
    ("poe_caps", |p| p.poe_caps.text().to_owned()),
    ("aggregated_by", |p| p.aggregated_by.text().to_owned()),
]);

pub static PORT_FIELDS: FieldTable<PortEntry> = FieldTable(&[
    ("dbytes_r", |p| num(&p.bytes_r)),
    ("rx_broadcast", |p| num(&p.rx_broadcast)),
    ("rx_bytes", |p| num(&p.rx_bytes)),
    ("rx_bytes-r", |p| num(&p.rx_bytes_r)),
    ("rx_dropped", |p| num(&p.rx_dropped)),
    ("rx_errors", |p| num(&p.rx_errors)),
    ("rx_multicast", |p| num(&p.rx_multicast)),
    ("rx_packets", |p| num(&p.rx_packets)),
    ("speed", |p| num(&p.speed)),
    ("stp_pathcost", |p| num(&p.stp_pathcost)),
    ("tx_broadcast", |p| num(&p.tx_broadcast)),
    ("tx_bytes", |p| num(&p.tx_bytes)),
    ("tx_bytes-r", |p| num(&p.tx_bytes_r)),
    ("tx_dropped", |p| num(&p.tx_dropped)),
    ("tx_errors", |p| num(&p.tx_errors)),
    ("tx_multicast", |p| num(&p.tx_multicast)),
    ("tx_packets", |p| num(&p.tx_packets)),
    ("poe_current", |p| num(&p.poe_current)),
    ("poe_power", |p| num(&p.poe_power)),
    ("poe_voltage", |p| num(&p.poe_voltage)),
    ("full_duplex", |p| flag(&p.full_duplex)),
]);
