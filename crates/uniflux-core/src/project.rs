// ── Point projector ──
//
// Flattens one decoded `Device` into its ordered series: `usg`, `usw`, one
// `usg_networks` per network entry, one `usw_ports` per port entry.

use std::error::Error;
use std::fmt;
use std::iter::FusedIterator;

use chrono::{DateTime, Utc};
use tracing::trace;
use uniflux_api::model::{Device, GatewayStat, NetworkEntry, PortEntry, SwitchStat};

use crate::registry::{
    DEVICE_FIELDS, DEVICE_TAGS, DeviceContext, GATEWAY_FIELDS, GATEWAY_STAT_FIELDS,
    GATEWAY_STAT_TAGS, GATEWAY_TAGS, NETWORK_CONTEXT_TAGS, NETWORK_FIELDS, NETWORK_TAGS,
    PORT_CONTEXT_TAGS, PORT_FIELDS, PORT_TAGS, SPEEDTEST_FIELDS, SWITCH_FIELDS,
    SWITCH_STAT_FIELDS, SWITCH_STAT_TAGS, SWITCH_TAGS, UPLINK_FIELDS, WAN_FIELDS,
};
use crate::series::{Fields, Series, Tags};
use crate::sink::PointSink;

pub const GATEWAY_SERIES: &str = "usg";
pub const SWITCH_SERIES: &str = "usw";
pub const NETWORK_SERIES: &str = "usg_networks";
pub const PORT_SERIES: &str = "usw_ports";

/// A sink refused a series. `emitted` holds the points built before it.
#[derive(Debug)]
pub struct ProjectionError<P> {
    pub series: String,
    pub position: usize,
    pub emitted: Vec<P>,
    pub source: Box<dyn Error + Send + Sync>,
}

impl<P> fmt::Display for ProjectionError<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sink rejected series `{}` at position {}: {}",
            self.series, self.position, self.source
        )
    }
}

impl<P: fmt::Debug> Error for ProjectionError<P> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.source)
    }
}

/// Entry point for device projection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Projector;

impl Projector {
    /// Lazily yield every series of `device`, stamped with `timestamp`.
    pub fn series(device: &Device, timestamp: DateTime<Utc>) -> SeriesIter<'_> {
        SeriesIter {
            device,
            context: DeviceContext::from(device),
            timestamp,
            stage: Stage::Gateway,
        }
    }

    /// Feed every series of `device` to `sink`, in order.
    ///
    /// Stops at the first rejection; the points built so far travel back in
    /// the error.
    pub fn points<S: PointSink>(
        device: &Device,
        timestamp: DateTime<Utc>,
        sink: &S,
    ) -> Result<Vec<S::Point>, ProjectionError<S::Point>> {
        let series = Self::series(device, timestamp);
        let mut emitted = Vec::with_capacity(series.len());

        for (position, s) in series.enumerate() {
            trace!(series = %s.name, position, tags = s.tags.len(), fields = s.fields.len(), "emitting series");
            match sink.build(&s.name, s.tags, s.fields, s.timestamp) {
                Ok(point) => emitted.push(point),
                Err(e) => {
                    return Err(ProjectionError {
                        series: s.name,
                        position,
                        emitted,
                        source: Box::new(e),
                    });
                }
            }
        }

        Ok(emitted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Gateway,
    Switch,
    Network(usize),
    Port(usize),
    Done,
}

/// Exact-size iterator over a device's series.
#[derive(Debug)]
pub struct SeriesIter<'a> {
    device: &'a Device,
    context: DeviceContext,
    timestamp: DateTime<Utc>,
    stage: Stage,
}

impl SeriesIter<'_> {
    fn remaining(&self) -> usize {
        let networks = self.device.network_table.len();
        let ports = self.device.port_table.len();
        match self.stage {
            Stage::Gateway => 2 + networks + ports,
            Stage::Switch => 1 + networks + ports,
            Stage::Network(i) => networks.saturating_sub(i) + ports,
            Stage::Port(i) => ports.saturating_sub(i),
            Stage::Done => 0,
        }
    }

    fn finish(&self, name: &str, tags: Tags, fields: Fields) -> Series {
        Series {
            name: name.to_owned(),
            tags,
            fields,
            timestamp: self.timestamp,
        }
    }

    fn gateway(&self) -> Series {
        let d = self.device;
        let fallback;
        let stat = if let Some(gw) = &d.stat.gw {
            gw
        } else {
            fallback = GatewayStat::default();
            &fallback
        };

        let mut tags = Tags::new();
        DEVICE_TAGS.apply(d, "", &mut tags);
        GATEWAY_TAGS.apply(d, "", &mut tags);
        GATEWAY_STAT_TAGS.apply(stat, "", &mut tags);

        let mut fields = Fields::new();
        DEVICE_FIELDS.apply(d, "", &mut fields);
        GATEWAY_FIELDS.apply(d, "", &mut fields);
        SPEEDTEST_FIELDS.apply(&d.speedtest_status, "speedtest-status_", &mut fields);
        WAN_FIELDS.apply(&d.wan1, "wan1_", &mut fields);
        WAN_FIELDS.apply(&d.wan2, "wan2_", &mut fields);
        GATEWAY_STAT_FIELDS.apply(stat, "", &mut fields);
        UPLINK_FIELDS.apply(&d.uplink, "uplink_", &mut fields);

        self.finish(GATEWAY_SERIES, tags, fields)
    }

    fn switch(&self) -> Series {
        let d = self.device;
        let fallback;
        let stat = if let Some(sw) = &d.stat.sw {
            sw
        } else {
            fallback = SwitchStat::default();
            &fallback
        };

        let mut tags = Tags::new();
        DEVICE_TAGS.apply(d, "", &mut tags);
        SWITCH_TAGS.apply(d, "", &mut tags);
        SWITCH_STAT_TAGS.apply(stat, "", &mut tags);

        let mut fields = Fields::new();
        DEVICE_FIELDS.apply(d, "", &mut fields);
        SWITCH_FIELDS.apply(d, "", &mut fields);
        SWITCH_STAT_FIELDS.apply(stat, "stat_", &mut fields);

        self.finish(SWITCH_SERIES, tags, fields)
    }

    fn network(&self, entry: &NetworkEntry) -> Series {
        let mut tags = Tags::new();
        NETWORK_CONTEXT_TAGS.apply(&self.context, "", &mut tags);
        NETWORK_TAGS.apply(entry, "", &mut tags);

        let mut fields = Fields::new();
        NETWORK_FIELDS.apply(entry, "", &mut fields);

        self.finish(NETWORK_SERIES, tags, fields)
    }

    fn port(&self, entry: &PortEntry) -> Series {
        let mut tags = Tags::new();
        PORT_CONTEXT_TAGS.apply(&self.context, "", &mut tags);
        PORT_TAGS.apply(entry, "", &mut tags);
        tags.insert(
            "port_id".into(),
            format!("{} Port {}", self.context.name, entry.port_idx.text()),
        );

        let mut fields = Fields::new();
        PORT_FIELDS.apply(entry, "", &mut fields);

        self.finish(PORT_SERIES, tags, fields)
    }
}

impl Iterator for SeriesIter<'_> {
    type Item = Series;

    fn next(&mut self) -> Option<Series> {
        loop {
            match self.stage {
                Stage::Gateway => {
                    self.stage = Stage::Switch;
                    return Some(self.gateway());
                }
                Stage::Switch => {
                    self.stage = Stage::Network(0);
                    return Some(self.switch());
                }
                Stage::Network(i) => {
                    if let Some(entry) = self.device.network_table.get(i) {
                        self.stage = Stage::Network(i + 1);
                        return Some(self.network(entry));
                    }
                    self.stage = Stage::Port(0);
                }
                Stage::Port(i) => {
                    if let Some(entry) = self.device.port_table.get(i) {
                        self.stage = Stage::Port(i + 1);
                        return Some(self.port(entry));
                    }
                    self.stage = Stage::Done;
                }
                Stage::Done => return None,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for SeriesIter<'_> {}

impl FusedIterator for SeriesIter<'_> {}
