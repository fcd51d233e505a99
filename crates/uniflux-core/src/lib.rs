//! Projection of decoded UniFi device records into time-series points.
//!
//! - **[`Projector`]** walks one [`Device`](uniflux_api::Device) and yields
//!   its series in a fixed order: `usg`, `usw`, then one `usg_networks` per
//!   network entry and one `usw_ports` per port.
//! - **[`registry`]** holds the static tag and field tables. Their keys are
//!   what downstream dashboards query.
//! - **[`PointSink`]** is the only seam to a metrics backend. [`SeriesSink`]
//!   validates each series and hands it back unchanged.

pub mod project;
pub mod registry;
pub mod series;
pub mod sink;

// ── Primary re-exports ──────────────────────────────────────────────
pub use project::{ProjectionError, Projector, SeriesIter};
pub use registry::DeviceContext;
pub use series::{FieldValue, Fields, Series, Tags};
pub use sink::{PointSink, SeriesSink, SinkError};
