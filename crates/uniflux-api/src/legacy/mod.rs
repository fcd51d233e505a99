// Legacy API client modules
//
// Cookie-session client for the controller's `stat/` endpoints, wrapped in
// the standard `{ meta: { rc, msg }, data: [...] }` envelope.

pub mod auth;
pub mod client;
pub mod devices;
pub mod models;

pub use client::LegacyClient;
