//! HTTP client layer — `DashboardHttp`, one method per endpoint.

pub mod client;

pub use client::DashboardHttp;
