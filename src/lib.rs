//! Debris Defense Simulator Library
//!
//! A mock space-debris defense loop: a spacecraft drifting through a ring of
//! debris, radar proximity classification with rate-limited alerts, optional
//! AI steering, and a mock telemetry dashboard.
//!
//! Drawing goes through the [`render::RenderSurface`] trait and alerts through
//! [`notification::NotificationSink`], so any host can drive the loop. The
//! [`runner`] module is a headless tokio host.

pub mod config;
pub mod dashboard;
pub mod metrics;
pub mod mission;
pub mod notification;
pub mod render;
pub mod runner;
pub mod sim;
pub mod util;
