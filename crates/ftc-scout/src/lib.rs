//! Scoring engine, entry storage, and analytics for FTC DECODE match scouting.

pub mod analytics;
pub mod config;
pub mod entries;
pub mod error;
pub mod scoring;
pub mod telemetry;
