//! Service layer for the season ladder
//!
//! This module contains the application state, report generation, health
//! reporting and the HTTP front end.

pub mod app;
pub mod health;
pub mod report;
pub mod server;

pub use app::{AppState, RecordMatchRequest, SeasonReport, ServiceError};
pub use health::{HealthCheck, HealthStatus};
pub use report::{write_reports, ReportSummary};
pub use server::{router, HttpServer, HttpServerConfig};
