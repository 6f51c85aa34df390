// src/models/system.rs
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HealthStatus {
    Normal,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageGauge {
    pub usage: u32,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityGauge {
    pub usage: u32,
    pub total_gb: f64,
    pub used_gb: f64,
    pub status: HealthStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Uptime {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
}

impl std::fmt::Display for Uptime {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}d {}h {}m", self.days, self.hours, self.minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemMetrics {
    pub cpu: UsageGauge,
    pub memory: CapacityGauge,
    pub disk: CapacityGauge,
    pub uptime: Uptime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ServiceStatus {
    Running,
    Warning,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceHealth {
    pub name: String,
    pub status: ServiceStatus,
    pub response_time: String,
    pub uptime: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub timestamp: String,
    pub service: String,
}
