//! Health check response DTOs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" when every component is healthy, otherwise "degraded".
    pub status: String,
    pub database: ComponentHealth,
    pub cache: ComponentHealth,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub healthy: bool,
    pub driver: String,
}
