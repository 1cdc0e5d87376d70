//! Backend availability probe

use crate::backend::api::BackendClient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AvailabilityState {
    #[default]
    Unknown,
    Available,
    Unavailable,
}

/// One-shot health check against the recommendation service.
/// Advisory only: nothing in the submission path waits on it.
#[derive(Clone)]
pub struct Prober {
    backend: BackendClient,
    healthy_status: String,
}

impl Prober {
    pub fn new(backend: BackendClient, healthy_status: &str) -> Self {
        Self {
            backend,
            healthy_status: healthy_status.to_string(),
        }
    }

    pub async fn probe(&self) -> AvailabilityState {
        match self.backend.health_check().await {
            Ok(health) if health.status == self.healthy_status => {
                tracing::info!("Backend at {} is available", self.backend.endpoint());
                AvailabilityState::Available
            }
            Ok(health) => {
                tracing::warn!(status = %health.status, "Backend reported unexpected health status");
                AvailabilityState::Unavailable
            }
            Err(e) => {
                tracing::warn!("Backend health check failed: {}", e);
                AvailabilityState::Unavailable
            }
        }
    }
}
