use crate::models::HealthRes;

/// Health check shared by the REST binaries.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Reports the service as alive. The service holds no external connections, so being
    /// able to answer is the whole check.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Ward service is alive".into(),
        }
    }
}
