use crate::wire::HealthRes;

/// Health check shared by every EventEase server binary.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Returns a `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "EventEase is alive".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_health_reports_ok() {
        let res = HealthService::check_health();
        assert!(res.ok);
        assert_eq!(res.message, "EventEase is alive");
    }
}
