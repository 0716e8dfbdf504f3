//! Timeout tiers around a directory.
//!
//! Every call is classified into a [`TimeoutTier`] and bounded by the budget
//! configured for it. A call that runs past its budget fails with
//! [`LookupError::Unavailable`]. Outcomes are counted in
//! `directory_lookups_total{outcome}`.

use parkgolf_config::{GatewayConfig, TimeoutTier};
use parkgolf_core::errors::LookupError;
use parkgolf_models::{Admin, AdminId, CompanyId};
use std::future::Future;
use tracing::warn;

use super::AdminDirectory;

#[derive(Debug)]
pub struct TimedDirectory<D> {
    inner: D,
    config: GatewayConfig,
}

impl<D: AdminDirectory> TimedDirectory<D> {
    pub fn new(inner: D, config: GatewayConfig) -> Self {
        Self { inner, config }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    async fn call<T>(
        &self,
        operation: &'static str,
        tier: TimeoutTier,
        future: impl Future<Output = Result<T, LookupError>>,
    ) -> Result<T, LookupError> {
        let budget = self.config.timeout_for(tier);
        let result = match tokio::time::timeout(budget, future).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Unavailable(format!(
                "{} timed out after {}ms",
                operation,
                budget.as_millis()
            ))),
        };

        let outcome = match &result {
            Ok(_) => "ok",
            Err(LookupError::NotFound) => "not_found",
            Err(LookupError::Unavailable(_)) => "unavailable",
            Err(LookupError::Internal(_)) => "error",
        };
        metrics::counter!("directory_lookups_total", "outcome" => outcome).increment(1);

        if let Err(e @ (LookupError::Unavailable(_) | LookupError::Internal(_))) = &result {
            warn!(operation, error = %e, "Directory call failed");
        }

        result
    }
}

impl<D: AdminDirectory> AdminDirectory for TimedDirectory<D> {
    async fn find_by_id(&self, id: AdminId) -> Result<Admin, LookupError> {
        self.call("find_by_id", TimeoutTier::Quick, self.inner.find_by_id(id))
            .await
    }

    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AdminId, LookupError> {
        self.call(
            "verify_credentials",
            TimeoutTier::Quick,
            self.inner.verify_credentials(username, password),
        )
        .await
    }

    async fn revoke_session(&self, id: AdminId) -> Result<(), LookupError> {
        self.call(
            "revoke_session",
            TimeoutTier::Quick,
            self.inner.revoke_session(id),
        )
        .await
    }

    async fn list(&self, company_id: Option<CompanyId>) -> Result<Vec<Admin>, LookupError> {
        self.call("list", TimeoutTier::List, self.inner.list(company_id))
            .await
    }

    async fn create(&self, admin: Admin, password: &str) -> Result<Admin, LookupError> {
        self.call(
            "create",
            TimeoutTier::Quick,
            self.inner.create(admin, password),
        )
        .await
    }

    async fn update(&self, admin: Admin) -> Result<Admin, LookupError> {
        self.call("update", TimeoutTier::Quick, self.inner.update(admin))
            .await
    }

    async fn deactivate(&self, id: AdminId) -> Result<Admin, LookupError> {
        self.call("deactivate", TimeoutTier::Quick, self.inner.deactivate(id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryDirectory;
    use parkgolf_models::{AdminRecord, Role};
    use std::time::Duration;

    fn config(quick_ms: u64) -> GatewayConfig {
        GatewayConfig {
            quick_timeout: Duration::from_millis(quick_ms),
            ..GatewayConfig::default()
        }
    }

    async fn seeded(latency: Duration) -> InMemoryDirectory {
        let directory = InMemoryDirectory::new().with_latency(latency);
        let admin =
            Admin::try_from(AdminRecord::new(AdminId(1), "owner", Role::PlatformOwner)).unwrap();
        directory.insert(admin, "pw").await;
        directory
    }

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let directory = TimedDirectory::new(seeded(Duration::ZERO).await, config(1_000));
        assert!(directory.find_by_id(AdminId(1)).await.is_ok());
        assert_eq!(
            directory.find_by_id(AdminId(2)).await,
            Err(LookupError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_slow_call_is_unavailable() {
        let directory = TimedDirectory::new(seeded(Duration::from_millis(200)).await, config(10));
        assert!(matches!(
            directory.find_by_id(AdminId(1)).await,
            Err(LookupError::Unavailable(_))
        ));
    }
}
