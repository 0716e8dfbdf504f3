//! Process-local admin directory.

use parkgolf_core::errors::LookupError;
use parkgolf_models::{Admin, AdminId, AdminRecord, CompanyId};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

use super::AdminDirectory;

#[derive(Debug, Clone)]
struct Entry {
    admin: Admin,
    password: String,
}

/// Admin directory held in memory.
///
/// Can simulate a slow or unreachable identity service with
/// [`with_latency`](Self::with_latency) and
/// [`set_available`](Self::set_available).
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    entries: RwLock<BTreeMap<AdminId, Entry>>,
    revoked: RwLock<Vec<AdminId>>,
    next_id: AtomicI64,
    latency: Option<Duration>,
    unavailable: AtomicBool,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// When `false`, every call fails with [`LookupError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Inserts an admin with a known id, replacing any existing one.
    pub async fn insert(&self, admin: Admin, password: impl Into<String>) {
        let id = admin.id();
        self.next_id.fetch_max(id.get(), Ordering::SeqCst);
        self.entries.write().await.insert(
            id,
            Entry {
                admin,
                password: password.into(),
            },
        );
    }

    /// Ids whose sessions were revoked, in order.
    pub async fn revoked(&self) -> Vec<AdminId> {
        self.revoked.read().await.clone()
    }

    async fn enter(&self) -> Result<(), LookupError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LookupError::Unavailable(
                "in-memory directory switched off".to_string(),
            ));
        }
        Ok(())
    }
}

impl AdminDirectory for InMemoryDirectory {
    async fn find_by_id(&self, id: AdminId) -> Result<Admin, LookupError> {
        self.enter().await?;
        self.entries
            .read()
            .await
            .get(&id)
            .map(|e| e.admin.clone())
            .ok_or(LookupError::NotFound)
    }

    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AdminId, LookupError> {
        self.enter().await?;
        self.entries
            .read()
            .await
            .values()
            .find(|e| e.admin.username() == username && e.password == password)
            .map(|e| e.admin.id())
            .ok_or(LookupError::NotFound)
    }

    async fn revoke_session(&self, id: AdminId) -> Result<(), LookupError> {
        self.enter().await?;
        self.revoked.write().await.push(id);
        Ok(())
    }

    async fn list(&self, company_id: Option<CompanyId>) -> Result<Vec<Admin>, LookupError> {
        self.enter().await?;
        Ok(self
            .entries
            .read()
            .await
            .values()
            .filter(|e| company_id.is_none() || e.admin.company_id() == company_id)
            .map(|e| e.admin.clone())
            .collect())
    }

    async fn create(&self, admin: Admin, password: &str) -> Result<Admin, LookupError> {
        self.enter().await?;
        let mut entries = self.entries.write().await;
        if entries.values().any(|e| e.admin.username() == admin.username()) {
            return Err(LookupError::Internal(format!(
                "Username {} is already taken",
                admin.username()
            )));
        }

        let id = AdminId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut record = AdminRecord::from(admin);
        record.id = id;
        let admin = Admin::try_from(record).map_err(|e| LookupError::Internal(e.to_string()))?;

        entries.insert(
            id,
            Entry {
                admin: admin.clone(),
                password: password.to_string(),
            },
        );
        Ok(admin)
    }

    async fn update(&self, admin: Admin) -> Result<Admin, LookupError> {
        self.enter().await?;
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(&admin.id()).ok_or(LookupError::NotFound)?;
        entry.admin = admin.clone();
        Ok(admin)
    }

    async fn deactivate(&self, id: AdminId) -> Result<Admin, LookupError> {
        self.enter().await?;
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(&id).ok_or(LookupError::NotFound)?;
        entry.admin.deactivate();
        Ok(entry.admin.clone())
    }
}
