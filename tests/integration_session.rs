mod common;

use common::{PASSWORD, ids, session, session_with_latency};
use parkgolf_admin::directory::AdminDirectory;
use parkgolf_admin::session::{
    FileSessionStore, InMemorySessionStore, SessionContext, SessionStore, StoreError,
};
use parkgolf_config::SessionConfig;
use parkgolf_core::errors::{AuthError, INVALID_CREDENTIALS};
use parkgolf_core::permissions::Permission;
use parkgolf_models::AdminId;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_login_unknown_admin_stays_anonymous() {
    let session = session().await;
    let err = session.login(ids::UNKNOWN).await.unwrap_err();
    assert_eq!(err, AuthError::NotFound);
    assert_eq!(err.to_string(), INVALID_CREDENTIALS);
    assert!(session.current().is_none());
    assert!(session.store().is_empty().unwrap());
}

#[tokio::test]
async fn test_login_inactive_admin_stays_anonymous() {
    let session = session().await;
    let err = session.login(ids::INACTIVE_SUPPORT).await.unwrap_err();
    assert_eq!(err, AuthError::Inactive);
    assert_eq!(err.to_string(), INVALID_CREDENTIALS);
    assert!(session.current().is_none());
}

#[tokio::test]
async fn test_login_then_logout_clears_storage() {
    let session = session().await;
    let admin = session.login(ids::COMPANY_OWNER).await.unwrap();
    assert_eq!(admin.id(), ids::COMPANY_OWNER);
    assert_eq!(
        session.current().map(|a| a.id()),
        Some(ids::COMPANY_OWNER)
    );
    assert!(!session.store().is_empty().unwrap());

    session.logout().await;
    assert!(session.current().is_none());
    assert!(session.store().is_empty().unwrap());
    assert!(!session.has_permission(Permission::ManageAdmins));
    assert_eq!(
        session.directory().revoked().await,
        vec![ids::COMPANY_OWNER]
    );
}

#[tokio::test]
async fn test_failed_login_keeps_previous_admin() {
    let session = session().await;
    session.login(ids::COMPANY_OWNER).await.unwrap();
    assert!(session.login(ids::UNKNOWN).await.is_err());
    assert_eq!(
        session.current().map(|a| a.id()),
        Some(ids::COMPANY_OWNER)
    );
}

#[tokio::test]
async fn test_login_replaces_current_admin() {
    let session = session().await;
    session.login(ids::COMPANY_OWNER).await.unwrap();
    session.login(ids::STAFF).await.unwrap();
    assert_eq!(session.current().map(|a| a.id()), Some(ids::STAFF));
    assert_eq!(
        session.store().get("currentAdminId").unwrap().as_deref(),
        Some("8")
    );
}

#[tokio::test]
async fn test_logout_survives_revocation_failure() {
    let session = session().await;
    session.login(ids::STAFF).await.unwrap();
    session.directory().set_available(false);
    session.logout().await;
    assert!(session.current().is_none());
    assert!(session.store().is_empty().unwrap());
}

#[tokio::test]
async fn test_unavailable_directory_surfaces_error() {
    let session = session().await;
    session.directory().set_available(false);
    assert!(matches!(
        session.login(ids::STAFF).await,
        Err(AuthError::Unavailable(_))
    ));
    assert!(session.current().is_none());
}

#[tokio::test]
async fn test_login_with_credentials() {
    let session = session().await;
    let admin = session
        .login_with_credentials("admin8", PASSWORD)
        .await
        .unwrap();
    assert_eq!(admin.id(), ids::STAFF);

    let err = session
        .login_with_credentials("admin4", PASSWORD)
        .await
        .unwrap_err();
    assert!(err.is_invalid_credentials());
    assert_eq!(session.current().map(|a| a.id()), Some(ids::STAFF));
}

#[tokio::test]
async fn test_superseded_login_is_discarded() {
    let session = Arc::new(session_with_latency(Duration::from_millis(100)).await);

    let first = tokio::spawn({
        let session = session.clone();
        async move { session.login(ids::COMPANY_OWNER).await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = session.login(ids::STAFF).await;

    assert_eq!(first.await.unwrap().unwrap_err(), AuthError::Superseded);
    assert_eq!(second.unwrap().id(), ids::STAFF);
    assert_eq!(session.current().map(|a| a.id()), Some(ids::STAFF));
}

#[tokio::test]
async fn test_logout_during_inflight_login_wins() {
    let session = Arc::new(session_with_latency(Duration::from_millis(100)).await);

    let login = tokio::spawn({
        let session = session.clone();
        async move { session.login(ids::COMPANY_OWNER).await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    session.logout().await;

    assert_eq!(login.await.unwrap().unwrap_err(), AuthError::Superseded);
    assert!(session.current().is_none());
    assert!(session.store().is_empty().unwrap());
}

#[tokio::test]
async fn test_restore_from_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = SessionConfig {
        store_path: dir.path().join("session.json"),
        ..SessionConfig::default()
    };

    let first = SessionContext::new(
        common::seeded_directory(Duration::ZERO).await,
        FileSessionStore::open(&config.store_path).unwrap(),
        config.clone(),
    );
    first.login(ids::COMPANY_MANAGER).await.unwrap();
    drop(first);

    let second = SessionContext::new(
        common::seeded_directory(Duration::ZERO).await,
        FileSessionStore::open(&config.store_path).unwrap(),
        config.clone(),
    );
    assert!(second.current().is_none());
    let restored = second.restore().await.unwrap().unwrap();
    assert_eq!(restored.id(), ids::COMPANY_MANAGER);
    assert_eq!(
        second.current().map(|a| a.id()),
        Some(ids::COMPANY_MANAGER)
    );
}

#[tokio::test]
async fn test_restore_clears_stale_id() {
    let session = session().await;
    session.login(ids::STAFF).await.unwrap();
    session.directory().deactivate(ids::STAFF).await.unwrap();

    assert_eq!(session.restore().await.unwrap(), None);
    assert!(session.current().is_none());
    assert_eq!(session.store().get("currentAdminId").unwrap(), None);
}

#[tokio::test]
async fn test_restore_with_nothing_stored() {
    let session = session().await;
    assert_eq!(session.restore().await.unwrap(), None);
    assert!(session.current().is_none());
}

#[tokio::test]
async fn test_restore_keeps_stored_id_when_unavailable() {
    let session = session().await;
    session
        .store()
        .set("currentAdminId", &AdminId(5).to_string())
        .unwrap();
    session.directory().set_available(false);

    assert!(matches!(
        session.restore().await,
        Err(AuthError::Unavailable(_))
    ));
    assert_eq!(
        session.store().get("currentAdminId").unwrap().as_deref(),
        Some("5")
    );
}

/// Store that refuses writes to one key.
struct FailingStore {
    inner: InMemorySessionStore,
    failing_key: &'static str,
}

impl SessionStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if key == self.failing_key {
            return Err(StoreError::Io(std::io::Error::other("disk full")));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }
}

#[tokio::test]
async fn test_failed_persist_leaves_no_session_behind() {
    for failing_key in ["accessToken", "currentAdminId"] {
        let session = SessionContext::new(
            common::seeded_directory(Duration::ZERO).await,
            FailingStore {
                inner: InMemorySessionStore::new(),
                failing_key,
            },
            SessionConfig::default(),
        );

        assert!(matches!(
            session.login(ids::COMPANY_OWNER).await,
            Err(AuthError::Internal(_))
        ));
        assert!(session.current().is_none());
        assert!(session.store().inner.is_empty().unwrap(), "{}", failing_key);

        assert_eq!(session.restore().await.unwrap(), None);
        assert!(session.current().is_none());
    }
}

#[tokio::test]
async fn test_restore_overtaken_by_logout() {
    let session = Arc::new(session_with_latency(Duration::from_millis(100)).await);
    session
        .store()
        .set("currentAdminId", &ids::COMPANY_OWNER.to_string())
        .unwrap();

    let restore = tokio::spawn({
        let session = session.clone();
        async move { session.restore().await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    session.logout().await;

    assert_eq!(restore.await.unwrap(), Err(AuthError::Superseded));
    assert!(session.current().is_none());
    assert!(session.store().is_empty().unwrap());
}

#[tokio::test]
async fn test_restore_overtaken_by_login() {
    let session = Arc::new(session_with_latency(Duration::from_millis(100)).await);
    session
        .store()
        .set("currentAdminId", &ids::COMPANY_OWNER.to_string())
        .unwrap();

    let restore = tokio::spawn({
        let session = session.clone();
        async move { session.restore().await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    let login = session.login(ids::STAFF).await.unwrap();

    assert_eq!(restore.await.unwrap(), Err(AuthError::Superseded));
    assert_eq!(login.id(), ids::STAFF);
    assert_eq!(session.current().map(|a| a.id()), Some(ids::STAFF));
    assert_eq!(
        session.store().get("currentAdminId").unwrap().as_deref(),
        Some("8")
    );
}
