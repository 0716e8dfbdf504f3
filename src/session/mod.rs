//! The signed-in admin.
//!
//! A [`SessionContext`] owns one session slot: either nobody is signed in
//! (anonymous) or exactly one validated, active [`Admin`] is. It is created
//! once and shared by handle (`Arc<SessionContext<..>>`).
//!
//! # Transitions
//!
//! ```text
//!              login / restore (found + active)
//!  Anonymous ───────────────────────────────────► Authenticated
//!      ▲                                               │
//!      └───────────────────── logout ──────────────────┘
//! ```
//!
//! A login while authenticated replaces the current admin. A failed login
//! leaves the slot untouched.
//!
//! # Concurrency
//!
//! Lookups are single-flight: an async mutex lets one login or restore talk
//! to the directory at a time. Every login, restore, and logout takes a new
//! generation number, and an attempt only commits if its generation is still
//! the latest when the lookup resolves. A login overtaken by a newer login
//! or by a logout fails with [`AuthError::Superseded`] and changes nothing.
//! Logout never waits for an in-flight lookup.
//!
//! Readers get the slot through [`SessionContext::current`] or a
//! [`watch::Receiver`] from [`SessionContext::subscribe`]; they observe either
//! the value before a transition or the value after it, never a mix.
//!
//! Store writes happen under a separate storage lock, never under the slot's
//! write lock. A commit checks its generation, persists, and publishes while
//! holding that lock, and logout bumps the generation under it, so a
//! superseded attempt can neither publish nor leave keys behind.

use chrono::Utc;
use parkgolf_auth::engine;
use parkgolf_config::SessionConfig;
use parkgolf_core::errors::{AuthError, LookupError};
use parkgolf_core::permissions::Permission;
use parkgolf_models::{Admin, AdminId, DisplayInfo};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, MutexGuard, PoisonError};
use tokio::sync::{Mutex, watch};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::directory::AdminDirectory;

pub mod store;

pub use store::{FileSessionStore, InMemorySessionStore, SessionStore, StoreError};

/// Contents of the session slot.
pub type CurrentAdmin = Option<Arc<Admin>>;

enum Credentials<'a> {
    Id(AdminId),
    Password { username: &'a str, password: &'a str },
}

pub struct SessionContext<D, S> {
    directory: D,
    store: S,
    config: SessionConfig,
    slot: watch::Sender<CurrentAdmin>,
    generation: AtomicU64,
    flight: Mutex<()>,
    storage: std::sync::Mutex<()>,
}

impl<D: AdminDirectory, S: SessionStore> SessionContext<D, S> {
    /// Creates an anonymous session. Call [`restore`](Self::restore) to pick
    /// up a persisted session.
    pub fn new(directory: D, store: S, config: SessionConfig) -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            directory,
            store,
            config,
            slot,
            generation: AtomicU64::new(0),
            flight: Mutex::new(()),
            storage: std::sync::Mutex::new(()),
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The signed-in admin, if any.
    pub fn current(&self) -> CurrentAdmin {
        self.slot.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Change feed for the session slot.
    pub fn subscribe(&self) -> watch::Receiver<CurrentAdmin> {
        self.slot.subscribe()
    }

    pub fn display_info(&self) -> DisplayInfo {
        match self.current() {
            Some(admin) => admin.display_info(),
            None => DisplayInfo::anonymous(),
        }
    }

    /// Permission check against the signed-in admin. Anonymous has none.
    pub fn has_permission(&self, permission: Permission) -> bool {
        engine::has_permission(self.current().as_deref(), permission)
    }

    /// Signs in the admin with `id`.
    ///
    /// Unknown and inactive admins fail with the same generic error and
    /// leave the slot untouched.
    #[instrument(skip(self), fields(admin_id = %id))]
    pub async fn login(&self, id: AdminId) -> Result<Arc<Admin>, AuthError> {
        let generation = self.next_generation();
        let result = self.authenticate(generation, Credentials::Id(id)).await;
        record_login(&result);
        result
    }

    /// Signs in with a username and password resolved by the directory.
    #[instrument(skip(self, password))]
    pub async fn login_with_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Arc<Admin>, AuthError> {
        let generation = self.next_generation();
        let result = self
            .authenticate(generation, Credentials::Password { username, password })
            .await;
        record_login(&result);
        result
    }

    /// Restores the persisted session, if there is one.
    ///
    /// Returns `Ok(None)` when nothing is stored. When the stored admin is
    /// unknown or inactive the stale entry is cleared and the session becomes
    /// anonymous. Lookup failures are returned and the stored entry is kept.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Result<CurrentAdmin, AuthError> {
        let generation = self.next_generation();
        let _flight = self.flight.lock().await;
        self.ensure_current(generation)?;

        let stored = self
            .store
            .get(&self.config.admin_id_key)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let Some(stored) = stored else {
            return Ok(None);
        };

        let Ok(id) = stored.parse::<AdminId>() else {
            warn!(stored = %stored, "Discarding unparseable stored admin id");
            self.clear_if_current(generation);
            return Ok(None);
        };

        let lookup = self.directory.find_by_id(id).await;
        self.ensure_current(generation)?;

        let admin = match lookup {
            Ok(admin) if admin.is_active() => Arc::new(admin),
            Ok(_) | Err(LookupError::NotFound) => {
                info!(admin_id = %id, "Stored session is no longer valid");
                self.clear_if_current(generation);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        self.commit(generation, admin.clone(), None)?;
        info!(admin_id = %id, role = %admin.role(), "Session restored");
        Ok(Some(admin))
    }

    /// Signs out. Always succeeds locally; remote revocation is best effort.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let previous = {
            let _storage = self.lock_storage();
            let mut previous = None;
            self.slot.send_modify(|current| {
                self.generation.fetch_add(1, Ordering::SeqCst);
                previous = current.take();
            });
            self.clear_store();
            previous
        };
        metrics::counter!("admin_logouts_total").increment(1);

        if let Some(admin) = previous {
            info!(admin_id = %admin.id(), "Signed out");
            if let Err(e) = self.directory.revoke_session(admin.id()).await {
                warn!(admin_id = %admin.id(), error = %e, "Remote session revocation failed");
            }
        }
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn ensure_current(&self, generation: u64) -> Result<(), AuthError> {
        if self.generation.load(Ordering::SeqCst) == generation {
            Ok(())
        } else {
            Err(AuthError::Superseded)
        }
    }

    async fn authenticate(
        &self,
        generation: u64,
        credentials: Credentials<'_>,
    ) -> Result<Arc<Admin>, AuthError> {
        let _flight = self.flight.lock().await;
        self.ensure_current(generation)?;

        let id = match credentials {
            Credentials::Id(id) => id,
            Credentials::Password { username, password } => {
                let verified = self.directory.verify_credentials(username, password).await;
                self.ensure_current(generation)?;
                verified?
            }
        };

        let lookup = self.directory.find_by_id(id).await;
        self.ensure_current(generation)?;

        let mut admin = lookup?;
        if !admin.is_active() {
            return Err(AuthError::Inactive);
        }
        admin.touch_login(Utc::now());
        let admin = Arc::new(admin);

        let token = Uuid::new_v4().to_string();
        self.commit(generation, admin.clone(), Some(&token))?;
        info!(admin_id = %id, role = %admin.role(), "Signed in");
        Ok(admin)
    }

    /// Persists the session and publishes `admin` if `generation` is still
    /// the latest.
    ///
    /// A failed write removes whatever was already written, so storage never
    /// names an admin whose login failed.
    fn commit(
        &self,
        generation: u64,
        admin: Arc<Admin>,
        token: Option<&str>,
    ) -> Result<(), AuthError> {
        let _storage = self.lock_storage();
        self.ensure_current(generation)?;

        if let Err(e) = self.persist(admin.id(), token) {
            warn!(admin_id = %admin.id(), error = %e, "Failed to persist session");
            self.clear_store();
            return Err(AuthError::Internal(e.to_string()));
        }

        self.slot.send_replace(Some(admin));
        Ok(())
    }

    /// Writes the token before the id; restore keys off the id.
    fn persist(&self, id: AdminId, token: Option<&str>) -> Result<(), StoreError> {
        if let Some(token) = token {
            self.store.set(&self.config.access_token_key, token)?;
        }
        self.store.set(&self.config.admin_id_key, &id.to_string())
    }

    /// Drops a stale session, unless a newer transition already happened.
    fn clear_if_current(&self, generation: u64) {
        let _storage = self.lock_storage();
        if self.ensure_current(generation).is_err() {
            return;
        }
        self.clear_store();
        self.slot.send_if_modified(|current| current.take().is_some());
    }

    fn lock_storage(&self) -> MutexGuard<'_, ()> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn clear_store(&self) {
        for key in self.config.owned_keys() {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "Failed to clear session key");
            }
        }
    }
}

fn record_login(result: &Result<Arc<Admin>, AuthError>) {
    let outcome = match result {
        Ok(_) => "success",
        Err(e) if e.is_invalid_credentials() => "invalid",
        Err(AuthError::Unavailable(_)) => "unavailable",
        Err(AuthError::Superseded) => "superseded",
        Err(_) => "error",
    };
    metrics::counter!("admin_logins_total", "outcome" => outcome).increment(1);

    if let Err(e) = result {
        warn!(outcome, error = %e, "Login failed");
    }
}
