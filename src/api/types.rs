//! Shared state for the API layer.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::classify::{ConstantModel, OutcomeModel};

/// Shared context for all API routes: the injected store handle plus the
/// outcome model.
///
/// The connection sits behind a mutex; a handler holds the lock for the
/// whole of its store interaction. For the upload path that serializes
/// concurrent batches, which is what keeps per-patient cycle computation
/// free of duplicate cycle numbers.
#[derive(Clone)]
pub struct ApiContext {
    db: Arc<Mutex<Connection>>,
    pub model: Arc<dyn OutcomeModel>,
}

impl ApiContext {
    pub fn new(conn: Connection) -> Self {
        Self::with_model(conn, Arc::new(ConstantModel))
    }

    pub fn with_model(conn: Connection, model: Arc<dyn OutcomeModel>) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            model,
        }
    }

    /// Exclusive access to the store for the duration of one operation.
    pub fn lock_db(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("store lock poisoned".into()))
    }
}
