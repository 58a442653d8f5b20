//! Transport-agnostic dashboard state.
//!
//! `CoreState` is the single shared state the command layer works
//! against. It owns the local store, the session, the patient search
//! container and the appointment book.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::appointment::AppointmentBook;
use crate::config::DashboardConfig;
use crate::models::{CalendarAppointment, PatientRecord};
use crate::sample_data::{sample_appointments, sample_patients};
use crate::search::{SearchHistory, SearchState};
use crate::session::{SessionError, SessionService};
use crate::storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

/// Shared dashboard state, wrapped in `Arc` by the host.
///
/// Patient search sits behind a std `Mutex` (never held across an
/// await). The appointment book uses a tokio `Mutex` because status
/// updates hold it across the simulated call, so overlapping updates queue.
pub struct CoreState {
    pub config: DashboardConfig,
    store: Arc<dyn KeyValueStore>,
    session: SessionService,
    patient_search: Mutex<SearchState<PatientRecord>>,
    pub appointments: tokio::sync::Mutex<AppointmentBook>,
}

impl CoreState {
    /// Open the on-disk store, restore any stored session and generate the
    /// calendar around today.
    pub fn open(config: DashboardConfig) -> Result<Self, CoreError> {
        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&config.storage_path())?);
        let today = Local::now().date_naive();
        let appointments = sample_appointments(&mut StdRng::from_entropy(), today);
        let state = Self::with_store(config, store, sample_patients(), appointments);
        state.session.restore()?;
        tracing::info!(path = %state.config.storage_path().display(), "Dashboard state ready");
        Ok(state)
    }

    /// In-memory store, zero latency, calendar seeded around `today`.
    pub fn in_memory(seed: u64, today: NaiveDate) -> Self {
        let appointments = sample_appointments(&mut StdRng::seed_from_u64(seed), today);
        Self::with_store(
            DashboardConfig::for_tests(),
            Arc::new(MemoryStore::new()),
            sample_patients(),
            appointments,
        )
    }

    pub fn with_store(
        config: DashboardConfig,
        store: Arc<dyn KeyValueStore>,
        patients: Vec<PatientRecord>,
        appointments: Vec<CalendarAppointment>,
    ) -> Self {
        let history = SearchHistory::load(store.clone());
        let session = SessionService::new(store.clone(), config.simulated_latency);
        let book = AppointmentBook::new(appointments, config.simulated_latency);
        Self {
            patient_search: Mutex::new(SearchState::new(patients).with_history(history)),
            appointments: tokio::sync::Mutex::new(book),
            session,
            store,
            config,
        }
    }

    pub fn session(&self) -> &SessionService {
        &self.session
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Lock the patient search container.
    pub fn lock_patient_search(
        &self,
    ) -> Result<MutexGuard<'_, SearchState<PatientRecord>>, CoreError> {
        self.patient_search
            .lock()
            .map_err(|_| CoreError::LockPoisoned)
    }

    /// Look up one patient in the full roster.
    pub fn find_patient(&self, id: &str) -> Result<PatientRecord, CoreError> {
        let search = self.lock_patient_search()?;
        search
            .records()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CoreError::PatientNotFound(id.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════
// Error types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("Patient not found: {0}")]
    PatientNotFound(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}
