//! Translation dispatcher
//!
//! Runs translation jobs on a bounded pool with at most one live job per
//! caller key. Submitting for a key that already has a job marks the older
//! job stale. Cancellation is cooperative: a stale job is skipped if it has
//! not started, and its result is dropped if it has. Provider calls are never
//! interrupted.
//!
//! Results are not applied here. A finished, non-stale job is posted as
//! [`AppEvent::TranslationFinished`] and keeps its slot until the consumer
//! claims it with [`TranslationDispatcher::complete`], so a supersede or
//! cancel that lands between posting and applying still suppresses it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use lc_core::ports::TranslatorPort;
use lc_core::{EntryOrigin, TranslationRequest};
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, info_span, warn, Instrument};

use crate::event::{AppEvent, TranslationOutcome};

pub const DEFAULT_POOL_SIZE: usize = 3;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("dispatcher is shutting down")]
    ShuttingDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Running,
    Stale,
}

const QUEUED: u8 = 0;
const RUNNING: u8 = 1;
const STALE: u8 = 2;

#[derive(Debug)]
struct JobState {
    status: AtomicU8,
}

impl JobState {
    fn new() -> Self {
        Self {
            status: AtomicU8::new(QUEUED),
        }
    }

    fn status(&self) -> JobStatus {
        match self.status.load(Ordering::SeqCst) {
            QUEUED => JobStatus::Queued,
            RUNNING => JobStatus::Running,
            _ => JobStatus::Stale,
        }
    }

    fn mark_stale(&self) {
        self.status.store(STALE, Ordering::SeqCst);
    }

    fn is_stale(&self) -> bool {
        self.status.load(Ordering::SeqCst) == STALE
    }

    /// Queued → Running. Fails if the job went stale while waiting.
    fn try_start(&self) -> bool {
        self.status
            .compare_exchange(QUEUED, RUNNING, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

/// What to translate and which surface asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJob {
    pub request: TranslationRequest,
    pub origin: EntryOrigin,
}

impl TranslationJob {
    pub fn new(request: TranslationRequest, origin: EntryOrigin) -> Self {
        Self { request, origin }
    }
}

struct JobSlot {
    job_id: u64,
    state: Arc<JobState>,
}

type JobMap = Arc<Mutex<HashMap<String, JobSlot>>>;

/// Caller-side view of a submitted job.
#[derive(Debug, Clone)]
pub struct TranslationHandle {
    key: String,
    job_id: u64,
    state: Arc<JobState>,
}

impl TranslationHandle {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn job_id(&self) -> u64 {
        self.job_id
    }

    pub fn status(&self) -> JobStatus {
        self.state.status()
    }

    /// Suppress this job's result. A running provider call still finishes.
    pub fn cancel(&self) {
        self.state.mark_stale();
    }
}

pub struct TranslationDispatcher {
    translator: Arc<dyn TranslatorPort>,
    events: mpsc::Sender<AppEvent>,
    pool: Arc<Semaphore>,
    jobs: JobMap,
    next_job_id: AtomicU64,
    shutting_down: AtomicBool,
}

impl TranslationDispatcher {
    pub fn new(
        translator: Arc<dyn TranslatorPort>,
        events: mpsc::Sender<AppEvent>,
        pool_size: usize,
    ) -> Self {
        Self {
            translator,
            events,
            pool: Arc::new(Semaphore::new(pool_size.max(1))),
            jobs: Arc::new(Mutex::new(HashMap::new())),
            next_job_id: AtomicU64::new(1),
            shutting_down: AtomicBool::new(false),
        }
    }

    /// Schedule `job` under `key`, superseding any live job for that key.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(
        &self,
        key: impl Into<String>,
        job: TranslationJob,
    ) -> Result<TranslationHandle, DispatchError> {
        if self.shutting_down.load(Ordering::SeqCst) {
            return Err(DispatchError::ShuttingDown);
        }

        let key = key.into();
        let job_id = self.next_job_id.fetch_add(1, Ordering::SeqCst);
        let state = Arc::new(JobState::new());

        {
            let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(previous) = jobs.insert(
                key.clone(),
                JobSlot {
                    job_id,
                    state: state.clone(),
                },
            ) {
                previous.state.mark_stale();
                debug!(key = %key, superseded = previous.job_id, job_id, "superseded in-flight translation");
            }
        }

        let span = info_span!("dispatcher.job", key = %key, job_id);
        let worker = Worker {
            key: key.clone(),
            job_id,
            job,
            state: state.clone(),
            translator: self.translator.clone(),
            events: self.events.clone(),
            pool: self.pool.clone(),
            jobs: self.jobs.clone(),
        };
        tokio::spawn(worker.run().instrument(span));

        Ok(TranslationHandle { key, job_id, state })
    }

    pub fn translate_async(
        &self,
        key: impl Into<String>,
        text: impl Into<String>,
        src_lang: impl Into<String>,
        dest_lang: impl Into<String>,
        origin: EntryOrigin,
    ) -> Result<TranslationHandle, DispatchError> {
        let request = TranslationRequest::new(text, src_lang, dest_lang);
        self.submit(key, TranslationJob::new(request, origin))
    }

    /// Mark the live job for `key` stale. Returns whether there was one.
    pub fn cancel(&self, key: &str) -> bool {
        let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
        match jobs.remove(key) {
            Some(slot) => {
                slot.state.mark_stale();
                debug!(key, job_id = slot.job_id, "translation cancelled");
                true
            }
            None => false,
        }
    }

    /// Claim a delivered result. Returns true only if `job_id` is still the
    /// live, non-stale job for `key`; the slot is released either way.
    pub fn complete(&self, key: &str, job_id: u64) -> bool {
        let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
        match jobs.get(key) {
            Some(slot) if slot.job_id == job_id => {
                let current = !slot.state.is_stale();
                jobs.remove(key);
                current
            }
            _ => false,
        }
    }

    /// Number of keys with a job that is queued, running or awaiting
    /// [`TranslationDispatcher::complete`].
    pub fn in_flight(&self) -> usize {
        self.jobs.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Refuse new work and abandon queued and running jobs. Does not wait.
    pub fn shutdown(&self) {
        if self.shutting_down.swap(true, Ordering::SeqCst) {
            return;
        }
        self.pool.close();

        let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
        for slot in jobs.values() {
            slot.state.mark_stale();
        }
        let abandoned = jobs.len();
        jobs.clear();
        info!(abandoned, "translation dispatcher shut down");
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }
}

struct Worker {
    key: String,
    job_id: u64,
    job: TranslationJob,
    state: Arc<JobState>,
    translator: Arc<dyn TranslatorPort>,
    events: mpsc::Sender<AppEvent>,
    pool: Arc<Semaphore>,
    jobs: JobMap,
}

impl Worker {
    async fn run(self) {
        let _permit = match self.pool.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                debug!("pool closed before job started");
                self.release_slot();
                return;
            }
        };

        if !self.state.try_start() {
            debug!("job went stale while queued, skipped");
            self.release_slot();
            return;
        }

        let translation = self.translator.translate(&self.job.request).await;

        if self.state.is_stale() {
            debug!("job superseded or cancelled while running, result dropped");
            self.release_slot();
            return;
        }

        let outcome = TranslationOutcome {
            job_id: self.job_id,
            key: self.key.clone(),
            origin: self.job.origin,
            request: self.job.request.clone(),
            translation,
        };
        if self.events.send(AppEvent::TranslationFinished(outcome)).await.is_err() {
            warn!("event queue closed, translation result dropped");
            self.release_slot();
        }
    }

    fn release_slot(&self) {
        let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
        if jobs.get(&self.key).is_some_and(|s| s.job_id == self.job_id) {
            jobs.remove(&self.key);
        }
    }
}
