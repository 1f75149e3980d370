//! Write-through of session events to the stores.
//!
//! The session applies every transition locally first and then submits a
//! `PersistJob`. Jobs run detached from the transition: an outcome only comes
//! back as a `JobOutcome` the event loop logs, and a failure never touches
//! session state.

use super::backend::KeyValueBackend;
use super::records::{
    AchievementFilter, AchievementPatch, AchievementRecord, CatchRecord, StatsFilter, StatsRecord,
};
use super::store::{BlobStore, Store, StoreError};
use crate::achievements::{get_achievement_def, AchievementId};
use crate::core::constants::PERSIST_SHUTDOWN_GRACE_MS;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// The three stores the game writes to.
pub struct Stores {
    pub catches: Box<dyn Store<CatchRecord>>,
    pub stats: Box<dyn Store<StatsRecord>>,
    pub achievements: Box<dyn Store<AchievementRecord>>,
}

impl Stores {
    /// Blob stores sharing one backend.
    pub fn on_backend<B: KeyValueBackend + Clone + 'static>(backend: B) -> Self {
        Self {
            catches: Box::new(BlobStore::<CatchRecord, B>::new(backend.clone())),
            stats: Box::new(BlobStore::<StatsRecord, B>::new(backend.clone())),
            achievements: Box::new(BlobStore::<AchievementRecord, B>::new(backend)),
        }
    }
}

/// A deferred store write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistJob {
    RecordCatch(CatchRecord),
    /// Create-or-update of the owner's single stats record
    SaveStats(StatsRecord),
    UnlockAchievement {
        achievement_id: AchievementId,
        unlocked_at: i64,
    },
}

impl PersistJob {
    pub fn kind(&self) -> &'static str {
        match self {
            PersistJob::RecordCatch(_) => "record_catch",
            PersistJob::SaveStats(_) => "save_stats",
            PersistJob::UnlockAchievement { .. } => "unlock_achievement",
        }
    }
}

/// Completion report for one job.
#[derive(Debug)]
pub struct JobOutcome {
    pub kind: &'static str,
    pub result: Result<(), StoreError>,
}

/// Runs one job against the stores.
pub fn execute_job(stores: &mut Stores, owner: &str, job: PersistJob) -> Result<(), StoreError> {
    match job {
        PersistJob::RecordCatch(mut record) => {
            record.owner = owner.to_string();
            stores.catches.create(record)?;
        }
        PersistJob::SaveStats(mut stats) => {
            stats.owner = owner.to_string();
            let existing = stores.stats.filter(&StatsFilter::owned_by(owner))?;
            match existing.first() {
                Some(current) => {
                    stores.stats.update(&current.id, stats.to_patch())?;
                }
                None => {
                    stores.stats.create(stats)?;
                }
            }
        }
        PersistJob::UnlockAchievement {
            achievement_id,
            unlocked_at,
        } => {
            let filter = AchievementFilter::owned_by(owner).with_id(achievement_id);
            let existing = stores.achievements.filter(&filter)?;
            match existing.first() {
                Some(record) if record.unlocked => {}
                Some(record) => {
                    stores
                        .achievements
                        .update(&record.id, AchievementPatch::unlock(unlocked_at))?;
                }
                None => {
                    // Seeding never reached the store; write the unlocked record directly
                    if let Some(def) = get_achievement_def(achievement_id) {
                        let mut record = AchievementRecord::locked(owner, def);
                        record.unlocked = true;
                        record.unlocked_at = Some(unlocked_at);
                        stores.achievements.create(record)?;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Where the session sends its jobs.
pub trait PersistenceSink {
    fn submit(&mut self, job: PersistJob);

    /// Outcomes completed since the last call.
    fn drain_outcomes(&mut self) -> Vec<JobOutcome>;
}

/// Executes jobs on the caller's thread as they are submitted.
pub struct InlineWriter {
    stores: Stores,
    owner: String,
    outcomes: Vec<JobOutcome>,
}

impl InlineWriter {
    pub fn new(stores: Stores, owner: impl Into<String>) -> Self {
        Self {
            stores,
            owner: owner.into(),
            outcomes: Vec::new(),
        }
    }
}

impl PersistenceSink for InlineWriter {
    fn submit(&mut self, job: PersistJob) {
        let kind = job.kind();
        let result = execute_job(&mut self.stores, &self.owner, job);
        self.outcomes.push(JobOutcome { kind, result });
    }

    fn drain_outcomes(&mut self) -> Vec<JobOutcome> {
        std::mem::take(&mut self.outcomes)
    }
}

/// Executes jobs in order on a dedicated worker thread.
///
/// Dropping the writer closes the queue and waits up to the shutdown grace
/// for queued jobs to finish. A worker still busy after that is detached.
pub struct BackgroundWriter {
    jobs: Option<Sender<PersistJob>>,
    outcomes: Receiver<JobOutcome>,
    worker: Option<JoinHandle<()>>,
    stopped: Receiver<()>,
    shutdown_grace: Duration,
}

impl BackgroundWriter {
    pub fn spawn(mut stores: Stores, owner: impl Into<String>) -> std::io::Result<Self> {
        let owner = owner.into();
        let (job_tx, job_rx) = mpsc::channel::<PersistJob>();
        let (outcome_tx, outcome_rx) = mpsc::channel::<JobOutcome>();
        let (stopped_tx, stopped_rx) = mpsc::channel::<()>();

        let worker = std::thread::Builder::new()
            .name("lakeside-persist".to_string())
            .spawn(move || {
                for job in job_rx {
                    let kind = job.kind();
                    let result = execute_job(&mut stores, &owner, job);
                    if outcome_tx.send(JobOutcome { kind, result }).is_err() {
                        break;
                    }
                }
                debug!("persistence worker stopped");
                let _ = stopped_tx.send(());
            })?;

        Ok(Self {
            jobs: Some(job_tx),
            outcomes: outcome_rx,
            worker: Some(worker),
            stopped: stopped_rx,
            shutdown_grace: Duration::from_millis(PERSIST_SHUTDOWN_GRACE_MS),
        })
    }

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }
}

impl PersistenceSink for BackgroundWriter {
    fn submit(&mut self, job: PersistJob) {
        let kind = job.kind();
        let sent = self.jobs.as_ref().map(|tx| tx.send(job).is_ok());
        if sent != Some(true) {
            debug!(job = kind, "persistence worker gone; job dropped");
        }
    }

    fn drain_outcomes(&mut self) -> Vec<JobOutcome> {
        self.outcomes.try_iter().collect()
    }
}

impl Drop for BackgroundWriter {
    fn drop(&mut self) {
        self.jobs.take();
        let Some(worker) = self.worker.take() else {
            return;
        };
        match self.stopped.recv_timeout(self.shutdown_grace) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                let _ = worker.join();
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    grace_ms = self.shutdown_grace.as_millis() as u64,
                    "persistence worker still busy at shutdown; detaching"
                );
            }
        }
    }
}

/// Discards jobs. Used when no identity is available.
#[derive(Debug, Default)]
pub struct OfflineSink;

impl PersistenceSink for OfflineSink {
    fn submit(&mut self, job: PersistJob) {
        debug!(job = job.kind(), "offline; job discarded");
    }

    fn drain_outcomes(&mut self) -> Vec<JobOutcome> {
        Vec::new()
    }
}
