//! Persistence: key-value backends, record stores, identity, startup loading,
//! and the detached write path.

pub mod backend;
pub mod bootstrap;
pub mod identity;
pub mod records;
pub mod store;
pub mod writer;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use bootstrap::{load_profile, seed_achievements, wipe_profile, Profile};
pub use identity::{ConfiguredIdentity, IdentityError, IdentityProvider, OfflineIdentity, User};
pub use records::{
    AchievementFilter, AchievementRecord, CatchFilter, CatchRecord, StatsFilter, StatsRecord,
};
pub use store::{BlobStore, Filter, Record, Store, StoreError};
pub use writer::{
    BackgroundWriter, InlineWriter, JobOutcome, OfflineSink, PersistJob, PersistenceSink, Stores,
};
