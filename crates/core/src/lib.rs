mod archive;
mod config;
mod ids;
mod listing;
mod logging;
mod run;

pub use archive::{
    rename_and_archive, ArchiveStats, ArchiveSummary, EntryOutcome, EntryRecord,
};
pub use config::{load_run_config, ConfigError, RunConfig, StartMode};
pub use ids::{load_identifiers, IdError};
pub use listing::{list_entries, ListError};
pub use logging::RunLog;
pub use run::{run, JobSummary, RunSummary};
