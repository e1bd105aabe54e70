pub mod aggregate;
pub mod config;
pub mod drafts;
pub mod errors;
pub mod filter;
pub mod format;
pub mod logging;
pub mod posting;
pub mod remote;
pub mod seed;
pub mod session;

pub use aggregate::{aggregate, Listing, Sources, MAX_POSTINGS, MIN_POSTINGS, RECENCY_WINDOW_DAYS};
pub use config::ClientConfig;
pub use drafts::LocalDraftStore;
pub use errors::{ClientError, Result};
pub use filter::{evaluate, Facets, FilterCriteria, FilteredView};
pub use format::{format_posted, format_salary, normalize_description, JobCard, JobDetails};
pub use logging::init_simple_logging;
pub use posting::{CompanyLogo, JobPosting, JobType, AVAILABLE_BENEFITS};
pub use remote::{BoardClient, JobBoardApi, JobSubmission, SubmitError, SubmitReceipt};
pub use seed::seed_catalog;
pub use session::{run_events, tick_refreshes, BoardSession, SubmitOutcome, ViewEvent};
