//! The board as one caller-owned value.
//!
//! A [`BoardSession`] owns the last aggregated listing and the current filter
//! selection. View events trigger a fresh aggregation; submissions go to the
//! service, or to the local draft store when the service cannot be reached.

use std::future::Future;

use time::OffsetDateTime;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::aggregate::{aggregate, remote_source, Listing, Sources};
use crate::drafts::LocalDraftStore;
use crate::filter::{evaluate, FilterCriteria, FilteredView};
use crate::posting::JobPosting;
use crate::remote::{JobBoardApi, JobSubmission, SubmitError};
use crate::seed::seed_catalog;

/// Moments at which the board re-reads its sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    Loaded,
    FocusRegained,
}

/// Where an accepted submission ended up
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Published(JobPosting),
    /// Service unreachable; kept in the local draft store
    SavedAsDraft(JobPosting),
}

pub struct BoardSession<A> {
    api: A,
    drafts: LocalDraftStore,
    seed: Vec<JobPosting>,
    listing: Listing,
    criteria: FilterCriteria,
    offline_drafts: bool,
}

impl<A: JobBoardApi> BoardSession<A> {
    /// New session with the seed catalog anchored at the current time.
    /// Nothing is loaded until the first [`ViewEvent`].
    pub fn new(api: A, drafts: LocalDraftStore) -> Self {
        Self {
            api,
            drafts,
            seed: seed_catalog(OffsetDateTime::now_utc()),
            listing: Listing::default(),
            criteria: FilterCriteria::default(),
            offline_drafts: true,
        }
    }

    pub fn with_seed(mut self, seed: Vec<JobPosting>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_offline_drafts(mut self, enabled: bool) -> Self {
        self.offline_drafts = enabled;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    pub fn reset_criteria(&mut self) {
        self.criteria.reset();
    }

    pub async fn handle(&mut self, event: ViewEvent) -> &Listing {
        tracing::debug!(?event, "Refreshing job board");
        self.refresh().await
    }

    pub async fn refresh(&mut self) -> &Listing {
        self.refresh_at(OffsetDateTime::now_utc()).await
    }

    /// Re-read every source and aggregate at `now`
    pub async fn refresh_at(&mut self, now: OffsetDateTime) -> &Listing {
        let remote = self.api.fetch_jobs().await;
        let local = self.drafts.load();

        let sources = Sources {
            remote: remote_source(&remote),
            local: &local,
            seed: &self.seed,
        };
        self.listing = aggregate(&sources, now);

        &self.listing
    }

    /// Current listing narrowed by the filter selection
    pub fn view(&self) -> FilteredView {
        evaluate(&self.listing.postings, &self.criteria)
    }

    /// First posting in the listing with `id`
    pub fn find(&self, id: &str) -> Option<&JobPosting> {
        self.listing.postings.iter().find(|posting| posting.id == id)
    }

    /// Submit a new posting and refresh the listing once it is stored.
    ///
    /// When the service is unreachable and offline drafts are enabled the
    /// posting is written to the draft store instead.
    pub async fn submit(&mut self, form: &JobSubmission) -> Result<SubmitOutcome, SubmitError> {
        form.check()?;

        let outcome = match self.api.submit(form).await {
            Ok(receipt) => SubmitOutcome::Published(receipt.job),
            Err(SubmitError::Network { details }) if self.offline_drafts => {
                warn!(error = %details, "Job board service unreachable, saving posting locally");

                let draft = form.to_draft(OffsetDateTime::now_utc())?;
                self.drafts
                    .save_draft(&draft)
                    .map_err(|e| SubmitError::Storage {
                        error: "Failed to save draft".to_string(),
                        details: e.to_string(),
                    })?;
                SubmitOutcome::SavedAsDraft(draft)
            }
            Err(e) => return Err(e),
        };

        self.refresh().await;
        Ok(outcome)
    }
}

/// Refresh on every event until the sender side closes.
///
/// `on_refresh` sees the session after each aggregation.
pub async fn run_events<A, F>(
    session: &mut BoardSession<A>,
    mut events: mpsc::Receiver<ViewEvent>,
    mut on_refresh: F,
) where
    A: JobBoardApi,
    F: FnMut(&BoardSession<A>),
{
    while let Some(event) = events.recv().await {
        session.handle(event).await;
        on_refresh(session);
    }

    info!("View event channel closed");
}

/// Send [`ViewEvent::FocusRegained`] every `period` until `shutdown`
/// resolves or the receiver is dropped.
///
/// `shutdown` is polled once across all ticks, including while a send waits
/// on a full channel.
pub async fn tick_refreshes<F>(events: mpsc::Sender<ViewEvent>, period: std::time::Duration, shutdown: F)
where
    F: Future<Output = ()>,
{
    let mut tick = tokio::time::interval(period);
    tick.tick().await;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = tick.tick() => {}
        }

        tokio::select! {
            _ = &mut shutdown => break,
            sent = events.send(ViewEvent::FocusRegained) => {
                if sent.is_err() {
                    break;
                }
            }
        }
    }

    info!("Periodic refresh stopped");
}
