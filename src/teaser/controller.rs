use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    error::JournalError,
    narrative::{CrewMember, NarrativeGenerator, NarrativeResult},
};

use super::{
    events::{RetrievalEvent, StatusSink},
    state::{RetrievalState, RetrievalStatus, TEASERS},
};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

/// Runs one crew-log retrieval at a time in the background and publishes rotating
/// teaser lines until it settles.
#[derive(Clone)]
pub struct TeaserController {
    state: Arc<Mutex<RetrievalState>>,
    status_tx: Arc<watch::Sender<RetrievalStatus>>,
    sink: Arc<dyn StatusSink>,
    narrator: Arc<NarrativeGenerator>,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
    cadence: Duration,
    max_wait: Duration,
    shutdown: CancellationToken,
}

struct DriverContext {
    run_id: Uuid,
    state: Arc<Mutex<RetrievalState>>,
    status_tx: Arc<watch::Sender<RetrievalStatus>>,
    sink: Arc<dyn StatusSink>,
    narrator: Arc<NarrativeGenerator>,
    cadence: Duration,
    max_wait: Duration,
    shutdown: CancellationToken,
}

impl TeaserController {
    pub fn new(
        narrator: Arc<NarrativeGenerator>,
        sink: Arc<dyn StatusSink>,
        cadence: Duration,
        max_wait: Duration,
    ) -> Self {
        let (status_tx, _) = watch::channel(RetrievalStatus::Idle);
        Self {
            state: Arc::new(Mutex::new(RetrievalState::new())),
            status_tx: Arc::new(status_tx),
            sink,
            narrator,
            worker: Arc::new(Mutex::new(None)),
            cadence,
            max_wait,
            shutdown: CancellationToken::new(),
        }
    }

    pub async fn get_state(&self) -> RetrievalState {
        self.state.lock().await.clone()
    }

    /// Completion notifications for the presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<RetrievalStatus> {
        self.status_tx.subscribe()
    }

    /// Start a retrieval and return immediately with its run id. A retrieval already
    /// in flight rejects the trigger without starting new work, and an empty crew starts
    /// nothing.
    pub async fn start_retrieval(&self, crew: Vec<CrewMember>) -> Result<Uuid, JournalError> {
        if self.shutdown.is_cancelled() {
            return Err(JournalError::generation(
                "crew entries",
                "the journal is shutting down",
            ));
        }

        if crew.is_empty() {
            return Err(JournalError::DataUnavailable {
                reason: "no crew members to write about".into(),
            });
        }

        let run_id = {
            let mut state = self.state.lock().await;
            if state.is_pending() {
                log_warn!("Ignoring retrieval trigger while run {:?} is pending", state.run_id);
                return Err(JournalError::DuplicateTrigger);
            }
            let run_id = Uuid::new_v4();
            state.begin(run_id);
            run_id
        };
        self.status_tx.send_replace(RetrievalStatus::Pending);

        log_info!("Starting crew log retrieval {run_id} for {} members", crew.len());

        let context = DriverContext {
            run_id,
            state: self.state.clone(),
            status_tx: self.status_tx.clone(),
            sink: self.sink.clone(),
            narrator: self.narrator.clone(),
            cadence: self.cadence,
            max_wait: self.max_wait,
            shutdown: self.shutdown.clone(),
        };

        let mut worker_guard = self.worker.lock().await;
        *worker_guard = Some(tokio::spawn(drive_retrieval(context, crew)));

        Ok(run_id)
    }

    /// Wait for the current retrieval, if any, to complete or fail.
    pub async fn wait_until_settled(&self) -> RetrievalState {
        let mut status_rx = self.status_tx.subscribe();
        if status_rx
            .wait_for(|status| *status != RetrievalStatus::Pending)
            .await
            .is_err()
        {
            log_warn!("Retrieval status channel closed while waiting");
        }
        self.get_state().await
    }

    /// Stop any in-flight retrieval. Used when the application exits.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        if let Some(handle) = self.worker.lock().await.take() {
            if let Err(err) = handle.await {
                log_warn!("Retrieval driver ended abnormally: {err}");
            }
        }
    }
}

async fn drive_retrieval(ctx: DriverContext, crew: Vec<CrewMember>) {
    let run_id = ctx.run_id;
    let narrator = ctx.narrator.clone();
    let mut work = tokio::spawn(async move { narrator.generate_crew_logs(&crew).await });

    let mut ticker = time::interval(ctx.cadence);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let deadline = time::sleep(ctx.max_wait);
    tokio::pin!(deadline);
    let mut teasers = TEASERS.iter().cycle();

    let outcome: Result<NarrativeResult, JournalError> = loop {
        tokio::select! {
            joined = &mut work => {
                break joined.unwrap_or_else(|err| {
                    Err(JournalError::generation("crew entries", err))
                });
            }
            _ = &mut deadline => {
                work.abort();
                break Err(JournalError::Timeout { waited: ctx.max_wait });
            }
            _ = ctx.shutdown.cancelled() => {
                work.abort();
                log_info!("Retrieval {run_id} abandoned during shutdown");
                ctx.state.lock().await.reset();
                ctx.status_tx.send_replace(RetrievalStatus::Idle);
                return;
            }
            _ = ticker.tick() => {
                let teaser = teasers.next().copied().unwrap_or(TEASERS[0]);
                log_debug!("Retrieval {run_id}: {teaser}");
                ctx.state.lock().await.show_teaser(teaser);
                ctx.sink.publish(&RetrievalEvent::Teaser {
                    run_id,
                    message: teaser.to_string(),
                });
            }
        }
    };

    ctx.sink.publish(&RetrievalEvent::TeaserCleared { run_id });

    let (status, event) = match outcome {
        Ok(result) => {
            log_info!(
                "Retrieval {run_id} finished with {} crew logs",
                result.logs.len()
            );
            let event = RetrievalEvent::LogsReady {
                run_id,
                result: result.clone(),
            };
            ctx.state.lock().await.finish(Ok(result));
            (RetrievalStatus::Completed, event)
        }
        Err(err) => {
            log_warn!("Retrieval {run_id} failed: {err}");
            let message = err.to_string();
            ctx.state.lock().await.finish(Err(message.clone()));
            (
                RetrievalStatus::Failed,
                RetrievalEvent::LogsFailed { run_id, message },
            )
        }
    };

    ctx.sink.publish(&event);
    ctx.status_tx.send_replace(status);
}
