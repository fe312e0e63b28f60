//! Optimistic stage moves against the backend.
//!
//! The board lives behind a `tokio::sync::Mutex` that is never held across a
//! network call: the lock is taken to apply the move, released for the PATCH,
//! and taken again to confirm or roll back.

use std::sync::Arc;

use dr_core::pipeline::{MoveCommand, MoveOutcome, PipelineBoard};
use dr_core::types::{Deal, DealId, Stage, StageCode};
use tokio::sync::Mutex;

use crate::client::{ClientError, StageWriter};

/// Progress notifications for whoever renders the board.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    /// Applied locally, request sent.
    Moved(MoveCommand),
    Confirmed(MoveCommand),
    RolledBack { command: MoveCommand, error: String },
    Reloaded { stages: usize, deals: usize },
    DealAdded(DealId),
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("move of {command} was rolled back: {source}")]
    MoveRejected {
        command: MoveCommand,
        #[source]
        source: ClientError,
    },
}

pub struct PipelineSync<W: StageWriter> {
    board: Arc<Mutex<PipelineBoard>>,
    writer: Arc<W>,
    events: flume::Sender<BoardEvent>,
}

impl<W: StageWriter> Clone for PipelineSync<W> {
    fn clone(&self) -> Self {
        Self {
            board: Arc::clone(&self.board),
            writer: Arc::clone(&self.writer),
            events: self.events.clone(),
        }
    }
}

impl<W: StageWriter + 'static> PipelineSync<W> {
    pub fn new(board: PipelineBoard, writer: W) -> (Self, flume::Receiver<BoardEvent>) {
        let (tx, rx) = flume::unbounded();
        let sync = Self {
            board: Arc::new(Mutex::new(board)),
            writer: Arc::new(writer),
            events: tx,
        };
        (sync, rx)
    }

    fn emit(&self, event: BoardEvent) {
        // Nobody listening is fine.
        let _ = self.events.send(event);
    }

    pub async fn snapshot(&self) -> PipelineBoard {
        self.board.lock().await.clone()
    }

    pub async fn replace(&self, stages: Vec<Stage>, deals: Vec<Deal>) {
        let (n_stages, n_deals) = (stages.len(), deals.len());
        self.board.lock().await.replace(stages, deals);
        self.emit(BoardEvent::Reloaded {
            stages: n_stages,
            deals: n_deals,
        });
    }

    pub async fn add_deal(&self, deal: Deal) {
        let id = deal.id;
        self.board.lock().await.upsert_deal(deal);
        self.emit(BoardEvent::DealAdded(id));
    }

    /// Move a deal and persist it. Anything other than [`MoveOutcome::Moved`]
    /// returns immediately without a request. A failed request is rolled
    /// back before the error is returned.
    pub async fn move_deal(&self, id: DealId, to: &StageCode) -> Result<MoveOutcome, SyncError> {
        let outcome = self.board.lock().await.move_deal(id, to);
        let Some(cmd) = outcome.command().cloned() else {
            tracing::debug!(deal = %id, to = %to, ?outcome, "move skipped");
            return Ok(outcome);
        };
        self.emit(BoardEvent::Moved(cmd.clone()));

        match self.writer.update_deal_stage(cmd.deal_id, &cmd.to).await {
            Ok(()) => {
                self.board.lock().await.confirm(&cmd);
                tracing::info!(deal = %cmd.deal_id, stage = %cmd.to, "deal moved");
                self.emit(BoardEvent::Confirmed(cmd));
                Ok(outcome)
            }
            Err(source) => {
                let reverted = self.board.lock().await.rollback(&cmd);
                tracing::warn!(
                    deal = %cmd.deal_id,
                    error = %source,
                    reverted,
                    "stage update failed"
                );
                self.emit(BoardEvent::RolledBack {
                    command: cmd.clone(),
                    error: source.to_string(),
                });
                Err(SyncError::MoveRejected {
                    command: cmd,
                    source,
                })
            }
        }
    }

    /// Run [`move_deal`](Self::move_deal) on its own task so other moves are
    /// not blocked behind it.
    pub fn spawn_move(
        &self,
        id: DealId,
        to: StageCode,
    ) -> tokio::task::JoinHandle<Result<MoveOutcome, SyncError>> {
        let this = self.clone();
        tokio::spawn(async move { this.move_deal(id, &to).await })
    }
}
