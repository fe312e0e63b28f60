//! Pipeline board: stage columns, draggable deal cards and the optimistic
//! move protocol.
//!
//! The protocol is a two-phase local transaction. [`PipelineBoard::move_deal`]
//! applies a [`MoveCommand`] immediately and records it as in flight; the
//! caller persists it and then either [`confirm`](PipelineBoard::confirm)s it
//! or [`rollback`](PipelineBoard::rollback)s it, which applies the inverse
//! command. Concurrent moves of the same deal are not serialized: each is an
//! independent request and the last settlement wins locally.

use std::collections::BTreeMap;

use crate::types::{Deal, DealId, Stage, StageCode};

// ---------------------------------------------------------------------------
// Drag capabilities
// ---------------------------------------------------------------------------

/// Something that can be picked up and dragged, keyed by deal identity.
pub trait DragSource {
    fn drag_key(&self) -> DealId;
}

/// Something a card can be dropped on, keyed by stage code.
pub trait DropTarget {
    fn drop_key(&self) -> &StageCode;
}

impl DragSource for Deal {
    fn drag_key(&self) -> DealId {
        self.id
    }
}

impl DragSource for DealId {
    fn drag_key(&self) -> DealId {
        *self
    }
}

impl DropTarget for Stage {
    fn drop_key(&self) -> &StageCode {
        &self.code
    }
}

impl DropTarget for StageCode {
    fn drop_key(&self) -> &StageCode {
        self
    }
}

// ---------------------------------------------------------------------------
// Drag session
// ---------------------------------------------------------------------------

/// A completed drop: which deal landed on which column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropIntent {
    pub deal_id: DealId,
    pub target: StageCode,
}

/// Transient drag state. Hover is visual feedback only and never reaches the
/// board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragSession {
    dragging: Option<DealId>,
    over: Option<StageCode>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin<S: DragSource + ?Sized>(&mut self, source: &S) {
        self.dragging = Some(source.drag_key());
        self.over = None;
    }

    pub fn hover<T: DropTarget + ?Sized>(&mut self, target: &T) {
        if self.dragging.is_some() {
            self.over = Some(target.drop_key().clone());
        }
    }

    /// Clear the hover highlight, but only if `target` is the column that
    /// currently holds it.
    pub fn leave<T: DropTarget + ?Sized>(&mut self, target: &T) {
        if self.over.as_ref() == Some(target.drop_key()) {
            self.over = None;
        }
    }

    pub fn dragging(&self) -> Option<DealId> {
        self.dragging
    }

    pub fn is_dragging(&self, id: DealId) -> bool {
        self.dragging == Some(id)
    }

    pub fn is_over<T: DropTarget + ?Sized>(&self, target: &T) -> bool {
        self.dragging.is_some() && self.over.as_ref() == Some(target.drop_key())
    }

    /// Finish the drag on `target`. Returns `None` when nothing was being
    /// dragged. The session is idle afterwards either way.
    pub fn drop_on<T: DropTarget + ?Sized>(&mut self, target: &T) -> Option<DropIntent> {
        let intent = self.dragging.take().map(|deal_id| DropIntent {
            deal_id,
            target: target.drop_key().clone(),
        });
        self.over = None;
        intent
    }

    /// Drag ended outside any column.
    pub fn cancel(&mut self) {
        self.dragging = None;
        self.over = None;
    }
}

// ---------------------------------------------------------------------------
// Move command
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    pub deal_id: DealId,
    pub from: StageCode,
    pub to: StageCode,
}

impl MoveCommand {
    pub fn inverse(&self) -> MoveCommand {
        MoveCommand {
            deal_id: self.deal_id,
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }
}

impl std::fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "deal {} {} -> {}", self.deal_id, self.from, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Applied locally; the caller must persist it.
    Moved(MoveCommand),
    SameStage,
    UnknownDeal,
    UnknownStage,
}

impl MoveOutcome {
    pub fn command(&self) -> Option<&MoveCommand> {
        match self {
            MoveOutcome::Moved(cmd) => Some(cmd),
            _ => None,
        }
    }

    pub fn into_command(self) -> Option<MoveCommand> {
        match self {
            MoveOutcome::Moved(cmd) => Some(cmd),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// One rendered column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<'a> {
    pub stage: &'a Stage,
    pub deals: Vec<&'a Deal>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineBoard {
    stages: Vec<Stage>,
    deals: Vec<Deal>,
    in_flight: Vec<MoveCommand>,
}

fn sort_stages(stages: &mut [Stage]) {
    stages.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.code.cmp(&b.code)));
}

impl PipelineBoard {
    pub fn new(mut stages: Vec<Stage>, deals: Vec<Deal>) -> Self {
        sort_stages(&mut stages);
        Self {
            stages,
            deals,
            in_flight: Vec::new(),
        }
    }

    /// Reload from the server. Pending moves are forgotten: a late failure
    /// for one of them no longer rolls anything back.
    pub fn replace(&mut self, mut stages: Vec<Stage>, deals: Vec<Deal>) {
        sort_stages(&mut stages);
        self.stages = stages;
        self.deals = deals;
        self.in_flight.clear();
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    pub fn deal(&self, id: DealId) -> Option<&Deal> {
        self.deals.iter().find(|d| d.id == id)
    }

    pub fn stage(&self, code: &StageCode) -> Option<&Stage> {
        self.stages.iter().find(|s| &s.code == code)
    }

    pub fn stage_of(&self, id: DealId) -> Option<&StageCode> {
        self.deal(id).map(|d| &d.stage)
    }

    /// Deals in `code`, in board order.
    pub fn deals_in(&self, code: &StageCode) -> Vec<&Deal> {
        self.deals.iter().filter(|d| &d.stage == code).collect()
    }

    pub fn columns(&self) -> Vec<Column<'_>> {
        self.stages
            .iter()
            .map(|stage| Column {
                stage,
                deals: self.deals_in(&stage.code),
            })
            .collect()
    }

    /// Deals whose stage code matches no known column.
    pub fn unassigned(&self) -> Vec<&Deal> {
        self.deals
            .iter()
            .filter(|d| self.stage(&d.stage).is_none())
            .collect()
    }

    pub fn stage_map(&self) -> BTreeMap<DealId, StageCode> {
        self.deals.iter().map(|d| (d.id, d.stage.clone())).collect()
    }

    /// Newly created deals go to the top of the board. An existing deal with
    /// the same id is replaced in place.
    pub fn upsert_deal(&mut self, deal: Deal) {
        match self.deals.iter_mut().find(|d| d.id == deal.id) {
            Some(existing) => *existing = deal,
            None => self.deals.insert(0, deal),
        }
    }

    /// Optimistically move a deal. See the module docs for the protocol.
    pub fn move_deal(&mut self, id: DealId, to: &StageCode) -> MoveOutcome {
        if self.stage(to).is_none() {
            return MoveOutcome::UnknownStage;
        }
        let Some(deal) = self.deals.iter_mut().find(|d| d.id == id) else {
            return MoveOutcome::UnknownDeal;
        };
        if &deal.stage == to {
            return MoveOutcome::SameStage;
        }
        let cmd = MoveCommand {
            deal_id: id,
            from: deal.stage.clone(),
            to: to.clone(),
        };
        deal.stage = to.clone();
        tracing::debug!(deal = %id, from = %cmd.from, to = %cmd.to, "optimistic move");
        self.in_flight.push(cmd.clone());
        MoveOutcome::Moved(cmd)
    }

    pub fn apply_drop(&mut self, intent: &DropIntent) -> MoveOutcome {
        self.move_deal(intent.deal_id, &intent.target)
    }

    /// Persistence succeeded. Returns `false` if `cmd` was not in flight.
    pub fn confirm(&mut self, cmd: &MoveCommand) -> bool {
        self.take_in_flight(cmd)
    }

    /// Persistence failed: apply the inverse command. Returns `false` (and
    /// changes nothing) if `cmd` was not in flight, e.g. after a reload.
    pub fn rollback(&mut self, cmd: &MoveCommand) -> bool {
        if !self.take_in_flight(cmd) {
            return false;
        }
        let inverse = cmd.inverse();
        if let Some(deal) = self.deals.iter_mut().find(|d| d.id == inverse.deal_id) {
            deal.stage = inverse.to.clone();
            tracing::debug!(deal = %inverse.deal_id, restored = %inverse.to, "move rolled back");
        }
        true
    }

    pub fn is_in_flight(&self, id: DealId) -> bool {
        self.in_flight.iter().any(|c| c.deal_id == id)
    }

    pub fn in_flight(&self) -> &[MoveCommand] {
        &self.in_flight
    }

    fn take_in_flight(&mut self, cmd: &MoveCommand) -> bool {
        match self.in_flight.iter().position(|c| c == cmd) {
            Some(idx) => {
                self.in_flight.remove(idx);
                true
            }
            None => false,
        }
    }
}
