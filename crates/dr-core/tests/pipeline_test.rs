use dr_core::pipeline::*;
use dr_core::types::*;

fn deal(id: i64, stage: &str) -> Deal {
    Deal {
        id: DealId(id),
        name: format!("Deal {id}"),
        buyer: PartyRef {
            id: 100 + id,
            name: "Acme Co".into(),
        },
        seller: PartyRef {
            id: 200 + id,
            name: "Globex Inc".into(),
        },
        industry: "Logistics".into(),
        estimate: Money {
            value: Some(85_000_000.0),
            currency: "USD".into(),
        },
        priority: Priority::High,
        pic: None,
        target_close_date: None,
        progress: 40,
        comments_count: 2,
        attachments_count: 1,
        updated_at: None,
        stage: StageCode::from(stage),
    }
}

fn stages() -> Vec<Stage> {
    vec![
        Stage::new("LOI", "Letter of Intent", 3),
        Stage::new("SOURCING", "Sourcing", 1),
        Stage::new("NDA", "NDA Signed", 2),
        Stage::new("CLOSED", "Closed", 4),
    ]
}

fn board() -> PipelineBoard {
    PipelineBoard::new(
        stages(),
        vec![deal(1, "SOURCING"), deal(2, "NDA"), deal(3, "NDA"), deal(4, "LOI")],
    )
}

fn ids(deals: &[&Deal]) -> Vec<i64> {
    deals.iter().map(|d| d.id.0).collect()
}

#[test]
fn columns_follow_stage_position() {
    let board = board();
    let codes: Vec<&str> = board.columns().iter().map(|c| c.stage.code.as_str()).collect();
    assert_eq!(codes, vec!["SOURCING", "NDA", "LOI", "CLOSED"]);
}

#[test]
fn position_ties_break_on_code() {
    let board = PipelineBoard::new(
        vec![Stage::new("B", "B", 1), Stage::new("A", "A", 1)],
        Vec::new(),
    );
    assert_eq!(board.stages()[0].code.as_str(), "A");
}

#[test]
fn move_removes_from_source_and_adds_to_target_once() {
    let mut board = board();
    let before = board.deal(DealId(2)).cloned().expect("deal 2 exists");

    let outcome = board.move_deal(DealId(2), &StageCode::from("LOI"));
    let cmd = outcome.command().cloned().expect("deal moved");
    assert_eq!(cmd.from.as_str(), "NDA");
    assert_eq!(cmd.to.as_str(), "LOI");

    let nda = board.deals_in(&StageCode::from("NDA"));
    let loi = board.deals_in(&StageCode::from("LOI"));
    assert_eq!(ids(&nda), vec![3]);
    assert_eq!(loi.iter().filter(|d| d.id == DealId(2)).count(), 1);

    // Every other field is untouched.
    let after = board.deal(DealId(2)).expect("deal 2 still exists");
    assert_eq!(after.name, before.name);
    assert_eq!(after.buyer, before.buyer);
    assert_eq!(after.estimate, before.estimate);

    let total: usize = board.columns().iter().map(|c| c.deals.len()).sum();
    assert_eq!(total, 4);
}

#[test]
fn moving_onto_current_stage_is_a_no_op() {
    let mut board = board();
    let snapshot = board.clone();
    let outcome = board.move_deal(DealId(4), &StageCode::from("LOI"));
    assert_eq!(outcome, MoveOutcome::SameStage);
    assert!(outcome.command().is_none());
    assert_eq!(board, snapshot);
    assert!(board.in_flight().is_empty());
}

#[test]
fn unknown_deal_or_stage_changes_nothing() {
    let mut board = board();
    let snapshot = board.clone();
    assert_eq!(
        board.move_deal(DealId(99), &StageCode::from("LOI")),
        MoveOutcome::UnknownDeal
    );
    assert_eq!(
        board.move_deal(DealId(1), &StageCode::from("NOWHERE")),
        MoveOutcome::UnknownStage
    );
    assert_eq!(board, snapshot);
}

#[test]
fn rollback_restores_previous_mapping() {
    let mut board = board();
    let before = board.stage_map();

    let cmd = board
        .move_deal(DealId(1), &StageCode::from("CLOSED"))
        .into_command()
        .expect("deal moved");
    assert!(board.is_in_flight(DealId(1)));
    assert_ne!(board.stage_map(), before);

    assert!(board.rollback(&cmd));
    assert_eq!(board.stage_map(), before);
    assert!(!board.is_in_flight(DealId(1)));
}

#[test]
fn confirm_keeps_new_stage() {
    let mut board = board();
    let cmd = board
        .move_deal(DealId(1), &StageCode::from("NDA"))
        .into_command()
        .expect("deal moved");
    assert!(board.confirm(&cmd));
    assert_eq!(board.stage_of(DealId(1)).map(StageCode::as_str), Some("NDA"));
    assert!(board.in_flight().is_empty());
    // A settled command cannot be rolled back afterwards.
    assert!(!board.rollback(&cmd));
    assert_eq!(board.stage_of(DealId(1)).map(StageCode::as_str), Some("NDA"));
}

#[test]
fn rollback_after_reload_is_ignored() {
    let mut board = board();
    let cmd = board
        .move_deal(DealId(1), &StageCode::from("NDA"))
        .into_command()
        .expect("deal moved");

    board.replace(stages(), vec![deal(1, "LOI")]);
    assert!(!board.rollback(&cmd));
    assert_eq!(board.stage_of(DealId(1)).map(StageCode::as_str), Some("LOI"));
}

#[test]
fn drag_and_drop_produces_a_move() {
    let mut board = board();
    let mut session = DragSession::new();
    let card = board.deal(DealId(3)).cloned().expect("deal 3 exists");
    let target = board.stages()[3].clone();

    session.begin(&card);
    assert!(session.is_dragging(DealId(3)));
    session.hover(&target);
    assert!(session.is_over(&target));

    let intent = session.drop_on(&target).expect("drop intent");
    assert_eq!(session, DragSession::new());
    let outcome = board.apply_drop(&intent);
    assert!(matches!(outcome, MoveOutcome::Moved(_)));
    assert_eq!(board.stage_of(DealId(3)).map(StageCode::as_str), Some("CLOSED"));
}

#[test]
fn drag_cancelled_outside_columns_has_no_effect() {
    let board_before = board();
    let mut session = DragSession::new();
    let card = board_before.deal(DealId(1)).cloned().expect("deal 1 exists");

    session.begin(&card);
    session.hover(&StageCode::from("LOI"));
    session.cancel();

    assert_eq!(session.dragging(), None);
    assert!(!session.is_over(&StageCode::from("LOI")));
    assert!(session.drop_on(&StageCode::from("LOI")).is_none());
    assert!(board_before.in_flight().is_empty());
}

#[test]
fn leaving_another_column_keeps_highlight() {
    let mut session = DragSession::new();
    session.begin(&DealId(1));
    session.hover(&StageCode::from("NDA"));
    session.leave(&StageCode::from("LOI"));
    assert!(session.is_over(&StageCode::from("NDA")));
    session.leave(&StageCode::from("NDA"));
    assert!(!session.is_over(&StageCode::from("NDA")));
}

#[test]
fn hover_without_drag_is_ignored() {
    let mut session = DragSession::new();
    session.hover(&StageCode::from("NDA"));
    assert!(!session.is_over(&StageCode::from("NDA")));
}

#[test]
fn upsert_puts_new_deals_first() {
    let mut board = board();
    board.upsert_deal(deal(9, "SOURCING"));
    assert_eq!(board.deals()[0].id, DealId(9));
    assert_eq!(ids(&board.deals_in(&StageCode::from("SOURCING"))), vec![9, 1]);

    let mut renamed = deal(1, "SOURCING");
    renamed.name = "Renamed".into();
    board.upsert_deal(renamed);
    assert_eq!(board.deals().len(), 5);
    assert_eq!(board.deal(DealId(1)).map(|d| d.name.as_str()), Some("Renamed"));
}

#[test]
fn deals_with_unknown_stage_are_unassigned() {
    let board = PipelineBoard::new(stages(), vec![deal(1, "LOI"), deal(2, "ARCHIVED")]);
    assert_eq!(ids(&board.unassigned()), vec![2]);
}

#[test]
fn inverse_swaps_endpoints() {
    let cmd = MoveCommand {
        deal_id: DealId(7),
        from: StageCode::from("NDA"),
        to: StageCode::from("LOI"),
    };
    let inv = cmd.inverse();
    assert_eq!(inv.from, cmd.to);
    assert_eq!(inv.to, cmd.from);
    assert_eq!(inv.inverse(), cmd);
}

#[test]
fn out_of_order_settlement_lets_the_last_reconciliation_win() {
    let mut board = board();
    let first = board
        .move_deal(DealId(1), &StageCode::from("NDA"))
        .into_command()
        .expect("SOURCING -> NDA");
    let second = board
        .move_deal(DealId(1), &StageCode::from("LOI"))
        .into_command()
        .expect("NDA -> LOI");
    assert_eq!(board.in_flight().len(), 2);

    // The later move is confirmed first, then the earlier one fails.
    assert!(board.confirm(&second));
    assert!(board.is_in_flight(DealId(1)));
    assert!(board.rollback(&first));

    assert_eq!(board.stage_of(DealId(1)).map(StageCode::as_str), Some("SOURCING"));
    assert!(!board.is_in_flight(DealId(1)));
    assert!(board.in_flight().is_empty());
}
