use dr_client::{ApiClient, PipelineSync, SyncError};
use dr_core::pipeline::MoveOutcome;
use dr_core::types::{DealId, StageCode};

use super::friendly_error;

/// Run the `move` subcommand. A rejected move is rolled back and reported as
/// an error so the process exits non-zero.
pub async fn run(client: ApiClient, deal_id: i64, stage: &str) -> anyhow::Result<()> {
    let message = move_deal(client, deal_id, stage).await?;
    println!("{message}");
    Ok(())
}

pub async fn move_deal(client: ApiClient, deal_id: i64, stage: &str) -> anyhow::Result<String> {
    let board = client.load_board().await.map_err(friendly_error)?;
    let target = StageCode::new(stage.trim());
    let label = board
        .stage(&target)
        .map(|s| s.label.clone())
        .unwrap_or_default();
    let known: Vec<String> = board
        .stages()
        .iter()
        .map(|s| s.code.to_string())
        .collect();

    let (sync, _events) = PipelineSync::new(board, client);
    let id = DealId(deal_id);
    match sync.move_deal(id, &target).await {
        Ok(MoveOutcome::Moved(cmd)) => Ok(format!(
            "Deal {id} moved from {} to {} ({label}).",
            cmd.from, cmd.to
        )),
        Ok(MoveOutcome::SameStage) => Ok(format!("Deal {id} is already in {target}.")),
        Ok(MoveOutcome::UnknownDeal) => anyhow::bail!("No deal with id {id} on the board."),
        Ok(MoveOutcome::UnknownStage) => anyhow::bail!(
            "Unknown stage {target:?}. Known stages: {}",
            known.join(", ")
        ),
        Err(SyncError::MoveRejected { command, source }) => Err(friendly_error(source)
            .context(format!("Deal {id} stays in {}", command.from))),
    }
}
