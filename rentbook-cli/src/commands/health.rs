//! Health command.

use rentbook::views::HealthView;

use super::{Context, render};
use crate::error::{CliError, CliResult};

pub async fn run(ctx: &Context) -> CliResult<()> {
    let mut view = HealthView::new(ctx.api());
    ctx.spin("Loading health...", view.load()).await;
    render(&view);

    match view.info() {
        Some(info) if info.is_error() => {
            Err(CliError::Failed("Backend is unreachable".to_string()))
        }
        _ => Ok(()),
    }
}
