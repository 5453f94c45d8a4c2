use anyhow::Result;
use kulture_core::config::LayeredConfig;
use kulture_core::models::Category;
use kulture_core::{ScreenView, Session, UserAction};

use crate::cli::DetailsArgs;
use crate::display;
use crate::errors;
use crate::output::OutputWriter;
use crate::storage::open_aggregator;

pub async fn execute(
    args: DetailsArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let aggregator = open_aggregator(config).await?;
    let mut session = Session::new(aggregator);

    for action in [
        UserAction::ShowMap {
            region: args.state.clone(),
        },
        UserAction::ExploreDetails,
    ] {
        session.dispatch(action).await.map_err(errors::from_kulture)?;
    }

    let detail = match session.render().await.map_err(errors::from_kulture)? {
        ScreenView::Detail(detail) => detail,
        other => anyhow::bail!("Expected the detail screen, got {}", other.screen()),
    };
    let only: Option<Category> = args.category.map(Into::into);

    if output.is_json() {
        return match only {
            Some(category) => output.result(serde_json::json!({
                "region": detail.region,
                "category": category,
                "records": detail.bundle.get(category),
                "warnings": detail.warnings,
            })),
            None => output.result(&detail),
        };
    }

    display::detail(output, &detail, only);
    Ok(())
}
