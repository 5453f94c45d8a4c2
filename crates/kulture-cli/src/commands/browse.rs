//! Interactive, screen-by-screen exploration driven by the navigation session

use anyhow::{bail, Result};
use kulture_core::config::LayeredConfig;
use kulture_core::models::Region;
use kulture_core::{ScreenView, Session, UserAction};

use crate::display;
use crate::interactive::{available_choices, prompt_choice, prompt_dates, prompt_state, MenuChoice};
use crate::output::OutputWriter;
use crate::storage::open_aggregator;

pub async fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    if output.is_json() {
        bail!("Interactive browsing does not support --json");
    }

    let aggregator = open_aggregator(config).await?;
    let mut session = Session::new(aggregator);
    let mut interaction = session.current_view().await;

    loop {
        display::notices(output, &interaction.notices);
        display::screen(output, &interaction.view);
        println!();

        let choice = prompt_choice(&available_choices(&interaction.state))?;
        let action = match choice {
            MenuChoice::Quit => break,
            MenuChoice::PickState => {
                let regions: &[Region] = match &interaction.view {
                    ScreenView::Home(home) => home.regions.as_slice(),
                    _ => &[],
                };
                UserAction::ShowMap {
                    region: prompt_state(regions)?,
                }
            }
            MenuChoice::SetDates => {
                let (start, end) = prompt_dates()?;
                UserAction::SubmitDates { start, end }
            }
            MenuChoice::ClearDates => UserAction::ClearDates,
            MenuChoice::Guide => UserAction::ResponsibleTourism,
            MenuChoice::ExploreDetails => UserAction::ExploreDetails,
            MenuChoice::Back => UserAction::Back,
            MenuChoice::BackToMap => UserAction::BackToMap,
            MenuChoice::BackToHome => UserAction::BackToHome,
        };

        tracing::debug!(?action, "Browse action");
        interaction = session.interact(action).await;
    }

    output.success("Happy travels!");
    Ok(())
}
