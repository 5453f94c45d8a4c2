use anyhow::{Context, Result};
use kulture_core::config::LayeredConfig;
use kulture_core::{ScreenView, Session, UserAction};
use std::fs;

use crate::cli::MapArgs;
use crate::display;
use crate::errors;
use crate::output::OutputWriter;
use crate::storage::open_aggregator;

pub async fn execute(args: MapArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let aggregator = open_aggregator(config).await?;
    let mut session = Session::new(aggregator);

    session
        .dispatch(UserAction::ShowMap {
            region: args.state.clone(),
        })
        .await
        .map_err(errors::from_kulture)?;

    let map = match session.render().await.map_err(errors::from_kulture)? {
        ScreenView::Map(map) => map,
        other => anyhow::bail!("Expected the map screen, got {}", other.screen()),
    };

    if args.geojson {
        let collection = map.to_geojson();
        match args.output {
            Some(path) => {
                let json = serde_json::to_string_pretty(&collection)
                    .context("Failed to encode GeoJSON")?;
                fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                output.success(format!(
                    "Wrote {} markers for {} to {}",
                    map.markers.len(),
                    map.region.name,
                    path.display()
                ));
            }
            None => output.data(&collection)?,
        }
        return Ok(());
    }

    if output.is_json() {
        return output.result(&map);
    }

    display::map(output, &map);
    Ok(())
}
