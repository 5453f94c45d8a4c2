use anyhow::{Context, Result};
use kulture_core::config::LayeredConfig;
use kulture_store::postgres::PostgresStore;
use kulture_store::StaticDataset;

use crate::cli::{DbArgs, DbCommand, SeedArgs};
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::{DbStatusOutput, MigrationRow, SeedOutput};
use crate::progress::{create_spinner, finish_error, finish_success};
use crate::storage::open_postgres;

/// Execute database management commands
pub async fn execute(args: DbArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let store = open_postgres(config).await?;

    match args.command {
        DbCommand::Migrate => execute_migrate(&store, output).await,
        DbCommand::Status => execute_status(&store, output).await,
        DbCommand::Seed(seed_args) => execute_seed(&store, seed_args, output).await,
    }
}

async fn execute_migrate(store: &PostgresStore, output: &OutputWriter) -> Result<()> {
    let spinner = create_spinner("Applying migrations...", output.is_json());

    match store.run_migrations().await {
        Ok(()) => {
            finish_success(&spinner, "Migrations applied");
            let version = store.current_version().await.map_err(errors::from_kulture)?;
            output.success(format!(
                "Schema is at version {}",
                version.map(|v| v.to_string()).unwrap_or_else(|| "none".to_string())
            ));
            Ok(())
        }
        Err(e) => {
            finish_error(&spinner, "Migration failed");
            Err(errors::from_kulture(e).into())
        }
    }
}

async fn execute_status(store: &PostgresStore, output: &OutputWriter) -> Result<()> {
    let statuses = store.migration_status().await.map_err(errors::from_kulture)?;

    let migrations: Vec<MigrationRow> = statuses
        .into_iter()
        .map(|status| MigrationRow {
            version: status.version,
            description: status.description,
            applied: status.applied,
        })
        .collect();
    let pending = migrations.iter().filter(|m| !m.applied).count();

    if output.is_json() {
        return output.result(DbStatusOutput {
            migrations,
            pending,
        });
    }

    output.section("Migrations");
    output.table(migrations);
    if pending > 0 {
        output.warning(format!("{} pending migration(s); run: kulture db migrate", pending));
    } else {
        output.success("Schema is up to date");
    }
    Ok(())
}

async fn execute_seed(store: &PostgresStore, args: SeedArgs, output: &OutputWriter) -> Result<()> {
    let dataset = match &args.from {
        Some(path) => StaticDataset::from_file(path)
            .with_context(|| format!("Failed to load fixture {}", path.display()))?,
        None => StaticDataset::builtin().map_err(errors::from_kulture)?,
    };

    if args.migrate {
        store.run_migrations().await.map_err(errors::from_kulture)?;
    }

    let spinner = create_spinner("Importing dataset...", output.is_json());
    let summary = match store.import_dataset(&dataset).await {
        Ok(summary) => {
            finish_success(&spinner, "Dataset imported");
            summary
        }
        Err(e) => {
            finish_error(&spinner, "Import failed, nothing was written");
            return Err(errors::from_kulture(e).into());
        }
    };

    if output.is_json() {
        return output.result(SeedOutput {
            regions: summary.regions,
            records: summary.records,
        });
    }

    output.success(format!(
        "Imported {} states with {} records",
        summary.regions, summary.records
    ));
    Ok(())
}
