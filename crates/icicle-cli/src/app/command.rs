use std::io::Write;

use anyhow::Context;
use icicle::{Decomposed, LockSnowflakeGenerator, MAX_BATCH_SIZE, SnowflakeId, decompose};
use serde::Serialize;

use super::config::{Command, Config, OutputFormat};

/// One ID together with its decoded fields, as printed by every subcommand.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct IdRecord {
    pub id: i64,
    #[serde(flatten)]
    pub parts: Decomposed,
}

impl From<i64> for IdRecord {
    fn from(id: i64) -> Self {
        Self {
            id,
            parts: decompose(id),
        }
    }
}

impl From<SnowflakeId> for IdRecord {
    fn from(id: SnowflakeId) -> Self {
        Self::from(id.to_raw())
    }
}

/// Executes the configured subcommand and writes its output to `out`.
pub fn run(config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    let records: Vec<IdRecord> = match &config.command {
        Command::Next { count } => {
            let generator = LockSnowflakeGenerator::new(config.instance)?;
            let mut records = Vec::with_capacity((*count).min(MAX_BATCH_SIZE));
            for _ in 0..*count {
                let id = generator.next_id().inspect_err(|e| {
                    tracing::error!(instance = config.instance, "failed to mint id: {e}");
                })?;
                records.push(id.into());
            }
            records
        }
        Command::Batch { count } => {
            let generator = LockSnowflakeGenerator::new(config.instance)?;
            let ids = generator.batch(*count).inspect_err(|e| {
                tracing::error!(instance = config.instance, count, "failed to mint batch: {e}");
            })?;
            tracing::debug!(requested = count, minted = ids.len(), "batch minted");
            ids.into_iter().map(IdRecord::from).collect()
        }
        Command::Decompose { ids } => ids.iter().copied().map(IdRecord::from).collect(),
    };

    write_records(&records, config, out).context("failed to write output")
}

fn write_records(records: &[IdRecord], config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    match (config.format, &config.command) {
        (OutputFormat::Json, _) => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
        }
        (OutputFormat::Text, Command::Decompose { .. }) => {
            for record in records {
                writeln!(
                    out,
                    "{}\ttimestamp={}\tinstance={}\tsequence={}",
                    record.id,
                    record.parts.timestamp,
                    record.parts.instance,
                    record.parts.sequence
                )?;
            }
        }
        (OutputFormat::Text, _) => {
            for record in records {
                writeln!(out, "{}", record.id)?;
            }
        }
    }
    Ok(())
}
