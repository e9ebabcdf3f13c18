use anyhow::bail;
use clap::{Parser, Subcommand};
use icicle::MAX_INSTANCE;

/// Upper bound on `next --count`. Larger runs should use repeated `batch` calls.
pub const MAX_NEXT_COUNT: usize = 1 << 20;

/// Runtime configuration for the `icicle` binary.
///
/// Every global setting can come from a CLI flag or an environment variable
/// (a `.env` file in the working directory is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "icicle",
    version,
    about = "Mint and decode coordination-free Snowflake IDs"
)]
pub struct CliArgs {
    /// Instance number encoded into every minted ID.
    ///
    /// Must be unique among all producers sharing an ID space. Valid range
    /// is 0 to 1023.
    ///
    /// Environment variable: `ICICLE_INSTANCE`
    #[arg(
        short,
        long,
        env = "ICICLE_INSTANCE",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub instance: i64,

    /// Print results as JSON instead of plain text.
    ///
    /// Environment variable: `ICICLE_JSON`
    #[arg(long, env = "ICICLE_JSON", default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Mint IDs one at a time.
    Next {
        /// How many IDs to mint, at most 1048576.
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },
    /// Mint a batch of IDs under a single lock.
    ///
    /// A negative count, or one above the batch cap, mints a full batch.
    Batch {
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },
    /// Split IDs into timestamp, instance and sequence.
    Decompose {
        #[arg(required = true, allow_negative_numbers = true)]
        ids: Vec<i64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub instance: i64,
    pub format: OutputFormat,
    pub command: Command,
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if !(0..=MAX_INSTANCE).contains(&args.instance) {
            bail!(
                "ICICLE_INSTANCE ({}) is outside the instance range 0..={}",
                args.instance,
                MAX_INSTANCE
            );
        }

        if let Command::Next { count } = args.command {
            if count > MAX_NEXT_COUNT {
                bail!("next --count ({count}) exceeds the limit of {MAX_NEXT_COUNT}");
            }
        }

        let format = if args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Ok(Self {
            instance: args.instance,
            format,
            command: args.command,
        })
    }
}
