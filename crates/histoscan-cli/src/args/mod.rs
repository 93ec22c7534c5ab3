//! Argument structs shared between CLI commands.

use clap::Args;

/// Random seed override shared by every command that draws random values.
#[derive(Args, Clone, Debug, Default)]
pub struct SeedArgs {
    /// Seed for noise and score draws (reproducible output).
    /// Overrides the seeds in the config file
    #[arg(long, value_name = "N", env = "HISTOSCAN_SEED")]
    pub seed: Option<u64>,
}

/// Output format flags for commands that print a result.
#[derive(Args, Clone, Debug, Default)]
pub struct OutputArgs {
    /// Print machine-readable JSON instead of text
    #[arg(long)]
    pub json: bool,
}
