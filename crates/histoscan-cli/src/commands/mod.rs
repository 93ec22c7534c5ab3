//! Command implementations for the histoscan CLI.

mod analyze;
mod batch;
mod init;
mod score;
mod transform;

// Re-export all command functions
pub use analyze::cmd_analyze;
pub use batch::cmd_batch;
pub use init::cmd_init;
pub use score::cmd_score;
pub use transform::cmd_transform;
