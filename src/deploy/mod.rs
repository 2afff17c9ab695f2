//! Deployment subsystem.
//!
//! # Data Flow
//! ```text
//! DeployConfig + network name
//!     → runner.rs DeploymentPlan::prepare (load artifacts, no network yet)
//!     → backend.rs ChainBackend (RpcBackend over TxSender)
//!     → runner.rs run (balance → deploy nft → deploy auction → batch mint)
//!     → record.rs DeploymentRecord (deployment-<network>.json)
//!     → summary.rs (console transcript)
//! ```

pub mod backend;
pub mod record;
pub mod runner;
pub mod summary;

pub use backend::{ChainBackend, RpcBackend};
pub use record::{DeploymentRecord, RecordError};
pub use runner::{run, DeploymentOutcome, DeploymentPlan};
