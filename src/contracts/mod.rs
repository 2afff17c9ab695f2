//! Contract artifacts and call encoding.

pub mod artifact;
pub mod nft;

pub use artifact::{ArtifactError, ContractArtifact};
