//! Observability subsystem.
//!
//! Every step of a run is a structured `tracing` event (network, contract,
//! address, tx hash). Secrets never appear in fields: keys stay inside
//! `Wallet`, and RPC URLs are logged without path or query.

pub mod logging;
