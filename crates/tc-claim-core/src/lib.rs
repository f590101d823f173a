//! Wallet-claim controller.
//!
//! Drives the connect / switch-network / claim flow against a [`WalletProvider`],
//! a [`ContractFactory`] and a [`ClaimView`], keeping all state in one
//! [`Session`] owned by the controller instance.
//!
//! [`WalletProvider`]: tc_provider::WalletProvider
//! [`ContractFactory`]: tc_contract_client::ContractFactory

pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod session;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::ClaimConfig;
pub use controller::ClaimController;
pub use error::ClaimError;
pub use session::Session;
pub use view::{ClaimView, ControlState, StatusKind};
