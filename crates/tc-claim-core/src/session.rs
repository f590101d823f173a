use tc_api_types::WalletAddress;

use crate::format::short_address;
use crate::view::{ControlState, StatusKind};

pub const CONNECT_LABEL: &str = "Connect Wallet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

/// Per-page-load state. Control enablement is derived from it, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub account: Option<WalletAddress>,
    pub on_expected_chain: bool,
    pub claimed: bool,
    pub claim_in_flight: bool,
    pub subscribed: bool,
    pub balance: u64,
    pub status: Option<Status>,
    /// Bumped on every disconnect so late claim results from an earlier
    /// connection are discarded.
    pub epoch: u64,
}

impl Session {
    pub fn new(initial_balance: u64) -> Self {
        Self {
            account: None,
            on_expected_chain: false,
            claimed: false,
            claim_in_flight: false,
            subscribed: false,
            balance: initial_balance,
            status: None,
            epoch: 0,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn can_claim(&self) -> bool {
        self.is_connected() && self.on_expected_chain && !self.claimed && !self.claim_in_flight
    }

    pub fn connect_control(&self) -> ControlState {
        match &self.account {
            Some(account) => ControlState {
                enabled: false,
                text: Some(format!("Connected: {}", short_address(account))),
                disabled_marker: false,
            },
            None => ControlState {
                enabled: true,
                text: Some(CONNECT_LABEL.to_owned()),
                disabled_marker: false,
            },
        }
    }

    pub fn claim_control(&self) -> ControlState {
        ControlState {
            enabled: self.can_claim(),
            text: None,
            disabled_marker: self.claimed,
        }
    }

    /// Full reset back to the page-load state, keeping the displayed balance
    /// and the event subscription.
    pub fn reset(&mut self) {
        self.account = None;
        self.on_expected_chain = false;
        self.claimed = false;
        self.epoch += 1;
    }
}
