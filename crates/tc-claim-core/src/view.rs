use std::fmt;

use tc_api_types::WalletAddress;

/// Style category of the status region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Processing,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
            StatusKind::Processing => "processing",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observable state of a clickable control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub enabled: bool,
    /// `None` leaves the control's text as authored in the page.
    pub text: Option<String>,
    pub disabled_marker: bool,
}

/// The page surface the controller renders into.
pub trait ClaimView {
    fn show_status(&self, message: &str, kind: StatusKind);
    fn set_connect_control(&self, state: &ControlState);
    fn set_claim_control(&self, state: &ControlState);
    fn show_wallet_info(&self, account: Option<&WalletAddress>);
    fn show_balance(&self, text: &str);
}
