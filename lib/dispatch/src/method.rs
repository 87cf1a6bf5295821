//! The remote method table.
//!
//! Methods dispatch to fixed backend routes through a tagged enum rather
//! than string branching, so adding a method means adding a variant and the
//! compiler finds every match that needs extending.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A remote method the dispatcher can forward to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Rebuild the contracts table for an underlying.
    UpdateContractsTable,
    /// Snapshot account margin/liquidity figures.
    CaptureAccountSummary,
    /// Drop and re-pull the orders table.
    RefreshOrders,
    /// Clear the orders table without re-pulling.
    TruncateOrders,
}

impl Method {
    /// Every registered method, in dispatch-table order.
    pub const ALL: [Self; 4] = [
        Self::UpdateContractsTable,
        Self::CaptureAccountSummary,
        Self::RefreshOrders,
        Self::TruncateOrders,
    ];

    /// Parses a method name from an invocation payload.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "update_contracts_table" => Some(Self::UpdateContractsTable),
            "capture_account_summary" => Some(Self::CaptureAccountSummary),
            "refresh_orders" => Some(Self::RefreshOrders),
            "truncate_orders" => Some(Self::TruncateOrders),
            _ => None,
        }
    }

    /// The wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UpdateContractsTable => "update_contracts_table",
            Self::CaptureAccountSummary => "capture_account_summary",
            Self::RefreshOrders => "refresh_orders",
            Self::TruncateOrders => "truncate_orders",
        }
    }

    /// The backend route the method forwards to.
    #[must_use]
    pub const fn route(self) -> &'static str {
        match self {
            Self::UpdateContractsTable => "/data/update-contracts-table",
            Self::CaptureAccountSummary => "/account",
            Self::RefreshOrders => "/data/refresh-orders",
            Self::TruncateOrders => "/data/truncate-orders",
        }
    }

    /// Params that must be present before a call is attempted.
    ///
    /// A backend call with an incomplete payload against a live trading
    /// system is a correctness risk, so absence fails the invocation instead
    /// of being forwarded. `capture_account_summary` deliberately tolerates a
    /// missing `account_number`; the backend falls back to the default
    /// account.
    #[must_use]
    pub const fn required_params(self) -> &'static [&'static str] {
        match self {
            Self::UpdateContractsTable => &["contracts_details"],
            Self::CaptureAccountSummary | Self::RefreshOrders | Self::TruncateOrders => &[],
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
