//! User and wallet rows.

use serde::Serialize;

use crate::domain::Wallet;
use crate::metrics;

/// Wallet with its locked-balance utilisation.
#[derive(Debug, Clone, Serialize)]
pub struct WalletRow {
    /// Backend record.
    #[serde(flatten)]
    pub wallet: Wallet,
    /// Locked balance as a percentage of the balance.
    pub utilisation_percent: f64,
}

impl From<&Wallet> for WalletRow {
    fn from(wallet: &Wallet) -> Self {
        Self {
            utilisation_percent: metrics::wallet_utilisation(wallet),
            wallet: wallet.clone(),
        }
    }
}
