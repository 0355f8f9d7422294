//! CSV export of filtered row sets.
//!
//! Every export is a fixed ordered list of `(header, extractor)` pairs. The
//! whole document is rendered in memory: a header row, then one row per
//! entity, every field wrapped in double quotes and every record terminated
//! by `\n`. Embedded quotes are doubled, so commas, quotes and newlines in
//! backend data cannot break the column layout.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::{
    AuditLog, DepositDetection, KycVerification, Resource, SarReport, User, Wallet, WireEnum,
    WithdrawalBroadcast,
};
use crate::error::ConsoleError;

/// Field extractor for one column.
pub type Extractor<T> = fn(&T) -> String;

/// Ordered column definitions for exporting `T`.
#[derive(Debug, Clone)]
pub struct CsvColumns<T> {
    columns: Vec<(&'static str, Extractor<T>)>,
}

impl<T> Default for CsvColumns<T> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
        }
    }
}

impl<T> CsvColumns<T> {
    /// Creates an empty column list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column.
    #[must_use]
    pub fn column(mut self, header: &'static str, extract: Extractor<T>) -> Self {
        self.columns.push((header, extract));
        self
    }

    /// Column headers in order.
    pub fn headers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(header, _)| *header)
    }

    fn record(&self, row: &T) -> Vec<String> {
        self.columns.iter().map(|(_, extract)| extract(row)).collect()
    }
}

/// Renders `rows` as a CSV document.
///
/// # Errors
///
/// Returns [`ConsoleError::Export`] if the writer fails.
pub fn to_csv<T>(rows: &[T], columns: &CsvColumns<T>) -> Result<String, ConsoleError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns.headers())?;
    for row in rows {
        writer.write_record(columns.record(row))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ConsoleError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ConsoleError::Export(e.to_string()))
}

/// `{resource}-{YYYY-MM-DD}.csv`.
#[must_use]
pub fn export_filename(resource: &str, date: NaiveDate) -> String {
    format!("{resource}-{}.csv", date.format("%Y-%m-%d"))
}

/// File stem used for a resource's export.
#[must_use]
pub const fn export_stem(resource: Resource) -> &'static str {
    match resource {
        Resource::AuditLogs => "audit-logs",
        Resource::Kyc => "kyc-verifications",
        Resource::Sar => "sar-reports",
        other => other.as_str(),
    }
}

fn ts(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(String::new, |t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
}

fn opt(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

/// Audit log columns.
#[must_use]
pub fn audit_log_columns() -> CsvColumns<AuditLog> {
    CsvColumns::<AuditLog>::new()
        .column("Timestamp", |l| l.created_at.clone())
        .column("User ID", |l| opt(l.user_id.as_ref()))
        .column("Action", |l| l.action.clone())
        .column("Resource Type", |l| opt(l.resource_type.as_ref()))
        .column("Resource ID", |l| opt(l.resource_id.as_ref()))
        .column("Result", |l| l.result.clone())
        .column("IP Address", |l| opt(l.ip_address.as_ref()))
}

/// User columns.
#[must_use]
pub fn user_columns() -> CsvColumns<User> {
    CsvColumns::<User>::new()
        .column("ID", |u| u.id.clone())
        .column("Email", |u| u.email.clone())
        .column("Organization", |u| opt(u.organization.as_ref()))
        .column("Role", |u| u.role.clone())
        .column("Status", |u| u.status.as_str().to_string())
        .column("MFA Enabled", |u| u.mfa_enabled.to_string())
        .column("Created At", |u| ts(u.created_at))
        .column("Last Login", |u| ts(u.last_login_at))
}

/// Wallet columns.
#[must_use]
pub fn wallet_columns() -> CsvColumns<Wallet> {
    CsvColumns::<Wallet>::new()
        .column("ID", |w| w.id.clone())
        .column("User ID", |w| w.user_id.clone())
        .column("Currency", |w| w.currency.clone())
        .column("Chain", |w| w.chain.clone())
        .column("Type", |w| w.wallet_type.as_str().to_string())
        .column("Status", |w| w.status.as_str().to_string())
        .column("Balance", |w| w.balance.clone())
        .column("Locked Balance", |w| w.locked_balance.clone())
        .column("Address", |w| opt(w.address.as_ref()))
        .column("Created At", |w| ts(w.created_at))
}

/// Deposit columns.
#[must_use]
pub fn deposit_columns() -> CsvColumns<DepositDetection> {
    CsvColumns::<DepositDetection>::new()
        .column("ID", |d| d.id.clone())
        .column("Chain", |d| d.chain.clone())
        .column("Currency", |d| d.currency.clone())
        .column("Tx Hash", |d| d.tx_hash.clone())
        .column("Address", |d| d.address.clone())
        .column("Amount", |d| d.amount.clone())
        .column("Confirmations", |d| d.confirmations.to_string())
        .column("Required Confirmations", |d| d.required_confirmations.to_string())
        .column("Status", |d| d.status.as_str().to_string())
        .column("Detected At", |d| ts(d.detected_at))
}

/// Withdrawal columns.
#[must_use]
pub fn withdrawal_columns() -> CsvColumns<WithdrawalBroadcast> {
    CsvColumns::<WithdrawalBroadcast>::new()
        .column("ID", |w| w.id.clone())
        .column("Chain", |w| w.chain.clone())
        .column("Currency", |w| w.currency.clone())
        .column("Tx Hash", |w| opt(w.tx_hash.as_ref()))
        .column("To Address", |w| w.to_address.clone())
        .column("Amount", |w| w.amount.clone())
        .column("Status", |w| w.status.as_str().to_string())
        .column("Retry Count", |w| w.retry_count.to_string())
        .column("Error", |w| opt(w.error_message.as_ref()))
        .column("Created At", |w| ts(w.created_at))
}

/// KYC verification columns.
#[must_use]
pub fn kyc_columns() -> CsvColumns<KycVerification> {
    CsvColumns::<KycVerification>::new()
        .column("ID", |k| k.id.clone())
        .column("User ID", |k| k.user_id.clone())
        .column("Level", |k| k.level.clone())
        .column("Status", |k| k.status.as_str().to_string())
        .column("Risk Level", |k| opt(k.risk_level.as_ref()))
        .column("Submitted At", |k| ts(k.submitted_at))
        .column("Reviewed At", |k| ts(k.reviewed_at))
        .column("Expires At", |k| ts(k.expires_at))
}

/// SAR report columns.
#[must_use]
pub fn sar_columns() -> CsvColumns<SarReport> {
    CsvColumns::<SarReport>::new()
        .column("ID", |s| s.id.clone())
        .column("User ID", |s| s.user_id.clone())
        .column("Summary", |s| s.summary.clone())
        .column("Status", |s| s.status.as_str().to_string())
        .column("Deadline", |s| ts(s.deadline_date))
        .column("Filed At", |s| ts(s.filed_at))
        .column("Created At", |s| ts(s.created_at))
}
