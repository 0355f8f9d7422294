//! Compliance rows with deadline flags.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{ComplianceCase, CtrReport, GdprDataRequest, KycVerification, SarReport};
use crate::metrics;

/// KYC verification with its expiry flag.
#[derive(Debug, Clone, Serialize)]
pub struct KycRow {
    /// Backend record.
    #[serde(flatten)]
    pub kyc: KycVerification,
    /// `expires_at` lies in the past.
    pub expired: bool,
}

impl KycRow {
    /// Derives the row as of `now`.
    #[must_use]
    pub fn new(kyc: &KycVerification, now: DateTime<Utc>) -> Self {
        Self {
            expired: metrics::kyc_expired(kyc, now),
            kyc: kyc.clone(),
        }
    }
}

/// A regulatory record with its overdue flag.
#[derive(Debug, Clone, Serialize)]
pub struct DeadlineRow<T> {
    /// Backend record.
    #[serde(flatten)]
    pub record: T,
    /// Deadline passed without the terminal action.
    pub overdue: bool,
}

impl DeadlineRow<SarReport> {
    /// Derives the row as of `now`.
    #[must_use]
    pub fn sar(report: &SarReport, now: DateTime<Utc>) -> Self {
        Self {
            overdue: metrics::sar_overdue(report, now),
            record: report.clone(),
        }
    }
}

impl DeadlineRow<CtrReport> {
    /// Derives the row as of `now`.
    #[must_use]
    pub fn ctr(report: &CtrReport, now: DateTime<Utc>) -> Self {
        Self {
            overdue: metrics::ctr_overdue(report, now),
            record: report.clone(),
        }
    }
}

impl DeadlineRow<GdprDataRequest> {
    /// Derives the row as of `now`.
    #[must_use]
    pub fn gdpr(request: &GdprDataRequest, now: DateTime<Utc>) -> Self {
        Self {
            overdue: metrics::gdpr_overdue(request, now),
            record: request.clone(),
        }
    }
}

impl DeadlineRow<ComplianceCase> {
    /// Derives the row as of `now`.
    #[must_use]
    pub fn case(case: &ComplianceCase, now: DateTime<Utc>) -> Self {
        Self {
            overdue: metrics::case_overdue(case, now),
            record: case.clone(),
        }
    }
}
