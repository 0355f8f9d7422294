//! Shared list and export response builders.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::api::dto::{ListRequest, ListResponse, PaginationMeta};
use crate::client::Page;
use crate::domain::Resource;
use crate::error::ConsoleError;
use crate::export::{self, CsvColumns};
use crate::filter::{Searchable, apply_filters};

/// Filters the fetched page and maps every surviving item to its row.
pub(crate) fn list_response<T, R, F>(page: &Page<T>, request: &ListRequest, row: F) -> ListResponse<R>
where
    T: Searchable + Clone,
    F: Fn(&T) -> R,
{
    let filtered = apply_filters(&page.items, &request.filters);
    let data: Vec<R> = filtered.iter().map(row).collect();
    ListResponse {
        pagination: PaginationMeta {
            page: request.pagination.page,
            page_size: request.pagination.page_size,
            total: page.total_or_len(),
            returned: data.len(),
        },
        data,
    }
}

/// Renders the filtered page as a CSV attachment.
///
/// # Errors
///
/// Returns [`ConsoleError::Export`] if the document cannot be written.
pub(crate) fn csv_response<T>(
    resource: Resource,
    page: &Page<T>,
    request: &ListRequest,
    columns: &CsvColumns<T>,
) -> Result<Response, ConsoleError>
where
    T: Searchable + Clone,
{
    let rows = apply_filters(&page.items, &request.filters);
    let body = export::to_csv(&rows, columns)?;
    let filename = export::export_filename(export::export_stem(resource), Utc::now().date_naive());
    tracing::debug!(resource = %resource.as_str(), rows = rows.len(), %filename, "csv export");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response())
}

/// Rejects a mutation body value outside `allowed`.
///
/// # Errors
///
/// Returns [`ConsoleError::InvalidRequest`] naming the field.
pub(crate) fn require_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), ConsoleError> {
    if allowed.contains(&value.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ConsoleError::InvalidRequest(format!(
            "{field} must be one of: {}",
            allowed.join(", ")
        )))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::api::dto::{ListQuery, QuerySchema};
    use crate::domain::{SUPPORTED_CHAINS, WireEnum, WithdrawalBroadcast, WithdrawalStatus};

    fn withdrawals() -> Page<WithdrawalBroadcast> {
        Page {
            items: vec![
                WithdrawalBroadcast {
                    id: "w-1".to_string(),
                    status: WithdrawalStatus::Failed,
                    ..WithdrawalBroadcast::default()
                },
                WithdrawalBroadcast {
                    id: "w-2".to_string(),
                    status: WithdrawalStatus::Broadcasted,
                    ..WithdrawalBroadcast::default()
                },
            ],
            total: Some(42),
        }
    }

    fn request(status: &str) -> ListRequest {
        let query = ListQuery {
            status: Some(status.to_string()),
            ..ListQuery::default()
        };
        query.resolve(&QuerySchema {
            status: WithdrawalStatus::VARIANTS,
            kind: &[],
            chain: SUPPORTED_CHAINS,
        })
    }

    #[test]
    fn list_reports_backend_total_and_filtered_count() {
        let response = list_response(&withdrawals(), &request("failed"), |w| w.id.clone());
        assert_eq!(response.data, vec!["w-1".to_string()]);
        assert_eq!(response.pagination.total, 42);
        assert_eq!(response.pagination.returned, 1);
        assert_eq!(response.pagination.page, 1);
    }

    #[test]
    fn csv_sets_attachment_headers() {
        let columns = CsvColumns::<WithdrawalBroadcast>::new().column("ID", |w| w.id.clone());
        let Ok(response) = csv_response(Resource::Withdrawals, &withdrawals(), &request(""), &columns)
        else {
            panic!("export failed");
        };
        let headers = response.headers();
        assert_eq!(
            headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("text/csv; charset=utf-8")
        );
        let disposition = headers
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(disposition.starts_with("attachment; filename=\"withdrawals-"));
        assert!(disposition.ends_with(".csv\""));
    }

    #[test]
    fn body_values_are_checked() {
        assert!(require_one_of("status", "Active", &["active", "locked"]).is_ok());
        let Err(ConsoleError::InvalidRequest(msg)) = require_one_of("status", "gone", &["active"])
        else {
            panic!("expected InvalidRequest");
        };
        assert!(msg.contains("active"));
    }
}
