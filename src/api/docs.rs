//! OpenAPI document for the console API.

use utoipa::OpenApi;

use super::dto::PaginationMeta;
use super::handlers::{
    audit, blockchain, compliance, dashboard, governance, reports, staking, system, users, wallets,
};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI specification, served at `/api-docs/openapi.json`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "custody-console",
        description = "Admin console gateway for the custodial platform backend."
    ),
    paths(
        system::health_handler,
        dashboard::get_dashboard,
        users::list_users,
        users::export_users,
        users::get_user,
        users::update_user_status,
        users::delete_user,
        wallets::list_wallets,
        wallets::export_wallets,
        wallets::get_wallet,
        wallets::freeze_wallet,
        wallets::unfreeze_wallet,
        blockchain::list_deposits,
        blockchain::export_deposits,
        blockchain::list_withdrawals,
        blockchain::export_withdrawals,
        blockchain::retry_withdrawal,
        blockchain::list_networks,
        governance::list_proposals,
        governance::get_proposal,
        governance::list_votes,
        governance::cast_vote,
        governance::list_delegations,
        staking::list_pools,
        staking::distribute_rewards,
        staking::list_positions,
        staking::unstake,
        staking::list_rewards,
        compliance::list_kyc,
        compliance::export_kyc,
        compliance::list_sar,
        compliance::export_sar,
        compliance::file_sar,
        compliance::list_ctr,
        compliance::list_gdpr,
        compliance::complete_gdpr,
        compliance::list_cases,
        compliance::update_case_status,
        audit::list_audit_logs,
        audit::export_audit_logs,
        reports::list_reports,
        reports::generate_report,
    ),
    components(schemas(ErrorResponse, ErrorBody, PaginationMeta)),
    tags(
        (name = "System", description = "Service health"),
        (name = "Dashboard", description = "Aggregated overview"),
        (name = "Users", description = "User accounts"),
        (name = "Wallets", description = "Custodial wallets"),
        (name = "Blockchain", description = "Deposits, withdrawals and node health"),
        (name = "Governance", description = "Proposals, votes and delegations"),
        (name = "Staking", description = "Pools, positions and rewards"),
        (name = "Compliance", description = "KYC, SAR, CTR, GDPR and cases"),
        (name = "Audit", description = "Audit trail"),
        (name = "Reports", description = "Generated reports"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_console_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/blockchain/withdrawals/{id}/retry"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/compliance/cases/{id}/status"));
    }
}
