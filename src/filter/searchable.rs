use crate::domain::{
    AuditLog, ComplianceCase, CtrReport, Delegation, DepositDetection, GdprDataRequest,
    GovernanceProposal, KycVerification, NetworkStatus, Report, SarReport, StakingPool,
    StakingPosition, StakingReward, User, Vote, Wallet, WireEnum, WithdrawalBroadcast,
};

/// An entity that can be narrowed by a [`super::FilterSet`].
pub trait Searchable {
    /// Fields matched by the free-text query.
    fn text_fields(&self) -> Vec<&str>;

    /// Value of an enumerated field, or `None` if the entity has no such
    /// field.
    fn enum_field(&self, field: &str) -> Option<&str>;
}

fn opt(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

impl Searchable for User {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.email.as_str(), opt(self.organization.as_ref())]
    }

    fn enum_field(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(self.status.as_str()),
            "role" => Some(self.role.as_str()),
            _ => None,
        }
    }
}

impl Searchable for Wallet {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.user_id.as_str(), self.currency.as_str()]
    }

    fn enum_field(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(self.status.as_str()),
            "type" => Some(self.wallet_type.as_str()),
            "chain" => Some(self.chain.as_str()),
            "currency" => Some(self.currency.as_str()),
            _ => None,
        }
    }
}

impl Searchable for DepositDetection {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.tx_hash.as_str(), self.address.as_str()]
    }

    fn enum_field(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(self.status.as_str()),
            "chain" => Some(self.chain.as_str()),
            "currency" => Some(self.currency.as_str()),
            _ => None,
        }
    }
}

impl Searchable for WithdrawalBroadcast {
    fn text_fields(&self) -> Vec<&str> {
        vec![opt(self.tx_hash.as_ref()), self.to_address.as_str()]
    }

    fn enum_field(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(self.status.as_str()),
            "chain" => Some(self.chain.as_str()),
            "currency" => Some(self.currency.as_str()),
            _ => None,
        }
    }
}

impl Searchable for NetworkStatus {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.chain.as_str()]
    }

    fn enum_field(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(self.status.as_str()),
            "chain" => Some(self.chain.as_str()),
            _ => None,
        }
    }
}

impl Searchable for GovernanceProposal {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.proposer.as_str()]
    }

    fn enum_field(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }
}

impl Searchable for Vote {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.voter.as_str()]
    }

    fn enum_field(&self, field: &str) -> Option<&str> {
        match field {
            "choice" => Some(self.choice.as_str()),
            _ => None,
        }
    }
}

impl Searchable for Delegation {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.delegator.as_str(), self.delegate.as_str()]
    }

    fn enum_field(&self, _field: &str) -> Option<&str> {
        None
    }
}

impl Searchable for StakingPool {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.currency.as_str()]
    }

    fn enum_field(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(self.status.as_str()),
            "currency" => Some(self.currency.as_str()),
            _ => None,
        }
    }
}

impl Searchable for StakingPosition {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.pool_id.as_str(), self.user_id.as_str()]
    }

    fn enum_field(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }
}

impl Searchable for StakingReward {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.position_id.as_str(), self.pool_id.as_str()]
    }

    fn enum_field(&self, _field: &str) -> Option<&str> {
        None
    }
}

impl Searchable for KycVerification {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.user_id.as_str()]
    }

    fn enum_field(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(self.status.as_str()),
            "level" => Some(self.level.as_str()),
            "risk_level" => self.risk_level.as_deref(),
            _ => None,
        }
    }
}

impl Searchable for SarReport {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.user_id.as_str(), self.summary.as_str()]
    }

    fn enum_field(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }
}

impl Searchable for CtrReport {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.user_id.as_str()]
    }

    fn enum_field(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(self.status.as_str()),
            "currency" => Some(self.currency.as_str()),
            _ => None,
        }
    }
}

impl Searchable for GdprDataRequest {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.user_id.as_str()]
    }

    fn enum_field(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(self.status.as_str()),
            "type" => Some(self.request_type.as_str()),
            _ => None,
        }
    }
}

impl Searchable for ComplianceCase {
    fn text_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.title.as_str(),
            opt(self.user_id.as_ref()),
            opt(self.assignee.as_ref()),
        ]
    }

    fn enum_field(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(self.status.as_str()),
            "priority" => Some(self.priority.as_str()),
            _ => None,
        }
    }
}

impl Searchable for AuditLog {
    fn text_fields(&self) -> Vec<&str> {
        vec![
            self.action.as_str(),
            opt(self.resource_type.as_ref()),
            opt(self.ip_address.as_ref()),
        ]
    }

    fn enum_field(&self, field: &str) -> Option<&str> {
        match field {
            "result" => Some(self.result.as_str()),
            "type" => self.resource_type.as_deref(),
            _ => None,
        }
    }
}

impl Searchable for Report {
    fn text_fields(&self) -> Vec<&str> {
        vec![self.report_type.as_str(), self.requested_by.as_str()]
    }

    fn enum_field(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(self.status.as_str()),
            "type" => Some(self.report_type.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{WalletType, WithdrawalStatus};

    #[test]
    fn wallet_type_uses_wire_value() {
        let wallet = Wallet {
            wallet_type: WalletType::Cold,
            ..Wallet::default()
        };
        assert_eq!(wallet.enum_field("type"), Some("cold"));
        assert_eq!(wallet.enum_field("role"), None);
    }

    #[test]
    fn missing_tx_hash_is_blank() {
        let withdrawal = WithdrawalBroadcast {
            to_address: "0xabc".to_string(),
            status: WithdrawalStatus::Failed,
            ..WithdrawalBroadcast::default()
        };
        assert_eq!(withdrawal.text_fields(), ["", "0xabc"]);
        assert_eq!(withdrawal.enum_field("status"), Some("failed"));
    }
}
