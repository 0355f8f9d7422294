//! Data Transfer Objects for REST request/response serialization.
//!
//! List rows flatten the backend record and append derived display fields.
//! Amounts stay decimal strings exactly as the backend sent them.

pub mod account_dto;
pub mod blockchain_dto;
pub mod common_dto;
pub mod compliance_dto;
pub mod governance_dto;
pub mod staking_dto;

pub use account_dto::*;
pub use blockchain_dto::*;
pub use common_dto::*;
pub use compliance_dto::*;
pub use governance_dto::*;
pub use staking_dto::*;
