//! Party entity <-> model mappers

use lendline_core::entities::{FinancingRequest, Lender, User};

use crate::models::{FinancingRequestModel, LenderModel, UserModel};

/// Convert LenderModel to Lender entity
impl From<LenderModel> for Lender {
    fn from(model: LenderModel) -> Self {
        Lender {
            id: model.id,
            email: model.email,
            name: model.name,
        }
    }
}

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            created_at: model.created_at,
        }
    }
}

/// Convert FinancingRequestModel to FinancingRequest entity
impl From<FinancingRequestModel> for FinancingRequest {
    fn from(model: FinancingRequestModel) -> Self {
        FinancingRequest {
            id: model.id,
            user_id: model.user_id,
            contact_email: model.contact_email,
            property_type: model.property_type,
            loan_amount: model.loan_amount,
            created_at: model.created_at,
        }
    }
}
