//! Administrator calls.

use serde::{Deserialize, Serialize};

use super::{json_body, ApiClient};
use crate::endpoint::Endpoint;
use crate::outcome::Outcome;
use crate::request::RequestDescriptor;
use crate::session::Session;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientEdit {
    pub recipient_email: String,
    pub available_credits: i64,
    pub extra_credits: i64,
    pub credit_limit: i64,
    pub approval_status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientApproval {
    pub recipient_email: String,
    pub approval_status: bool,
}

impl ApiClient {
    /// GET `/api/admin/recipients`
    pub async fn recipients(&self, session: &Session) -> Outcome {
        self.perform(
            RequestDescriptor::get(Endpoint::AdminRecipients).authenticated(),
            session,
        )
        .await
    }

    /// PUT `/api/admin/edit-recipient`
    pub async fn edit_recipient(&self, session: &Session, edit: &RecipientEdit) -> Outcome {
        self.perform(
            RequestDescriptor::put(Endpoint::AdminEditRecipient, json_body(edit)).authenticated(),
            session,
        )
        .await
    }

    /// PUT `/api/admin/recipient-approval`
    pub async fn approve_recipient(
        &self,
        session: &Session,
        approval: &RecipientApproval,
    ) -> Outcome {
        self.perform(
            RequestDescriptor::put(Endpoint::AdminRecipientApproval, json_body(approval))
                .authenticated(),
            session,
        )
        .await
    }

    /// GET `/api/admin/log`
    pub async fn admin_logs(&self, session: &Session) -> Outcome {
        self.perform(
            RequestDescriptor::get(Endpoint::AdminLog).authenticated(),
            session,
        )
        .await
    }
}
