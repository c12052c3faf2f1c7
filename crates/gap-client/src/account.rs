//! Account membership and selection.

use gap_core::clean_membership;
use serde_json::Value;

use crate::error::ClientError;
use crate::http::HttpTransport;
use crate::GapClient;

impl<T: HttpTransport> GapClient<T> {
    /// Accounts the credentials can act on.
    ///
    /// The endpoint answers with a bare array, not a page envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the client is disabled, the request fails,
    /// or the body is not an array.
    pub fn get_memberships(&self) -> Result<Vec<Value>, ClientError> {
        let transport = self.ready()?;
        let body = transport.get(&format!("{}/account/get-memberships", self.api_url))?;
        let Value::Array(memberships) = body else {
            return Err(ClientError::Parse(format!(
                "expected a membership array, got {body}"
            )));
        };
        memberships
            .iter()
            .map(|m| clean_membership(m).map_err(ClientError::from))
            .collect()
    }

    /// Switch the session to `account_id`, or re-select the current account.
    ///
    /// The client's account id is updated before the request is sent, so a
    /// failed switch still targets the requested account afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the client is disabled or the request fails.
    pub fn change_account(&mut self, account_id: Option<&str>) -> Result<(), ClientError> {
        self.ready()?;
        if let Some(id) = account_id {
            self.account_id = id.to_string();
        }
        let url = format!("{}/account/change-account/{}", self.api_url, self.account_id);
        let transport = self.ready()?;
        transport.post(&url, None, &[("account_id", self.account_id.as_str())])?;
        tracing::debug!(account_id = %self.account_id, "account selected");
        Ok(())
    }
}
