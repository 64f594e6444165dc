use serde_json::json;

use super::{Client, TokenAuth};
use crate::{error::Result, types::PinsResponse, utils::require};

impl Client {
    /// Pins a recording to the token owner's profile, replacing the current pin.
    pub async fn pin_recording(
        &self,
        token: &str,
        recording_msid: &str,
        recording_mbid: Option<&str>,
        blurb_content: Option<&str>,
    ) -> Result<u16> {
        let request = self
            .post(self.api_url("pin"))
            .token_auth(token)
            .json(&json!({
                "recording_msid": recording_msid,
                "recording_mbid": recording_mbid,
                "blurb_content": blurb_content,
            }));

        Ok(self.fetch(request).await?.status().as_u16())
    }

    pub async fn unpin_recording(&self, token: &str) -> Result<u16> {
        let request = self.post(self.api_url("pin/unpin")).token_auth(token);
        Ok(self.fetch(request).await?.status().as_u16())
    }

    pub async fn delete_pin(&self, token: &str, pin_id: u64) -> Result<u16> {
        let request = self
            .post(self.api_url(&format!("pin/delete/{pin_id}")))
            .token_auth(token);
        Ok(self.fetch(request).await?.status().as_u16())
    }

    pub async fn pins_for_user(
        &self,
        user_name: &str,
        offset: u64,
        count: u32,
    ) -> Result<PinsResponse> {
        let user_name = require(user_name, "username")?;
        let request = self
            .get(self.api_url(&format!("{user_name}/pins")))
            .query(&[("offset", offset.to_string()), ("count", count.to_string())]);

        self.fetch_json(request).await
    }
}
