use serde_json::{Value, json};

use super::{Client, TokenAuth};
use crate::{
    error::Result,
    types::{FeedbackResponse, FeedbackScore, RecommendationRating},
    utils::require,
};

impl Client {
    /// Loves, hates or clears the feedback on a recording.
    pub async fn submit_feedback(
        &self,
        token: &str,
        recording_msid: &str,
        score: FeedbackScore,
    ) -> Result<u16> {
        let request = self
            .post(self.api_url("feedback/recording-feedback"))
            .token_auth(token)
            .json(&json!({ "recording_msid": recording_msid, "score": score }));

        Ok(self.fetch(request).await?.status().as_u16())
    }

    /// Fetches a page of the feedback a user has given, with track metadata.
    pub async fn feedback_for_user(
        &self,
        user_name: &str,
        offset: u64,
        count: Option<u32>,
        score: Option<FeedbackScore>,
    ) -> Result<FeedbackResponse> {
        let user_name = require(user_name, "username")?;

        let mut query = vec![
            ("metadata", "true".to_string()),
            ("offset", offset.to_string()),
        ];
        if let Some(score) = score {
            query.push(("score", score.value().to_string()));
        }
        if let Some(count) = count {
            query.push(("count", count.to_string()));
        }

        let request = self
            .get(self.api_url(&format!("feedback/user/{user_name}/get-feedback")))
            .query(&query);
        self.fetch_json(request).await
    }

    /// Fetches the user's feedback for specific recordings (comma separated MSIDs).
    pub async fn feedback_for_user_for_recordings(
        &self,
        user_name: &str,
        recordings: &str,
    ) -> Result<FeedbackResponse> {
        let user_name = require(user_name, "username")?;
        let request = self
            .get(self.api_url(&format!(
                "feedback/user/{user_name}/get-feedback-for-recordings"
            )))
            .query(&[("recordings", recordings)]);
        self.fetch_json(request).await
    }

    pub async fn submit_recommendation_feedback(
        &self,
        token: &str,
        recording_mbid: &str,
        rating: RecommendationRating,
    ) -> Result<u16> {
        let request = self
            .post(self.api_url("recommendation/feedback/submit"))
            .token_auth(token)
            .json(&json!({ "recording_mbid": recording_mbid, "rating": rating }));

        Ok(self.fetch(request).await?.status().as_u16())
    }

    pub async fn delete_recommendation_feedback(
        &self,
        token: &str,
        recording_mbid: &str,
    ) -> Result<u16> {
        let request = self
            .post(self.api_url("recommendation/feedback/delete"))
            .token_auth(token)
            .json(&json!({ "recording_mbid": recording_mbid }));

        Ok(self.fetch(request).await?.status().as_u16())
    }

    pub async fn feedback_for_user_for_recommendations(
        &self,
        user_name: &str,
        mbids: &str,
    ) -> Result<Value> {
        let user_name = require(user_name, "username")?;
        let request = self
            .get(self.api_url(&format!(
                "recommendation/feedback/user/{user_name}/recordings"
            )))
            .query(&[("mbids", mbids)]);
        self.fetch_json(request).await
    }
}
