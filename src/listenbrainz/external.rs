//! MusicBrainz lookups and CritiqueBrainz review submission.

use serde_json::{Value, json};

use super::Client;
use crate::{error::Result, types::CritiqueBrainzReview, utils::require};

/// License every review is published under.
const REVIEW_LICENSE: &str = "CC BY-SA 3.0";

impl Client {
    /// Looks up a MusicBrainz release together with its release group.
    pub async fn lookup_mb_release(&self, release_mbid: &str) -> Result<Value> {
        let release_mbid = require(release_mbid, "release MBID")?;
        let url = format!("{}/release/{release_mbid}", self.config.musicbrainz_root);
        let request = self
            .get(url)
            .query(&[("fmt", "json"), ("inc", "release-groups")]);

        self.fetch_json(request).await
    }

    /// Finds the MusicBrainz releases that contain a track.
    pub async fn lookup_mb_release_from_track(&self, track_mbid: &str) -> Result<Value> {
        let track_mbid = require(track_mbid, "track MBID")?;
        let url = format!("{}/release", self.config.musicbrainz_root);
        let request = self.get(url).query(&[("track", track_mbid), ("fmt", "json")]);

        self.fetch_json(request).await
    }

    /// Publishes a review on CritiqueBrainz using an OAuth access token.
    pub async fn submit_review_to_cb(
        &self,
        access_token: &str,
        review: &CritiqueBrainzReview,
    ) -> Result<Value> {
        let access_token = require(access_token, "access token")?;
        let url = format!("{}/review/", self.config.critiquebrainz_root);
        let request = self.post(url).bearer_auth(access_token).json(&json!({
            "is_draft": false,
            "entity_id": review.entity_id,
            "entity_type": review.entity_type,
            "text": review.text,
            "license_choice": REVIEW_LICENSE,
            "language": review.language_code,
            "rating": review.rating,
        }));

        self.fetch_json(request).await
    }
}
