//! JSPF playlist management.

use serde_json::json;

use super::{Client, TokenAuth};
use crate::{
    error::{Error, Result},
    types::{JspfObject, JspfTrack, PlaylistKind, PlaylistMbid, UserPlaylistsResponse},
    utils::require,
};

impl Client {
    /// Creates a playlist and returns its MBID. The playlist must have a title.
    pub async fn create_playlist(&self, token: &str, playlist: &JspfObject) -> Result<String> {
        if playlist.playlist.title.trim().is_empty() {
            return Err(Error::MissingArgument("playlist title"));
        }

        let request = self
            .post(self.api_url("playlist/create"))
            .token_auth(token)
            .json(playlist);

        let resp: PlaylistMbid = self.fetch_json(request).await?;
        Ok(resp.playlist_mbid)
    }

    pub async fn edit_playlist(
        &self,
        token: &str,
        playlist_mbid: &str,
        playlist: &JspfObject,
    ) -> Result<u16> {
        let playlist_mbid = require(playlist_mbid, "playlist MBID")?;
        let request = self
            .post(self.api_url(&format!("playlist/edit/{playlist_mbid}")))
            .token_auth(token)
            .json(playlist);

        Ok(self.fetch(request).await?.status().as_u16())
    }

    /// Lists a user's playlists. Private playlists are only included when the
    /// token belongs to that user.
    pub async fn user_playlists(
        &self,
        user_name: &str,
        token: Option<&str>,
        offset: u64,
        count: u32,
        kind: PlaylistKind,
    ) -> Result<UserPlaylistsResponse> {
        let user_name = require(user_name, "username")?;
        let request = self
            .get(self.api_url(&format!(
                "user/{user_name}/playlists{}",
                kind.path_suffix()
            )))
            .query(&[("offset", offset.to_string()), ("count", count.to_string())])
            .maybe_token_auth(token);

        self.fetch_json(request).await
    }

    pub async fn playlist(&self, playlist_mbid: &str, token: Option<&str>) -> Result<JspfObject> {
        let playlist_mbid = require(playlist_mbid, "playlist MBID")?;
        let request = self
            .get(self.api_url(&format!("playlist/{playlist_mbid}")))
            .maybe_token_auth(token);

        self.fetch_json(request).await
    }

    /// Appends tracks, or inserts them at `offset` when given.
    pub async fn add_playlist_items(
        &self,
        token: &str,
        playlist_mbid: &str,
        tracks: &[JspfTrack],
        offset: Option<u64>,
    ) -> Result<u16> {
        let playlist_mbid = require(playlist_mbid, "playlist MBID")?;
        let mut request = self
            .post(self.api_url(&format!("playlist/{playlist_mbid}/item/add")))
            .token_auth(token)
            .json(&json!({ "playlist": { "track": tracks } }));
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }

        Ok(self.fetch(request).await?.status().as_u16())
    }

    /// Removes `count` tracks starting at `index`.
    pub async fn delete_playlist_items(
        &self,
        token: &str,
        playlist_mbid: &str,
        index: u64,
        count: u64,
    ) -> Result<u16> {
        let playlist_mbid = require(playlist_mbid, "playlist MBID")?;
        let request = self
            .post(self.api_url(&format!("playlist/{playlist_mbid}/item/delete")))
            .token_auth(token)
            .json(&json!({ "index": index, "count": count }));

        Ok(self.fetch(request).await?.status().as_u16())
    }

    pub async fn move_playlist_item(
        &self,
        token: &str,
        playlist_mbid: &str,
        recording_mbid: &str,
        from: u64,
        to: u64,
        count: u64,
    ) -> Result<u16> {
        let playlist_mbid = require(playlist_mbid, "playlist MBID")?;
        let request = self
            .post(self.api_url(&format!("playlist/{playlist_mbid}/item/move")))
            .token_auth(token)
            .json(&json!({
                "mbid": recording_mbid,
                "from": from,
                "to": to,
                "count": count,
            }));

        Ok(self.fetch(request).await?.status().as_u16())
    }

    /// Copies a playlist into the token owner's account and returns the new MBID.
    pub async fn copy_playlist(&self, token: &str, playlist_mbid: &str) -> Result<String> {
        let playlist_mbid = require(playlist_mbid, "playlist MBID")?;
        let request = self
            .post(self.api_url(&format!("playlist/{playlist_mbid}/copy")))
            .token_auth(token);

        let resp: PlaylistMbid = self.fetch_json(request).await?;
        Ok(resp.playlist_mbid)
    }

    pub async fn delete_playlist(&self, token: &str, playlist_mbid: &str) -> Result<u16> {
        let playlist_mbid = require(playlist_mbid, "playlist MBID")?;
        let request = self
            .post(self.api_url(&format!("playlist/{playlist_mbid}/delete")))
            .token_auth(token);

        Ok(self.fetch(request).await?.status().as_u16())
    }
}
