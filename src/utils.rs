use std::borrow::Cow;

use chrono::{DateTime, Local};

use crate::types::{
    EntityStat, Entity, JspfObject, Listen, ListenTableRow, ListenType, PinTableRow,
    PinnedRecording, PlaylistTableRow, StatTableRow,
};

/// Normalises a ListenBrainz API root so that it ends in exactly one `/1`.
///
/// A single trailing slash is dropped first; `/1` is appended unless the
/// root already ends with it.
pub fn normalize_api_root(root: &str) -> String {
    let root = root.strip_suffix('/').unwrap_or(root);
    if root.ends_with("/1") {
        root.to_string()
    } else {
        format!("{root}/1")
    }
}

pub fn trim_root(root: &str) -> String {
    root.trim_end_matches('/').to_string()
}

/// Splits a batch at its midpoint; the first half gets the floor.
pub fn split_batch<T>(items: &[T]) -> (&[T], &[T]) {
    items.split_at(items.len() / 2)
}

/// Returns the listens as they go on the wire for the given listen type.
///
/// `playing_now` submissions must not carry a timestamp, so those listens are
/// copied without `listened_at`. The input is never modified.
pub fn prepare_payload(listen_type: ListenType, listens: &[Listen]) -> Cow<'_, [Listen]> {
    match listen_type {
        ListenType::PlayingNow => Cow::Owned(listens.iter().map(Listen::without_timestamp).collect()),
        _ => Cow::Borrowed(listens),
    }
}

/// Byte length of the JSON array the payload serializes to.
pub fn payload_size(listens: &[Listen]) -> Result<usize, serde_json::Error> {
    serde_json::to_vec(listens).map(|bytes| bytes.len())
}

pub fn format_timestamp(ts: Option<i64>) -> String {
    ts.and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn listen_rows(listens: &[Listen]) -> Vec<ListenTableRow> {
    listens
        .iter()
        .map(|l| ListenTableRow {
            listened_at: format_timestamp(l.listened_at),
            artist: l.track_metadata.artist_name.clone(),
            track: l.track_metadata.track_name.clone(),
            release: l.track_metadata.release_name.clone().unwrap_or_default(),
        })
        .collect()
}

pub fn stat_rows(entity: Entity, stats: &[EntityStat], offset: u64) -> Vec<StatTableRow> {
    stats
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let name = match entity {
                Entity::Artist => s.artist_name.clone(),
                Entity::Release => s.release_name.clone().unwrap_or_default(),
                Entity::Recording => s.track_name.clone().unwrap_or_default(),
            };
            let artist = match entity {
                Entity::Artist => String::new(),
                _ => s.artist_name.clone(),
            };
            StatTableRow {
                rank: offset as usize + i + 1,
                name,
                artist,
                listens: s.listen_count,
            }
        })
        .collect()
}

pub fn playlist_rows(playlists: &[JspfObject]) -> Vec<PlaylistTableRow> {
    playlists
        .iter()
        .map(|p| PlaylistTableRow {
            title: p.playlist.title.clone(),
            creator: p.playlist.creator.clone().unwrap_or_default(),
            tracks: p.playlist.track.len(),
            mbid: p.playlist.mbid().unwrap_or_default().to_string(),
        })
        .collect()
}

pub fn pin_rows(pins: &[PinnedRecording]) -> Vec<PinTableRow> {
    pins.iter()
        .map(|p| {
            let (artist, track) = p
                .track_metadata
                .as_ref()
                .map(|m| (m.artist_name.clone(), m.track_name.clone()))
                .unwrap_or_default();
            PinTableRow {
                pinned: format_timestamp(Some(p.created)),
                artist,
                track,
                blurb: p.blurb_content.clone().unwrap_or_default(),
            }
        })
        .collect()
}

/// Rejects empty required string arguments before any request is made.
pub fn require<'a>(value: &'a str, name: &'static str) -> Result<&'a str, crate::Error> {
    if value.trim().is_empty() {
        Err(crate::Error::MissingArgument(name))
    } else {
        Ok(value)
    }
}
