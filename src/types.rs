use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tabled::Tabled;

use crate::de;

/// One recorded instance of a user playing a track.
///
/// Fields the client does not model (`user_name`, `inserted_at`,
/// `recording_msid`, ...) are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listen {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listened_at: Option<i64>,
    pub track_metadata: TrackMetadata,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackMetadata {
    pub artist_name: String,
    pub track_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "de::null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub additional_info: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Listen {
    pub fn new(artist_name: impl Into<String>, track_name: impl Into<String>) -> Self {
        Self {
            listened_at: None,
            track_metadata: TrackMetadata {
                artist_name: artist_name.into(),
                track_name: track_name.into(),
                release_name: None,
                additional_info: Map::new(),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    pub fn with_release(mut self, release_name: impl Into<String>) -> Self {
        self.track_metadata.release_name = Some(release_name.into());
        self
    }

    pub fn with_listened_at(mut self, ts: i64) -> Self {
        self.listened_at = Some(ts);
        self
    }

    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.track_metadata
            .additional_info
            .insert(key.into(), value.into());
        self
    }

    /// Returns a copy of this listen with `listened_at` removed.
    pub fn without_timestamp(&self) -> Self {
        Self {
            listened_at: None,
            ..self.clone()
        }
    }
}

/// Selects the submission semantics of a batch of listens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenType {
    Single,
    Import,
    PlayingNow,
}

impl ListenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListenType::Single => "single",
            ListenType::Import => "import",
            ListenType::PlayingNow => "playing_now",
        }
    }
}

impl fmt::Display for ListenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListenType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(ListenType::Single),
            "import" => Ok(ListenType::Import),
            "playing_now" | "playing-now" => Ok(ListenType::PlayingNow),
            other => Err(format!("invalid listen type: {other}")),
        }
    }
}

/// Request body of `POST /submit-listens`.
#[derive(Debug, Serialize)]
pub struct SubmitListens<'a> {
    pub listen_type: ListenType,
    pub payload: &'a [Listen],
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListensResponse {
    pub payload: ListensPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListensPayload {
    #[serde(default)]
    pub listens: Vec<Listen>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    pub payload: FeedPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedPayload {
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(default)]
    pub id: Option<u64>,
    pub event_type: String,
    pub user_name: String,
    pub created: i64,
    #[serde(default)]
    pub metadata: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListenCountResponse {
    pub payload: ListenCount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListenCount {
    #[serde(deserialize_with = "de::u64_or_string")]
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatestImport {
    #[serde(deserialize_with = "de::i64_or_string")]
    pub latest_import: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenValidation {
    pub valid: bool,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Followers {
    pub followers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Following {
    pub following: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimilarUsersResponse {
    pub payload: Vec<SimilarUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarUser {
    pub user_name: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoverArt {
    pub image_url: Option<String>,
}

/// Metadata attached to a "recommend this track" timeline event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackRecommendation {
    pub artist_name: String,
    pub track_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_mbid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_msid: Option<String>,
}

// Statistics

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Artist,
    Release,
    Recording,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Artist => "artist",
            Entity::Release => "release",
            Entity::Recording => "recording",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Entity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().trim_end_matches('s') {
            "artist" => Ok(Entity::Artist),
            "release" => Ok(Entity::Release),
            "recording" => Ok(Entity::Recording),
            other => Err(format!("invalid entity: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsRange {
    Week,
    Month,
    Year,
    #[default]
    AllTime,
}

impl StatsRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsRange::Week => "week",
            StatsRange::Month => "month",
            StatsRange::Year => "year",
            StatsRange::AllTime => "all_time",
        }
    }
}

impl fmt::Display for StatsRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatsRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "week" => Ok(StatsRange::Week),
            "month" => Ok(StatsRange::Month),
            "year" => Ok(StatsRange::Year),
            "all_time" => Ok(StatsRange::AllTime),
            other => Err(format!("invalid range: {other}")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserEntityResponse {
    pub payload: UserEntityPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserEntityPayload {
    pub user_id: String,
    pub range: String,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub from_ts: Option<i64>,
    #[serde(default)]
    pub to_ts: Option<i64>,
    #[serde(default)]
    pub last_updated: Option<i64>,
    #[serde(default)]
    pub artists: Vec<EntityStat>,
    #[serde(default)]
    pub releases: Vec<EntityStat>,
    #[serde(default)]
    pub recordings: Vec<EntityStat>,
    #[serde(default)]
    pub total_artist_count: Option<u64>,
    #[serde(default)]
    pub total_release_count: Option<u64>,
    #[serde(default)]
    pub total_recording_count: Option<u64>,
}

impl UserEntityPayload {
    pub fn entities(&self, entity: Entity) -> &[EntityStat] {
        match entity {
            Entity::Artist => &self.artists,
            Entity::Release => &self.releases,
            Entity::Recording => &self.recordings,
        }
    }

    pub fn total(&self, entity: Entity) -> Option<u64> {
        match entity {
            Entity::Artist => self.total_artist_count,
            Entity::Release => self.total_release_count,
            Entity::Recording => self.total_recording_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStat {
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub release_name: Option<String>,
    #[serde(default)]
    pub track_name: Option<String>,
    pub listen_count: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListeningActivityResponse {
    pub payload: ListeningActivityPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListeningActivityPayload {
    pub user_id: String,
    pub range: String,
    pub listening_activity: Vec<ListeningActivity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListeningActivity {
    pub from_ts: i64,
    pub to_ts: i64,
    pub time_range: String,
    pub listen_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyActivityResponse {
    pub payload: DailyActivityPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyActivityPayload {
    pub user_id: String,
    pub range: String,
    /// Keyed by weekday name.
    pub daily_activity: BTreeMap<String, Vec<HourActivity>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourActivity {
    pub hour: u8,
    pub listen_count: u64,
}

// Feedback

/// Love/hate score of a recording, sent as `1`, `-1` or `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackScore {
    Love,
    Hate,
    Neutral,
}

impl FeedbackScore {
    pub fn value(&self) -> i8 {
        match self {
            FeedbackScore::Love => 1,
            FeedbackScore::Hate => -1,
            FeedbackScore::Neutral => 0,
        }
    }
}

impl Serialize for FeedbackScore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i8(self.value())
    }
}

impl<'de> Deserialize<'de> for FeedbackScore {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match i8::deserialize(de)? {
            1 => Ok(FeedbackScore::Love),
            -1 => Ok(FeedbackScore::Hate),
            0 => Ok(FeedbackScore::Neutral),
            other => Err(serde::de::Error::custom(format!(
                "invalid feedback score {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationRating {
    Love,
    Like,
    Hate,
    Dislike,
    BadRecommendation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackResponse {
    #[serde(default)]
    pub feedback: Vec<Feedback>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub total_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(default)]
    pub recording_msid: Option<String>,
    #[serde(default)]
    pub recording_mbid: Option<String>,
    pub score: FeedbackScore,
    pub user_id: String,
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub track_metadata: Option<Value>,
}

// Playlists (JSPF)

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JspfObject {
    pub playlist: JspfPlaylist,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JspfPlaylist {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub track: Vec<JspfTrack>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extension: Map<String, Value>,
}

impl JspfPlaylist {
    /// The playlist MBID, taken from the last path segment of `identifier`.
    pub fn mbid(&self) -> Option<&str> {
        self.identifier
            .as_deref()
            .map(|id| id.trim_end_matches('/'))
            .and_then(|id| id.rsplit('/').next())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JspfTrack {
    #[serde(default)]
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extension: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPlaylistsResponse {
    #[serde(default)]
    pub playlists: Vec<JspfObject>,
    #[serde(default)]
    pub playlist_count: u64,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub offset: u64,
}

/// Which list of a user's playlists to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaylistKind {
    #[default]
    Owned,
    CreatedFor,
    Collaborator,
}

impl PlaylistKind {
    pub fn path_suffix(&self) -> &'static str {
        match self {
            PlaylistKind::Owned => "",
            PlaylistKind::CreatedFor => "/createdfor",
            PlaylistKind::Collaborator => "/collaborator",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistMbid {
    pub playlist_mbid: String,
}

// Pins

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinnedRecording {
    pub row_id: u64,
    #[serde(default)]
    pub recording_msid: Option<String>,
    #[serde(default)]
    pub recording_mbid: Option<String>,
    #[serde(default)]
    pub blurb_content: Option<String>,
    pub created: i64,
    #[serde(default)]
    pub pinned_until: Option<i64>,
    #[serde(default)]
    pub track_metadata: Option<TrackMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PinsResponse {
    #[serde(default)]
    pub pinned_recordings: Vec<PinnedRecording>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// A review to publish on CritiqueBrainz.
#[derive(Debug, Clone)]
pub struct CritiqueBrainzReview {
    pub entity_id: String,
    pub entity_type: String,
    pub text: String,
    pub language_code: String,
    pub rating: Option<u8>,
}

// Token store

/// A user token that passed `validate-token`, as kept on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: String,
    pub user_name: String,
    pub validated_at: i64,
}

// Table rows

#[derive(Tabled)]
pub struct ListenTableRow {
    pub listened_at: String,
    pub artist: String,
    pub track: String,
    pub release: String,
}

#[derive(Tabled)]
pub struct StatTableRow {
    pub rank: usize,
    pub name: String,
    pub artist: String,
    pub listens: u64,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub title: String,
    pub creator: String,
    pub tracks: usize,
    pub mbid: String,
}

#[derive(Tabled)]
pub struct PinTableRow {
    pub pinned: String,
    pub artist: String,
    pub track: String,
    pub blurb: String,
}
