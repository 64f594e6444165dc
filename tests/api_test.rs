mod common;

use common::MockServer;
use lbcli::{
    Error,
    listenbrainz::{Client, ClientConfig},
    types::{Entity, JspfObject, PlaylistKind, StatsRange},
};
use reqwest::StatusCode;
use serde_json::json;

#[test]
fn test_api_root_normalisation() {
    assert_eq!(Client::new("http://host").api_root(), "http://host/1");
    assert_eq!(Client::new("http://host/").api_root(), "http://host/1");
    assert_eq!(Client::new("http://host/1").api_root(), "http://host/1");
    assert_eq!(Client::new("http://host/1/").api_root(), "http://host/1");
}

#[tokio::test]
async fn test_stats_no_content_is_an_error() {
    let server = MockServer::start().await;
    server.respond(204, json!(null));

    let err = server
        .client()
        .user_entity("rob", Entity::Artist, StatsRange::Week, 0, None)
        .await
        .unwrap_err();

    let api = err.as_api().expect("api error");
    assert_eq!(api.status, StatusCode::NO_CONTENT);
    assert_eq!(api.message, "HTTP Error No Content");

    let requests = server.requests();
    assert_eq!(requests[0].path, "/1/stats/user/rob/artists");
    assert_eq!(requests[0].query.as_deref(), Some("offset=0&range=week"));
}

#[tokio::test]
async fn test_stats_are_decoded() {
    let server = MockServer::start().await;
    server.respond(
        200,
        json!({
            "payload": {
                "user_id": "rob",
                "range": "all_time",
                "offset": 0,
                "count": 1,
                "total_recording_count": 42,
                "recordings": [{
                    "artist_name": "Massive Attack",
                    "track_name": "Teardrop",
                    "listen_count": 17
                }]
            }
        }),
    );

    let payload = server
        .client()
        .user_entity("rob", Entity::Recording, StatsRange::AllTime, 0, Some(1))
        .await
        .unwrap();

    assert_eq!(payload.total(Entity::Recording), Some(42));
    let stats = payload.entities(Entity::Recording);
    assert_eq!(stats[0].track_name.as_deref(), Some("Teardrop"));
    assert_eq!(stats[0].listen_count, 17);
}

#[tokio::test]
async fn test_error_message_from_json_body() {
    let server = MockServer::start().await;
    server.respond(404, json!({ "code": 404, "error": "Cannot find user: nobody" }));

    let err = server.client().followers_of_user("nobody").await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.to_string(), "Cannot find user: nobody");
}

#[tokio::test]
async fn test_followers_are_decoded() {
    let server = MockServer::start().await;
    server.respond(200, json!({ "followers": ["alice", "bob"], "user": "rob" }));

    let followers = server.client().followers_of_user("rob").await.unwrap();

    assert_eq!(followers, vec!["alice", "bob"]);
    assert_eq!(server.requests()[0].path, "/1/user/rob/followers");
}

#[tokio::test]
async fn test_follow_returns_status_without_raising() {
    let server = MockServer::start().await;
    server.respond(400, json!({ "code": 400, "error": "already following" }));

    let status = server.client().follow_user("alice", "secret").await.unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let requests = server.requests();
    assert_eq!(requests[0].path, "/1/user/alice/follow");
    assert_eq!(requests[0].authorization.as_deref(), Some("Token secret"));
}

#[tokio::test]
async fn test_listens_with_both_bounds_is_rejected() {
    let server = MockServer::start().await;

    let err = server
        .client()
        .listens_for_user("rob", Some(1), Some(2), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_missing_arguments_fail_before_request() {
    let server = MockServer::start().await;
    let client = server.client();

    assert!(matches!(
        client.followers_of_user("").await,
        Err(Error::MissingArgument("username"))
    ));
    assert!(matches!(
        client.create_playlist("secret", &JspfObject { playlist: Default::default() }).await,
        Err(Error::MissingArgument("playlist title"))
    ));
    assert!(matches!(
        client.delete_playlist("secret", "").await,
        Err(Error::MissingArgument("playlist MBID"))
    ));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_listens_query() {
    let server = MockServer::start().await;
    server.respond(
        200,
        json!({
            "payload": {
                "count": 1,
                "user_id": "rob",
                "listens": [{
                    "listened_at": 1700000000,
                    "recording_msid": "d23f4719-9212-49f0-ad08-ddbfbfc50d6f",
                    "track_metadata": {
                        "artist_name": "Portishead",
                        "track_name": "Roads",
                        "additional_info": { "listening_from": "lbcli" }
                    }
                }]
            }
        }),
    );

    let listens = server
        .client()
        .listens_for_user("rob", None, Some(1_700_000_100), Some(10))
        .await
        .unwrap();

    assert_eq!(listens.len(), 1);
    assert_eq!(listens[0].listened_at, Some(1_700_000_000));
    assert_eq!(listens[0].track_metadata.track_name, "Roads");
    assert_eq!(
        listens[0].extra["recording_msid"],
        "d23f4719-9212-49f0-ad08-ddbfbfc50d6f"
    );
    assert_eq!(
        server.requests()[0].query.as_deref(),
        Some("max_ts=1700000100&count=10")
    );
}

#[tokio::test]
async fn test_user_playlists_kind_and_token() {
    let server = MockServer::start().await;
    server.respond(
        200,
        json!({
            "playlist_count": 1,
            "count": 25,
            "offset": 0,
            "playlists": [{
                "playlist": {
                    "title": "Weekly Jams",
                    "creator": "troi-bot",
                    "identifier": "https://listenbrainz.org/playlist/4f8f32b3-3b0c-4f4b-9ae0-6a4c1a5f9d39",
                    "track": []
                }
            }]
        }),
    );

    let resp = server
        .client()
        .user_playlists("rob", Some("secret"), 0, 25, PlaylistKind::CreatedFor)
        .await
        .unwrap();

    assert_eq!(
        resp.playlists[0].playlist.mbid(),
        Some("4f8f32b3-3b0c-4f4b-9ae0-6a4c1a5f9d39")
    );
    let requests = server.requests();
    assert_eq!(requests[0].path, "/1/user/rob/playlists/createdfor");
    assert_eq!(requests[0].query.as_deref(), Some("offset=0&count=25"));
    assert_eq!(requests[0].authorization.as_deref(), Some("Token secret"));
}

#[tokio::test]
async fn test_pins_path() {
    let server = MockServer::start().await;
    server.respond(
        200,
        json!({
            "count": 1,
            "offset": 0,
            "total_count": 1,
            "user_name": "rob",
            "pinned_recordings": [{
                "row_id": 7,
                "created": 1700000000,
                "blurb_content": "on repeat",
                "recording_msid": "4e1c0b4d-1a43-4b7c-9d1f-4d1c2e0c6a52"
            }]
        }),
    );

    let resp = server.client().pins_for_user("rob", 0, 25).await.unwrap();

    assert_eq!(resp.pinned_recordings[0].row_id, 7);
    assert_eq!(server.requests()[0].path, "/1/rob/pins");
}

#[tokio::test]
async fn test_musicbrainz_lookup_uses_its_own_root() {
    let server = MockServer::start().await;
    server.respond(200, json!({ "id": "mbid", "title": "Mezzanine" }));

    let client = Client::with_config(ClientConfig {
        musicbrainz_root: format!("{}/ws/2/", server.addr),
        ..ClientConfig::default().with_api_root("http://unused.invalid")
    });
    let release = client.lookup_mb_release("mbid").await.unwrap();

    assert_eq!(release["title"], "Mezzanine");
    let requests = server.requests();
    assert_eq!(requests[0].path, "/ws/2/release/mbid");
    assert_eq!(
        requests[0].query.as_deref(),
        Some("fmt=json&inc=release-groups")
    );
}

#[tokio::test]
async fn test_validate_token() {
    let server = MockServer::start().await;
    server.respond(
        200,
        json!({ "code": 200, "message": "Token valid.", "valid": true, "user_name": "rob" }),
    );

    let validation = server.client().validate_token("secret").await.unwrap();

    assert!(validation.valid);
    assert_eq!(validation.user_name.as_deref(), Some("rob"));
    assert_eq!(server.requests()[0].authorization.as_deref(), Some("Token secret"));
}
