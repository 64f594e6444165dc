use std::borrow::Cow;

use lbcli::types::{Entity, Listen, ListenType, StatsRange};
use lbcli::utils::*;

// Helper function to create a batch of test listens
fn create_test_listens(count: usize) -> Vec<Listen> {
    (0..count)
        .map(|i| Listen::new("Aphex Twin", format!("Track {}", i)).with_listened_at(1_600_000_000 + i as i64))
        .collect()
}

#[test]
fn test_normalize_api_root() {
    assert_eq!(normalize_api_root("https://api.listenbrainz.org"), "https://api.listenbrainz.org/1");
    assert_eq!(normalize_api_root("https://api.listenbrainz.org/"), "https://api.listenbrainz.org/1");
    assert_eq!(normalize_api_root("https://api.listenbrainz.org/1"), "https://api.listenbrainz.org/1");
    assert_eq!(normalize_api_root("https://api.listenbrainz.org/1/"), "https://api.listenbrainz.org/1");

    // only one trailing slash is dropped
    assert_eq!(normalize_api_root("http://localhost//"), "http://localhost//1");
}

#[test]
fn test_trim_root() {
    assert_eq!(trim_root("https://musicbrainz.org/ws/2/"), "https://musicbrainz.org/ws/2");
    assert_eq!(trim_root("https://musicbrainz.org/ws/2"), "https://musicbrainz.org/ws/2");
}

#[test]
fn test_split_batch_sizes() {
    for n in [2usize, 3, 7, 10, 11] {
        let items: Vec<usize> = (0..n).collect();
        let (first, second) = split_batch(&items);

        // first half gets the floor
        assert_eq!(first.len(), n / 2);
        assert_eq!(second.len(), n - n / 2);

        // concatenation restores the original order
        let joined: Vec<usize> = first.iter().chain(second).copied().collect();
        assert_eq!(joined, items);
    }
}

#[test]
fn test_prepare_payload_playing_now() {
    let listens = create_test_listens(3);
    let payload = prepare_payload(ListenType::PlayingNow, &listens);

    assert!(matches!(payload, Cow::Owned(_)));
    assert!(payload.iter().all(|l| l.listened_at.is_none()));
    assert_eq!(payload[1].track_metadata.track_name, "Track 1");

    // input keeps its timestamps
    assert!(listens.iter().all(|l| l.listened_at.is_some()));
}

#[test]
fn test_prepare_payload_other_types_borrow() {
    let listens = create_test_listens(2);

    for listen_type in [ListenType::Single, ListenType::Import] {
        let payload = prepare_payload(listen_type, &listens);
        assert!(matches!(payload, Cow::Borrowed(_)));
        assert_eq!(payload.as_ref(), listens.as_slice());
    }
}

#[test]
fn test_payload_size_matches_json() {
    let listens = create_test_listens(4);
    let json = serde_json::to_string(&listens).unwrap();
    assert_eq!(payload_size(&listens).unwrap(), json.len());
    assert_eq!(payload_size(&[]).unwrap(), 2);
}

#[test]
fn test_payload_size_counts_bytes() {
    let ascii = vec![Listen::new("Bjork", "Joga")];
    let accented = vec![Listen::new("Björk", "Jóga")];

    // two non-ASCII characters, one extra byte each
    assert_eq!(payload_size(&accented).unwrap(), payload_size(&ascii).unwrap() + 2);
}

#[test]
fn test_parse_listen_type() {
    assert_eq!("single".parse::<ListenType>(), Ok(ListenType::Single));
    assert_eq!("IMPORT".parse::<ListenType>(), Ok(ListenType::Import));
    assert_eq!("playing-now".parse::<ListenType>(), Ok(ListenType::PlayingNow));
    assert!("scrobble".parse::<ListenType>().is_err());

    assert_eq!(ListenType::PlayingNow.to_string(), "playing_now");
}

#[test]
fn test_parse_entity_and_range() {
    assert_eq!("artists".parse::<Entity>(), Ok(Entity::Artist));
    assert_eq!("Recording".parse::<Entity>(), Ok(Entity::Recording));
    assert!("label".parse::<Entity>().is_err());

    assert_eq!("all-time".parse::<StatsRange>(), Ok(StatsRange::AllTime));
    assert_eq!("week".parse::<StatsRange>(), Ok(StatsRange::Week));
    assert!("decade".parse::<StatsRange>().is_err());
    assert_eq!(StatsRange::default(), StatsRange::AllTime);
}

#[test]
fn test_format_timestamp_missing() {
    assert_eq!(format_timestamp(None), "-");
    assert!(!format_timestamp(Some(1_600_000_000)).is_empty());
}

#[test]
fn test_listen_rows() {
    let listens = vec![
        Listen::new("Portishead", "Roads").with_release("Dummy"),
        Listen::new("Massive Attack", "Angel"),
    ];
    let rows = listen_rows(&listens);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].listened_at, "-");
    assert_eq!(rows[0].release, "Dummy");
    assert_eq!(rows[1].release, "");
    assert_eq!(rows[1].artist, "Massive Attack");
}

#[test]
fn test_require() {
    assert_eq!(require("rob", "username").unwrap(), "rob");
    assert!(matches!(require("  ", "username"), Err(lbcli::Error::MissingArgument("username"))));
}
