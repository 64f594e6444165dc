use std::{path::PathBuf, time::Duration};

use chrono::Utc;
use tabled::Table;
use tokio::time::sleep;

use crate::{
    error, info,
    listenbrainz::{RawResponse, Submission},
    success,
    types::{Listen, ListenType},
    utils, warning,
};

use super::{client, resolve_token, spinner};

/// Imports listens from JSON files, each holding an array of listens.
///
/// Listens are submitted in batches of `batch_size`. Between batches the
/// rate-limit headers of the last response are honoured.
pub async fn import(
    files: Vec<PathBuf>,
    batch_size: usize,
    listen_type: ListenType,
    token: Option<String>,
) {
    let token = resolve_token(token).await;
    let client = client();

    let mut listens: Vec<Listen> = Vec::new();
    for file in &files {
        let content = match async_fs::read_to_string(file).await {
            Ok(c) => c,
            Err(e) => error!("Cannot read {}. Err: {}", file.display(), e),
        };
        match serde_json::from_str::<Vec<Listen>>(&content) {
            Ok(mut parsed) => {
                info!("Read {} listens from {}", parsed.len(), file.display());
                listens.append(&mut parsed);
            }
            Err(e) => error!("Cannot parse {}. Err: {}", file.display(), e),
        }
    }

    if listens.is_empty() {
        success!("Nothing to import.");
        return;
    }

    let batches: Vec<&[Listen]> = listens.chunks(batch_size.max(1)).collect();
    let total = batches.len();
    let mut imported = 0;

    for (index, batch) in batches.into_iter().enumerate() {
        let pb = spinner(format!(
            "Submitting batch {}/{} ({} listens)...",
            index + 1,
            total,
            batch.len()
        ));
        let outcome = client.submit_listens(&token, listen_type, batch).await;
        pb.finish_and_clear();

        let label = format!("Batch {}/{}", index + 1, total);
        if let Some(resp) = report(&label, outcome) {
            if resp.is_success() {
                imported += batch.len();
            }
            wait_for_rate_limit(&resp).await;
        }
    }

    success!("Imported {} of {} listens.", imported, listens.len());
}

/// Tells ListenBrainz what is playing right now.
pub async fn now_playing(
    artist: String,
    track: String,
    release: Option<String>,
    token: Option<String>,
) {
    let token = resolve_token(token).await;
    let listen = track_listen(artist, track, release);

    let pb = spinner("Submitting now playing...");
    let outcome = client()
        .submit_listens(&token, ListenType::PlayingNow, std::slice::from_ref(&listen))
        .await;
    pb.finish_and_clear();

    if report("Now playing", outcome).is_some_and(|r| r.is_success()) {
        success!(
            "Now playing {} - {}",
            listen.track_metadata.artist_name,
            listen.track_metadata.track_name
        );
    }
}

/// Submits a single listen stamped with the current time.
pub async fn listen(
    artist: String,
    track: String,
    release: Option<String>,
    token: Option<String>,
) {
    let token = resolve_token(token).await;
    let listen = track_listen(artist, track, release).with_listened_at(Utc::now().timestamp());

    let pb = spinner("Submitting listen...");
    let outcome = client()
        .submit_listens(&token, ListenType::Single, std::slice::from_ref(&listen))
        .await;
    pb.finish_and_clear();

    if report("Listen", outcome).is_some_and(|r| r.is_success()) {
        success!(
            "Listened to {} - {}",
            listen.track_metadata.artist_name,
            listen.track_metadata.track_name
        );
    }
}

pub async fn listens(user: String, count: Option<u32>, min_ts: Option<i64>, max_ts: Option<i64>) {
    let pb = spinner(format!("Fetching listens of {}...", user));
    let result = client().listens_for_user(&user, min_ts, max_ts, count).await;
    pb.finish_and_clear();

    match result {
        Ok(listens) if listens.is_empty() => info!("No listens found for {}.", user),
        Ok(listens) => println!("{}", Table::new(utils::listen_rows(&listens))),
        Err(e) => error!("Cannot fetch listens. Err: {}", e),
    }
}

fn track_listen(artist: String, track: String, release: Option<String>) -> Listen {
    let listen = Listen::new(artist, track).with_info("submission_client", "lbcli");
    match release {
        Some(release) => listen.with_release(release),
        None => listen,
    }
}

/// Prints the outcome of a submission and hands back the response, if any.
fn report(label: &str, outcome: crate::Result<Submission>) -> Option<RawResponse> {
    match outcome {
        Ok(Submission::Completed(resp)) if resp.is_success() => Some(resp),
        Ok(Submission::Completed(resp)) => {
            let message = match crate::listenbrainz::check_status(resp.clone()) {
                Err(e) => e.to_string(),
                Ok(_) => String::new(),
            };
            warning!(
                "{} failed with status {}: {}",
                label,
                resp.status().as_u16(),
                message
            );
            Some(resp)
        }
        Ok(Submission::Abandoned(e)) => {
            warning!("{} abandoned after retries. Err: {}", label, e);
            None
        }
        Err(e) => {
            warning!("{} failed. Err: {}", label, e);
            None
        }
    }
}

async fn wait_for_rate_limit(resp: &RawResponse) {
    if let Some(limit) = resp.rate_limit().filter(|l| l.remaining == 0) {
        info!("Rate limit reached, waiting {}s.", limit.reset_in);
        sleep(Duration::from_secs(limit.reset_in)).await;
    }
}
