use tabled::Table;

use crate::{error, info, types::PlaylistKind, utils};

use super::{client, spinner};

pub async fn playlists(user: String, kind: PlaylistKind, count: u32, token: Option<String>) {
    let pb = spinner(format!("Fetching playlists of {}...", user));
    let result = client()
        .user_playlists(&user, token.as_deref(), 0, count, kind)
        .await;
    pb.finish_and_clear();

    match result {
        Ok(resp) if resp.playlists.is_empty() => info!("No playlists found for {}.", user),
        Ok(resp) => {
            info!(
                "Showing {} of {} playlists",
                resp.playlists.len(),
                resp.playlist_count
            );
            println!("{}", Table::new(utils::playlist_rows(&resp.playlists)));
        }
        Err(e) => error!("Cannot fetch playlists. Err: {}", e),
    }
}

pub async fn pins(user: String, count: u32) {
    let pb = spinner(format!("Fetching pins of {}...", user));
    let result = client().pins_for_user(&user, 0, count).await;
    pb.finish_and_clear();

    match result {
        Ok(resp) if resp.pinned_recordings.is_empty() => info!("{} has no pins.", user),
        Ok(resp) => println!("{}", Table::new(utils::pin_rows(&resp.pinned_recordings))),
        Err(e) => error!("Cannot fetch pins. Err: {}", e),
    }
}
