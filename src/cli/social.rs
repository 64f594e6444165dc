use reqwest::StatusCode;

use crate::{error, info, success, warning};

use super::{client, resolve_token, spinner};

pub async fn follow(user: String, token: Option<String>) {
    let token = resolve_token(token).await;
    match client().follow_user(&user, &token).await {
        Ok(status) if status.is_success() => success!("Now following {}.", user),
        Ok(StatusCode::BAD_REQUEST) => warning!("Already following {}.", user),
        Ok(status) => warning!("Cannot follow {}: status {}", user, status),
        Err(e) => error!("Cannot follow {}. Err: {}", user, e),
    }
}

pub async fn unfollow(user: String, token: Option<String>) {
    let token = resolve_token(token).await;
    match client().unfollow_user(&user, &token).await {
        Ok(status) if status.is_success() => success!("Stopped following {}.", user),
        Ok(status) => warning!("Cannot unfollow {}: status {}", user, status),
        Err(e) => error!("Cannot unfollow {}. Err: {}", user, e),
    }
}

pub async fn followers(user: String) {
    let pb = spinner(format!("Fetching followers of {}...", user));
    let result = client().followers_of_user(&user).await;
    pb.finish_and_clear();

    match result {
        Ok(names) => print_names(&format!("{} is followed by", user), &names),
        Err(e) => error!("Cannot fetch followers. Err: {}", e),
    }
}

pub async fn following(user: String) {
    let pb = spinner(format!("Fetching users followed by {}...", user));
    let result = client().following_for_user(&user).await;
    pb.finish_and_clear();

    match result {
        Ok(names) => print_names(&format!("{} follows", user), &names),
        Err(e) => error!("Cannot fetch followed users. Err: {}", e),
    }
}

fn print_names(title: &str, names: &[String]) {
    if names.is_empty() {
        info!("{} nobody.", title);
        return;
    }

    info!("{} {} users:", title, names.len());
    for name in names {
        println!("  {}", name);
    }
}
