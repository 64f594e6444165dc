use crate::{error, management::TokenManager, success, warning};

use super::{client, resolve_token, spinner};

/// Validates a token against ListenBrainz and stores it for later commands.
///
/// With `clear` set the stored token is removed instead.
pub async fn auth(token: Option<String>, clear: bool) {
    if clear {
        let owner = TokenManager::load()
            .await
            .map(|mgr| mgr.user_name().to_string())
            .ok();
        match TokenManager::clear().await {
            Ok(()) => match owner {
                Some(user_name) => success!("Stored token of {} removed.", user_name),
                None => success!("No stored token."),
            },
            Err(e) => error!("Cannot remove stored token. Err: {}", e),
        }
        return;
    }

    let token = resolve_token(token).await;
    let pb = spinner("Validating token...");
    let validation = client().validate_token(&token).await;
    pb.finish_and_clear();

    let validation = match validation {
        Ok(v) => v,
        Err(e) => error!("Cannot validate token. Err: {}", e),
    };

    let user_name = match validation.user_name {
        Some(name) if validation.valid => name,
        _ => error!("Token is not valid: {}", validation.message),
    };

    if let Err(e) = TokenManager::new(token, user_name.as_str()).persist().await {
        warning!("Token is valid but could not be stored. Err: {}", e);
        return;
    }

    success!("Authenticated as {}.", user_name);
}
