use std::path::PathBuf;

use chrono::Utc;

use crate::types::StoredToken;

/// Keeps the validated ListenBrainz user token in the local data directory.
pub struct TokenManager {
    token: StoredToken,
}

impl TokenManager {
    pub fn new(token: impl Into<String>, user_name: impl Into<String>) -> Self {
        TokenManager {
            token: StoredToken {
                token: token.into(),
                user_name: user_name.into(),
                validated_at: Utc::now().timestamp(),
            },
        }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: StoredToken = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(&path, json).await.map_err(|e| e.to_string())
    }

    /// Removes the stored token. A missing file counts as cleared.
    pub async fn clear() -> Result<(), String> {
        match async_fs::remove_file(Self::token_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.to_string()),
        }
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("lbcli/cache/token.json");
        path
    }

    pub fn token(&self) -> &str {
        &self.token.token
    }

    pub fn user_name(&self) -> &str {
        &self.token.user_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let mgr = TokenManager::new("secret", "rob");
        assert_eq!(mgr.token(), "secret");
        assert_eq!(mgr.user_name(), "rob");

        let json = serde_json::to_value(&mgr.token).unwrap();
        assert_eq!(json["user_name"], "rob");
        assert!(json["validated_at"].as_i64().unwrap() > 0);
    }
}
