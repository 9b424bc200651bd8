// Bearer token storage with on-demand reload from disk
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{GatewayError, GatewayResult};

pub fn load_agent_token(path: &Path) -> GatewayResult<String> {
    let token = fs::read_to_string(path)
        .map_err(|source| GatewayError::Credentials {
            path: path.display().to_string(),
            source,
        })?
        .trim()
        .to_string();
    Ok(token)
}

/// Holds the current bearer token. Whatever logs the player in keeps the
/// token file fresh; on expiry the client re-reads it.
pub struct TokenStore {
    path: PathBuf,
    token: RwLock<String>,
}

impl TokenStore {
    pub fn from_file(path: impl Into<PathBuf>) -> GatewayResult<Self> {
        let path = path.into();
        let token = load_agent_token(&path)?;
        Ok(Self {
            path,
            token: RwLock::new(token),
        })
    }

    pub async fn current(&self) -> String {
        self.token.read().await.clone()
    }

    pub async fn refresh(&self) -> GatewayResult<()> {
        let fresh = load_agent_token(&self.path)?;
        let mut token = self.token.write().await;
        if *token == fresh {
            info!(path = %self.path.display(), "token file unchanged after expiry");
        }
        *token = fresh;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn refresh_picks_up_rewritten_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AGENT_TOKEN");
        fs::write(&path, "first-token\n").unwrap();

        let store = TokenStore::from_file(&path).unwrap();
        assert_eq!(store.current().await, "first-token");

        fs::write(&path, "second-token").unwrap();
        store.refresh().await.unwrap();
        assert_eq!(store.current().await, "second-token");
    }

    #[test]
    fn missing_token_file_is_a_credentials_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = TokenStore::from_file(dir.path().join("absent"));
        assert!(matches!(result, Err(GatewayError::Credentials { .. })));
    }
}
