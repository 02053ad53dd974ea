//! Folder versioning resolver.
//!
//! A submission must land in an unoccupied folder. When the desired path is
//! already taken (yesterday's folder, or a resubmission of the same day), the
//! occupant is relocated to the first free `<base>_verK` suffix so the new
//! submission can claim the original path.
//!
//! The existence check and the move are not atomic: two submissions racing on
//! one folder name can both see it occupied and fight over the same suffix,
//! in which case the loser surfaces the provider's move error. The source
//! system has no locking and none is added here.

use tracing::info;

use super::client::StoreClient;
use super::error::StoreError;

/// Upper bound on version-suffix probes before giving up.
pub const MAX_VERSION_PROBES: usize = 1000;

/// Free `base_path` for a new folder and return it.
///
/// If the path does not exist it is returned unchanged. If it exists, the
/// occupant is moved to `{base_path}_verK` for the smallest K not already
/// taken, probing in increasing order, and `base_path` is returned as free.
///
/// # Errors
///
/// Any metadata lookup or move failure aborts resolution; exhausting all
/// probe candidates yields `StoreError::VersionExhausted`. No partial-state
/// cleanup is attempted.
pub async fn resolve_folder(
    client: &StoreClient,
    token: &str,
    base_path: &str,
) -> Result<String, StoreError> {
    if client.get_metadata(token, base_path).await?.is_none() {
        return Ok(base_path.to_string());
    }

    let relocated = relocate_existing(client, token, base_path, MAX_VERSION_PROBES).await?;
    info!(from = base_path, to = %relocated, "relocated existing folder");

    Ok(base_path.to_string())
}

/// Move the folder at `base_path` to its first free version suffix.
///
/// Returns the path the occupant was moved to.
async fn relocate_existing(
    client: &StoreClient,
    token: &str,
    base_path: &str,
    limit: usize,
) -> Result<String, StoreError> {
    for version in 1..=limit {
        let candidate = format!("{base_path}_ver{version}");
        if client.get_metadata(token, &candidate).await?.is_none() {
            client.move_entry(token, base_path, &candidate).await?;
            return Ok(candidate);
        }
    }

    Err(StoreError::version_exhausted(base_path))
}
