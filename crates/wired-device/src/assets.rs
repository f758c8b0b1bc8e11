//! Stock backpack asset restore.
//!
//! Replaces a modded backpack light configuration with the factory one:
//! quiesce the platform, download the stock archive, unpack it, swap it
//! into the resource tree, resume. Unlike service commands, the fetch and
//! swap steps are caller-visible I/O and their failures propagate.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::info;

use wired_core::config::paths;

use crate::error::{DeviceError, Result};
use crate::lifecycle::DeviceLifecycle;

/// Where the factory backpack light archive is served from.
pub const STOCK_BACKPACK_URL: &str = "https://api.froggitti.net/backpackorig.zip";

/// Archive name inside `<root>/data/`; the archive unpacks to a directory
/// of the same stem.
const ARCHIVE_NAME: &str = "backpackorig.zip";
const UNPACKED_NAME: &str = "backpackorig";

/// Restore the factory backpack light configuration under `root`.
///
/// The platform is quiesced for the duration of the swap and resumed
/// before returning, including on the error paths that occur after the
/// quiesce.
pub async fn restore_backpack_assets(lifecycle: &DeviceLifecycle, root: &Path) -> Result<()> {
    lifecycle.quiesce().await;
    let result = replace_with_stock(root).await;
    lifecycle.resume().await;
    result
}

async fn replace_with_stock(root: &Path) -> Result<()> {
    let staging = root.join("data");
    tokio::fs::create_dir_all(&staging).await?;

    let archive = staging.join(ARCHIVE_NAME);
    download(STOCK_BACKPACK_URL, &archive).await?;
    unzip(&archive, &staging).await?;

    let unpacked = staging.join(UNPACKED_NAME);
    let dest = root.join(paths::ROBOT_RESOURCES).join(paths::BACKPACK_LIGHTS);
    swap_into_place(&unpacked, &dest).await?;

    info!(dest = %dest.display(), "stock backpack assets restored");
    Ok(())
}

async fn download(url: &str, dest: &Path) -> Result<()> {
    let body = reqwest::get(url).await?.error_for_status()?.bytes().await?;
    tokio::fs::write(dest, &body).await?;
    Ok(())
}

/// Unpack with the platform's `unzip` binary, overwriting stale entries
/// from a previous attempt.
async fn unzip(archive: &Path, dest: &Path) -> Result<()> {
    let output = Command::new("unzip")
        .arg("-o")
        .arg(archive)
        .arg("-d")
        .arg(dest)
        .output()
        .await?;
    if !output.status.success() {
        return Err(DeviceError::Asset(format!(
            "unzip of {} exited with {:?}",
            archive.display(),
            output.status.code()
        )));
    }
    Ok(())
}

/// Replace `dest` with `src`, removing whatever was there.
async fn swap_into_place(src: &Path, dest: &Path) -> Result<()> {
    if !src.is_dir() {
        return Err(DeviceError::Asset(format!(
            "unpacked assets missing at {}",
            src.display()
        )));
    }
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    if dest.exists() {
        tokio::fs::remove_dir_all(&dest).await?;
    }
    tokio::fs::rename(src, dest).await?;
    Ok(())
}

/// Normalized destination of the backpack light configuration under `root`.
pub fn backpack_lights_dir(root: &Path) -> PathBuf {
    root.join(paths::ROBOT_RESOURCES).join(paths::BACKPACK_LIGHTS)
}
