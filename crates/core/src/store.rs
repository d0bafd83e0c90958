//! Persistence of discovered profiles and collected feeds.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::collect::Feed;
use crate::profile::SiteProfile;

/// Default file bundling every discovered profile.
pub const ROLLUP_FILE: &str = "configuracoes_descobertas.json";

/// Default file holding the aggregated feed.
pub const FEED_FILE: &str = "noticias_agregadas.json";

/// Roll-up document listing every discovered profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryRollup {
    pub total_sites: usize,
    #[serde(rename = "data_analise")]
    pub analyzed_at: String,
    #[serde(rename = "configuracoes")]
    pub profiles: Vec<SiteProfile>,
}

impl DiscoveryRollup {
    /// Bundles profiles under a fresh analysis timestamp.
    pub fn new(profiles: Vec<SiteProfile>) -> Self {
        Self {
            total_sites: profiles.len(),
            analyzed_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            profiles,
        }
    }
}

/// Filesystem layout for profiles and feeds under one directory.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// Creates a store rooted at `dir`. The directory is created lazily
    /// on first write.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a profile saves to, derived from its display name.
    pub fn profile_path(&self, profile: &SiteProfile) -> PathBuf {
        self.dir.join(format!("{}_config.json", profile.slug()))
    }

    /// Writes one profile to `{slug}_config.json`, returning the path.
    pub fn save_profile(&self, profile: &SiteProfile) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let path = self.profile_path(profile);
        fs::write(&path, serde_json::to_string_pretty(profile)?)?;

        Ok(path)
    }

    /// Writes the roll-up document for a discovery run, returning the path.
    pub fn save_rollup(&self, profiles: &[SiteProfile]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let rollup = DiscoveryRollup::new(profiles.to_vec());
        let path = self.dir.join(ROLLUP_FILE);
        fs::write(&path, serde_json::to_string_pretty(&rollup)?)?;

        Ok(path)
    }

    /// Writes the aggregated feed, returning the path.
    pub fn save_feed(&self, feed: &Feed) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(FEED_FILE);
        fs::write(&path, serde_json::to_string_pretty(feed)?)?;

        Ok(path)
    }

    /// Loads every stored profile.
    ///
    /// Prefers the roll-up file and falls back to scanning per-site
    /// `*_config.json` files. Unreadable files are skipped with a warning
    /// so one bad config cannot sink the batch.
    pub fn load_profiles(&self) -> Result<Vec<SiteProfile>> {
        let rollup_path = self.dir.join(ROLLUP_FILE);
        if rollup_path.exists() {
            match read_json::<DiscoveryRollup>(&rollup_path) {
                Ok(rollup) => return Ok(rollup.profiles),
                Err(e) => {
                    eprintln!("Warning: Failed to read roll-up {}: {}", rollup_path.display(), e);
                }
            }
        }

        let mut profiles = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with("_config.json") {
                continue;
            }

            match read_json::<SiteProfile>(&path) {
                Ok(profile) => profiles.push(profile),
                Err(e) => eprintln!("Warning: Failed to read config {}: {}", path.display(), e),
            }
        }

        // read_dir order is platform-dependent.
        profiles.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(profiles)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
