//! Profile persistence.
//!
//! One directory per profile under the store root, each owning a profile
//! document and a deployment history document. Writes stage a temp file in
//! the profile's own directory and rename it into place, so a reader never
//! observes a partial document and the rename never crosses a filesystem
//! boundary. A failed validation leaves the on-disk state untouched.

pub mod document;
pub mod history;

pub use document::{Metadata, ProfileConfig};
pub use history::{DeploymentHistory, DeploymentRecord};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::core::constants::{HISTORY_FILE, PROFILE_DIR, PROFILE_FILE};
use crate::error::ProfileError;

/// Directory-backed store of named profiles and their deployment history.
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    /// Open a store rooted at an explicit directory.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open the operator's default store (`~/.caisson/profiles`).
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NoHome` when the home directory cannot be
    /// determined.
    pub fn open_default() -> Result<Self, ProfileError> {
        let home = dirs::home_dir().ok_or(ProfileError::NoHome)?;
        Ok(Self::new(home.join(PROFILE_DIR)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// On-disk path of a profile's document.
    pub fn profile_path(&self, profile: &str) -> PathBuf {
        self.root.join(profile).join(PROFILE_FILE)
    }

    /// Whether a profile exists in the store.
    pub fn exists(&self, profile: &str) -> bool {
        checked_name(profile)
            .map(|name| self.profile_path(name).exists())
            .unwrap_or(false)
    }

    /// Names of all stored profiles, sorted.
    ///
    /// A missing store root means no profiles, not an error.
    pub fn list(&self) -> Result<Vec<String>, ProfileError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.path().join(PROFILE_FILE).exists() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Read a profile document exactly as stored, without inheritance.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` for an unknown profile and
    /// `ProfileError::Malformed` when the document does not parse.
    pub fn read(&self, profile: &str) -> Result<ProfileConfig, ProfileError> {
        let name = checked_name(profile)?;
        let path = self.profile_path(name);
        debug!(profile = name, path = %path.display(), "reading profile");

        if !path.exists() {
            return Err(ProfileError::NotFound(name.to_string()));
        }

        let contents = fs::read_to_string(&path)?;
        serde_json::from_str(&contents).map_err(|e| ProfileError::Malformed {
            profile: name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Read a profile with one level of inheritance applied.
    ///
    /// Only the direct parent is consulted; a grandparent declared by the
    /// parent is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::CyclicInheritance` when a profile names itself
    /// as parent, and `ProfileError::NotFound` when the parent is missing.
    pub fn read_with_inheritance(&self, profile: &str) -> Result<ProfileConfig, ProfileError> {
        let child = self.read(profile)?;
        match child.inherits.clone() {
            None => Ok(child),
            Some(parent) if parent == profile => Err(ProfileError::CyclicInheritance {
                profile: profile.to_string(),
            }),
            Some(parent) => {
                debug!(profile, parent = parent.as_str(), "resolving inheritance");
                Ok(child.merge_over(self.read(&parent)?))
            }
        }
    }

    /// Validate, stamp metadata, and atomically persist a profile document.
    ///
    /// When the document declares a parent, the merged view is what gets
    /// validated; the sparse document is what gets persisted. Returns the
    /// stamped document as written.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Invalid` carrying every violation (the on-disk
    /// file is left untouched), `ProfileError::CyclicInheritance` for a
    /// self-parent, or `ProfileError::NotFound` for a missing parent.
    pub fn write(
        &self,
        profile: &str,
        mut config: ProfileConfig,
    ) -> Result<ProfileConfig, ProfileError> {
        let name = checked_name(profile)?;

        let effective = match config.inherits.as_deref() {
            None => config.clone(),
            Some(parent) if parent == name => {
                return Err(ProfileError::CyclicInheritance {
                    profile: name.to_string(),
                })
            }
            Some(parent) => config.clone().merge_over(self.read(parent)?),
        };

        let violations = effective.validate();
        if !violations.is_empty() {
            return Err(ProfileError::Invalid {
                profile: name.to_string(),
                violations,
            });
        }

        let existing = match self.exists(name) {
            true => self.read(name).ok().and_then(|c| c.metadata),
            false => None,
        };
        document::stamp_metadata(&mut config, existing.as_ref());

        let dir = self.root.join(name);
        fs::create_dir_all(&dir)?;
        write_atomic(&dir.join(PROFILE_FILE), &to_pretty_json(&config)?)?;

        info!(profile = name, "profile written");
        Ok(config)
    }

    /// Append a deployment record to a profile's history.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` when the profile does not exist.
    pub fn record_deployment(
        &self,
        profile: &str,
        record: DeploymentRecord,
    ) -> Result<(), ProfileError> {
        let name = checked_name(profile)?;
        if !self.exists(name) {
            return Err(ProfileError::NotFound(name.to_string()));
        }

        let mut history = self.history(name)?;
        info!(
            profile = name,
            environment = record.environment.as_str(),
            image = record.image.as_str(),
            "recording deployment"
        );
        history.record(record);
        write_atomic(
            &self.root.join(name).join(HISTORY_FILE),
            &to_pretty_json(&history)?,
        )
    }

    /// Read a profile's full deployment history.
    ///
    /// A profile with no recorded deployments has an empty history.
    pub fn history(&self, profile: &str) -> Result<DeploymentHistory, ProfileError> {
        let name = checked_name(profile)?;
        if !self.exists(name) {
            return Err(ProfileError::NotFound(name.to_string()));
        }

        let path = self.root.join(name).join(HISTORY_FILE);
        if !path.exists() {
            return Ok(DeploymentHistory::default());
        }

        let contents = fs::read_to_string(&path)?;
        serde_json::from_str(&contents).map_err(|e| ProfileError::Malformed {
            profile: name.to_string(),
            reason: e.to_string(),
        })
    }

    /// The most recently recorded deployment for an environment, if any.
    pub fn active_deployment(
        &self,
        profile: &str,
        environment: &str,
    ) -> Result<Option<DeploymentRecord>, ProfileError> {
        Ok(self.history(profile)?.active_for(environment).cloned())
    }
}

/// Profile names become directory names, so they are restricted to lowercase
/// letters, digits, `-`, and `_`.
fn checked_name(name: &str) -> Result<&str, ProfileError> {
    if name.is_empty() {
        return Err(ProfileError::InvalidName {
            name: name.to_string(),
            reason: "name is empty".to_string(),
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(ProfileError::InvalidName {
            name: name.to_string(),
            reason: "only lowercase letters, digits, '-' and '_' are allowed".to_string(),
        });
    }
    Ok(name)
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, ProfileError> {
    let mut contents = serde_json::to_string_pretty(value).map_err(ProfileError::Serialize)?;
    contents.push('\n');
    Ok(contents)
}

/// Stage in the target's own directory, then rename into place.
fn write_atomic(path: &Path, contents: &str) -> Result<(), ProfileError> {
    let dir = path.parent().ok_or_else(|| {
        ProfileError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "target path has no parent directory",
        ))
    })?;

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(contents.as_bytes())?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| ProfileError::Io(e.error))?;
    Ok(())
}
