//! Persistence for profiles - save/load JSON files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::learner::Profile;
use crate::error::{DatalintError, Result};

impl Profile {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON and verify the profile invariants.
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: Profile = serde_json::from_str(json)
            .map_err(|e| DatalintError::MalformedProfile(e.to_string()))?;
        profile.check()?;
        Ok(profile)
    }

    /// Save the profile to a JSON file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use datalint::Profile;
    /// # fn example(profile: &Profile) -> datalint::Result<()> {
    /// profile.save("train.profile.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let io_err = |source| DatalintError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let file = File::create(path).map_err(io_err)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;

        debug!(path = %path.display(), columns = self.columns.len(), "saved profile");
        Ok(())
    }

    /// Load a profile from a JSON file.
    ///
    /// Documents that fail to parse or violate the profile invariants are
    /// rejected with [`DatalintError::MalformedProfile`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use datalint::Profile;
    /// let profile = Profile::load("train.profile.json").unwrap();
    /// println!("Columns: {}", profile.columns.len());
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|source| DatalintError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let reader = BufReader::new(file);
        let profile: Profile = serde_json::from_reader(reader).map_err(|e| {
            DatalintError::MalformedProfile(format!("'{}': {}", path.display(), e))
        })?;

        profile.check().map_err(|e| match e {
            DatalintError::MalformedProfile(msg) => {
                DatalintError::MalformedProfile(format!("'{}': {}", path.display(), msg))
            }
            other => other,
        })?;

        Ok(profile)
    }
}

/// Generate a profile file path for a data file.
///
/// # Example
///
/// ```
/// use datalint::profile::profile_path;
///
/// let path = profile_path("data/train.csv");
/// assert_eq!(path.to_string_lossy(), "data/train.profile.json");
/// ```
pub fn profile_path(data_path: impl AsRef<Path>) -> PathBuf {
    let data_path = data_path.as_ref();
    let stem = data_path.file_stem().unwrap_or_default().to_string_lossy();
    let parent = data_path.parent().unwrap_or(Path::new("."));

    parent.join(format!("{}.profile.json", stem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Column, Dataset};
    use crate::profile::Learner;

    fn sample_profile() -> Profile {
        let dataset = Dataset::new(
            "sample",
            vec![
                Column::new("x", (0..12).map(|i| i as f64 * 0.1)),
                Column::new("label", (0..12).map(|i| if i < 4 { "cat" } else { "dog" })),
            ],
        )
        .unwrap();
        Learner::new().learn(&dataset).unwrap()
    }

    #[test]
    fn test_profile_path() {
        assert_eq!(
            profile_path("data/train.csv").to_string_lossy(),
            "data/train.profile.json"
        );
        assert_eq!(profile_path("test.tsv").to_string_lossy(), "test.profile.json");
    }

    #[test]
    fn test_json_round_trip() {
        let profile = sample_profile();
        let restored = Profile::from_json(&profile.to_json().unwrap()).unwrap();
        assert_eq!(restored, profile);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sample.profile.json");
        let profile = sample_profile();

        profile.save(&path).unwrap();
        let loaded = Profile::load(&path).unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_top_level_fields() {
        let json: serde_json::Value =
            serde_json::from_str(&sample_profile().to_json().unwrap()).unwrap();
        assert!(json.get("row_count").is_some());
        assert!(json.get("created_at").is_some());
        assert!(json["columns"].get("x").is_some());
        assert_eq!(json["schema_version"], 1);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let err = Profile::from_json("{ not json").unwrap_err();
        assert!(matches!(err, DatalintError::MalformedProfile(_)));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let err = Profile::from_json(r#"{"schema_version": 1, "name": "x", "row_count": 3}"#)
            .unwrap_err();
        assert!(matches!(err, DatalintError::MalformedProfile(_)));
    }

    #[test]
    fn test_numeric_without_stats_is_malformed() {
        let mut json: serde_json::Value =
            serde_json::from_str(&sample_profile().to_json().unwrap()).unwrap();
        json["columns"]["x"]
            .as_object_mut()
            .unwrap()
            .remove("numeric");

        let err = Profile::from_json(&json.to_string()).unwrap_err();
        assert!(matches!(err, DatalintError::MalformedProfile(_)));
    }

    /// Serialize the sample profile, apply `edit` to the JSON, and parse it back.
    fn reparse_edited(edit: impl FnOnce(&mut serde_json::Value)) -> Result<Profile> {
        let mut json: serde_json::Value =
            serde_json::from_str(&sample_profile().to_json().unwrap()).unwrap();
        edit(&mut json);
        Profile::from_json(&json.to_string())
    }

    #[test]
    fn test_categorical_without_top_values_is_malformed() {
        let err = reparse_edited(|json| {
            json["columns"]["label"]
                .as_object_mut()
                .unwrap()
                .remove("top_values");
        })
        .unwrap_err();
        assert!(matches!(err, DatalintError::MalformedProfile(_)));
    }

    #[test]
    fn test_numeric_with_top_values_is_malformed() {
        let err = reparse_edited(|json| {
            json["columns"]["x"]["top_values"] = serde_json::json!([]);
        })
        .unwrap_err();
        assert!(matches!(err, DatalintError::MalformedProfile(_)));
    }

    #[test]
    fn test_negative_std_is_malformed() {
        let err = reparse_edited(|json| {
            json["columns"]["x"]["numeric"]["std"] = serde_json::json!(-5.0);
        })
        .unwrap_err();
        assert!(matches!(err, DatalintError::MalformedProfile(_)));
    }

    #[test]
    fn test_unordered_quartiles_are_malformed() {
        let err = reparse_edited(|json| {
            let stats = &mut json["columns"]["x"]["numeric"];
            stats["q1"] = serde_json::json!(1.0);
            stats["q3"] = serde_json::json!(0.2);
        })
        .unwrap_err();
        assert!(matches!(err, DatalintError::MalformedProfile(_)));

        let err = reparse_edited(|json| {
            json["columns"]["x"]["numeric"]["min"] = serde_json::json!(50.0);
        })
        .unwrap_err();
        assert!(matches!(err, DatalintError::MalformedProfile(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Profile::load("/definitely/not/here.profile.json").unwrap_err();
        assert!(matches!(err, DatalintError::Io { .. }));
    }
}
