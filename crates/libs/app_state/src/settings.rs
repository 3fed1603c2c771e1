use crate::{
    ApiSettings, AuthConstants, DatabaseConstants, LoggingSettings, RawSettings, SecretSettings,
    UploadSettings,
};
use serde::Deserialize;
use std::path::{Path, absolute};

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub uploads: UploadSettings,
    pub logging: LoggingSettings,
    pub secrets: SecretSettings,
}

impl From<RawSettings> for AppSettings {
    fn from(raw: RawSettings) -> Self {
        let media_root = absolute(&raw.uploads.media_folder).expect("Invalid media_folder");
        let uploads = UploadSettings {
            media_folder: media_root,
            max_upload_bytes: raw.uploads.max_upload_bytes,
            photo_extensions: raw.uploads.photo_extensions,
            video_extensions: raw.uploads.video_extensions,
        };

        Self {
            api: raw.api,
            uploads,
            logging: raw.logging,
            secrets: raw.secrets,
        }
    }
}

/// Values that stay fixed for the lifetime of the process.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConstants {
    pub database: DatabaseConstants,
    pub auth: AuthConstants,
}

impl From<RawSettings> for AppConstants {
    fn from(raw: RawSettings) -> Self {
        Self {
            database: raw.constants.database,
            auth: raw.constants.auth,
        }
    }
}

impl UploadSettings {
    // stuff that needs multiple settings (otherwise just make it a standalone function).

    #[must_use]
    pub fn is_photo_file(&self, file: &Path) -> bool {
        let Some(extension) = file.extension().map(|e| e.to_string_lossy().to_lowercase()) else {
            return false;
        };
        self.photo_extensions.contains(&extension)
    }

    #[must_use]
    pub fn is_video_file(&self, file: &Path) -> bool {
        let Some(extension) = file.extension().map(|e| e.to_string_lossy().to_lowercase()) else {
            return false;
        };
        self.video_extensions.contains(&extension)
    }

    #[must_use]
    pub fn is_media_file(&self, file: &Path) -> bool {
        self.is_photo_file(file) || self.is_video_file(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_uploads() -> UploadSettings {
        UploadSettings {
            media_folder: PathBuf::from("/tmp/media"),
            max_upload_bytes: 1024,
            photo_extensions: vec!["jpg".to_owned(), "png".to_owned()],
            video_extensions: vec!["mp4".to_owned()],
        }
    }

    #[test]
    fn classifies_photo_and_video_extensions() {
        let uploads = test_uploads();
        assert!(uploads.is_photo_file(Path::new("logo.JPG")));
        assert!(uploads.is_video_file(Path::new("clip.mp4")));
        assert!(!uploads.is_photo_file(Path::new("clip.mp4")));
        assert!(uploads.is_media_file(Path::new("a/b/c.png")));
    }

    #[test]
    fn rejects_unknown_and_missing_extensions() {
        let uploads = test_uploads();
        assert!(!uploads.is_media_file(Path::new("malware.exe")));
        assert!(!uploads.is_media_file(Path::new("no_extension")));
    }
}
