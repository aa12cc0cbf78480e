//! Input preconditions, checked before any external tool is spawned.

use std::path::Path;

use crate::config::{ARCHIVE_EXTENSION, CIPHER_EXTENSION, SUPPORTED_IMAGE_EXTENSIONS};
use crate::error::InputError;
use crate::types::{Payload, TransformKind};

/// Whether the path carries the strong-cipher naming convention.
#[inline]
#[must_use]
pub fn is_cipher_file(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().ends_with(CIPHER_EXTENSION)
}

/// Whether the path carries the archive naming convention.
#[inline]
#[must_use]
pub fn is_archive_file(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().ends_with(ARCHIVE_EXTENSION)
}

/// Whether the path has one of the supported carrier-image extensions.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Validates the input (and payload, for embed) for one transform kind.
///
/// Violations abort the operation with no process spawned and nothing
/// recorded as a transform failure.
pub fn validate_input(kind: TransformKind, input: &Path, payload: Option<&Payload>) -> Result<(), InputError> {
    require_regular_file(input)?;

    match kind {
        TransformKind::EncryptStrong | TransformKind::EncryptArchive => {}
        TransformKind::DecryptStrong => {
            if !is_cipher_file(input) {
                return Err(InputError::InvalidInputFormat { path: input.to_path_buf(), expected: "encrypted" });
            }
        }
        TransformKind::DecryptArchive => {
            if !is_archive_file(input) {
                return Err(InputError::InvalidInputFormat { path: input.to_path_buf(), expected: "archive" });
            }
        }
        TransformKind::EmbedPayload | TransformKind::ExtractPayload => {
            if !is_supported_image(input) {
                return Err(InputError::UnsupportedMediaType(input.to_path_buf()));
            }
        }
    }

    if kind == TransformKind::EmbedPayload {
        match payload {
            Some(Payload::File(path)) => require_regular_file(path)?,
            Some(Payload::Inline(_)) => {}
            None => return Err(InputError::AmbiguousPayload),
        }
    }

    Ok(())
}

fn require_regular_file(path: &Path) -> Result<(), InputError> {
    if !path.exists() {
        return Err(InputError::Missing(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(InputError::NotRegularFile(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_naming_convention_predicates() {
        assert!(is_cipher_file(Path::new("notes.txt.gpg")));
        assert!(!is_cipher_file(Path::new("notes.txt")));
        assert!(is_archive_file(Path::new("docs.7z")));
        assert!(!is_archive_file(Path::new("docs.zip")));
    }

    #[test]
    fn test_supported_image_extensions() {
        assert!(is_supported_image(Path::new("photo.jpg")));
        assert!(is_supported_image(Path::new("photo.JPEG")));
        assert!(is_supported_image(Path::new("scan.bmp")));
        assert!(is_supported_image(Path::new("clip.wav")));
        assert!(!is_supported_image(Path::new("photo.gif")));
        assert!(!is_supported_image(Path::new("photo.png")));
        assert!(!is_supported_image(Path::new("photo")));
    }

    #[test]
    fn test_decrypt_rejects_unrecognized_suffix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.txt");
        fs::write(&path, b"plain").unwrap();

        let err = validate_input(TransformKind::DecryptStrong, &path, None).unwrap_err();
        assert!(matches!(err, InputError::InvalidInputFormat { expected: "encrypted", .. }));

        let err = validate_input(TransformKind::DecryptArchive, &path, None).unwrap_err();
        assert!(matches!(err, InputError::InvalidInputFormat { expected: "archive", .. }));
    }

    #[test]
    fn test_embed_rejects_unsupported_media() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.gif");
        fs::write(&path, b"GIF89a").unwrap();

        let err = validate_input(TransformKind::EmbedPayload, &path, Some(&Payload::Inline("hi".into()))).unwrap_err();
        assert_eq!(err, InputError::UnsupportedMediaType(path));
    }

    #[test]
    fn test_missing_input_detected_first() {
        let err = validate_input(TransformKind::EncryptStrong, Path::new("/nonexistent/f.txt"), None).unwrap_err();
        assert!(matches!(err, InputError::Missing(_)));
    }

    #[test]
    fn test_directory_is_not_a_regular_file() {
        let dir = tempdir().unwrap();
        let err = validate_input(TransformKind::EncryptArchive, dir.path(), None).unwrap_err();
        assert!(matches!(err, InputError::NotRegularFile(_)));
    }

    #[test]
    fn test_embed_requires_a_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        fs::write(&path, b"jpeg").unwrap();

        let err = validate_input(TransformKind::EmbedPayload, &path, None).unwrap_err();
        assert_eq!(err, InputError::AmbiguousPayload);
    }

    #[test]
    fn test_embed_payload_file_must_exist() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        fs::write(&path, b"jpeg").unwrap();

        let payload = Payload::File(dir.path().join("missing.bin"));
        let err = validate_input(TransformKind::EmbedPayload, &path, Some(&payload)).unwrap_err();
        assert!(matches!(err, InputError::Missing(_)));
    }
}
