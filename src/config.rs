//! Global configuration constants.
//!
//! File naming conventions, supported media formats, output locations,
//! and discovery exclusion patterns used throughout VeilBox.

/// Application name used in user interfaces and the banner.
pub const APP_NAME: &str = "VeilBox";

/// File extension produced by the strong-cipher lock path.
///
/// Checked during unlock to route the file to the right external tool
/// and to refuse files we did not produce.
pub const CIPHER_EXTENSION: &str = ".gpg";

/// File extension produced by the simple-archive lock path.
pub const ARCHIVE_EXTENSION: &str = ".7z";

/// Image formats the steganography tool accepts as carriers.
///
/// Matches the cover formats steghide supports. Anything else is rejected
/// before the tool is ever spawned.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "bmp", "wav", "au"];

/// Suffix appended to the carrier's stem for the embedded output image.
pub const STEGO_SUFFIX: &str = "_stego";

/// Suffix (stem + this) used for extracted payload files.
pub const PAYLOAD_SUFFIX: &str = "_payload.bin";

/// Directory suffix for archive extraction output.
pub const EXTRACT_DIR_SUFFIX: &str = "_extracted";

/// Directory (under the user's home) holding application state.
pub const APP_DIR_NAME: &str = ".veilbox";

/// Operation log file name inside the application directory.
pub const LOG_FILE_NAME: &str = "operations.log";

/// Required external transformation tools, looked up on PATH at startup.
pub const TOOL_GPG: &str = "gpg";
pub const TOOL_SEVENZIP: &str = "7z";
pub const TOOL_STEGHIDE: &str = "steghide";

/// File and directory names excluded from interactive file discovery.
///
/// Prevents the browser from offering build artifacts, VCS metadata,
/// and security-sensitive dotfiles as lock/hide targets.
pub const EXCLUDED_NAMES: &[&str] = &[
    "target",
    "vendor",
    "node_modules",
    ".git",
    ".github",
    ".config",
    ".local",
    ".cache",
    ".ssh",
    ".gnupg",
    APP_DIR_NAME,
];

/// How deep interactive discovery descends from the working directory.
pub const DISCOVERY_MAX_DEPTH: usize = 4;

/// Cap on discovered candidates so the selection menu stays usable.
pub const DISCOVERY_MAX_FILES: usize = 200;
