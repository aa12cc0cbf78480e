//! Per-kind command construction.
//!
//! Builds the argument vector for each transform kind, matched
//! exhaustively. The secret itself never appears here: it travels either
//! over the child's stdin pipe or through a permission-restricted scratch
//! file whose *path* is an argument, so it can never leak through the
//! process table.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::types::TransformKind;

use super::chain::ToolChain;

/// How the secret reaches the external tool.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SecretChannel {
    /// Written to the child's stdin pipe, one line.
    Stdin,

    /// Staged to a 0o600 scratch file passed by path.
    PassFile,
}

/// Which channel each tool expects.
///
/// gpg reads a passphrase file; 7z and steghide read the passphrase from
/// stdin when it is not a terminal.
pub fn secret_channel(kind: TransformKind) -> SecretChannel {
    match kind {
        TransformKind::EncryptStrong | TransformKind::DecryptStrong => SecretChannel::PassFile,
        TransformKind::EncryptArchive
        | TransformKind::DecryptArchive
        | TransformKind::EmbedPayload
        | TransformKind::ExtractPayload => SecretChannel::Stdin,
    }
}

/// How many lines of the secret a stdin consumer reads.
///
/// steghide prompts twice when embedding (enter, then re-enter); every
/// other stdin consumer reads a single line.
pub fn secret_lines(kind: TransformKind) -> usize {
    match kind {
        TransformKind::EmbedPayload => 2,
        TransformKind::EncryptStrong
        | TransformKind::DecryptStrong
        | TransformKind::EncryptArchive
        | TransformKind::DecryptArchive
        | TransformKind::ExtractPayload => 1,
    }
}

/// A fully-built external command, ready to spawn.
#[derive(Debug)]
pub struct CommandPlan {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub secret_channel: SecretChannel,
}

/// Builds the command for one transform.
///
/// `passphrase_file` must be `Some` exactly when [`secret_channel`] says
/// [`SecretChannel::PassFile`]; `payload_file` only for embed.
pub fn build(
    kind: TransformKind,
    tools: &ToolChain,
    input: &Path,
    output: &Path,
    payload_file: Option<&Path>,
    passphrase_file: Option<&Path>,
) -> CommandPlan {
    let mut args: Vec<OsString> = Vec::new();
    let arg = |value: &str| OsString::from(value);

    let program = match kind {
        TransformKind::EncryptStrong => {
            args.extend([arg("--batch"), arg("--yes"), arg("--quiet")]);
            args.extend([arg("--pinentry-mode"), arg("loopback")]);
            args.push(arg("--passphrase-file"));
            args.push(passphrase_file.expect("strong cipher requires a passphrase file").into());
            args.extend([arg("--symmetric"), arg("--cipher-algo"), arg("AES256")]);
            args.push(arg("--output"));
            args.push(output.into());
            args.push(arg("--"));
            args.push(input.into());
            tools.gpg.clone()
        }
        TransformKind::DecryptStrong => {
            args.extend([arg("--batch"), arg("--yes"), arg("--quiet")]);
            args.extend([arg("--pinentry-mode"), arg("loopback")]);
            args.push(arg("--passphrase-file"));
            args.push(passphrase_file.expect("strong cipher requires a passphrase file").into());
            args.push(arg("--output"));
            args.push(output.into());
            args.push(arg("--decrypt"));
            args.push(arg("--"));
            args.push(input.into());
            tools.gpg.clone()
        }
        TransformKind::EncryptArchive => {
            // Bare -p makes 7z read the password from stdin.
            args.extend([arg("a"), arg("-y"), arg("-p"), arg("-mhe=on")]);
            args.push(output.into());
            args.push(input.into());
            tools.sevenzip.clone()
        }
        TransformKind::DecryptArchive => {
            args.extend([arg("x"), arg("-y"), arg("-p")]);
            let mut outdir = OsString::from("-o");
            outdir.push(output.as_os_str());
            args.push(outdir);
            args.push(input.into());
            tools.sevenzip.clone()
        }
        TransformKind::EmbedPayload => {
            args.extend([arg("embed"), arg("-q"), arg("-f")]);
            args.push(arg("-ef"));
            args.push(payload_file.expect("embed requires a payload file").into());
            args.push(arg("-cf"));
            args.push(input.into());
            args.push(arg("-sf"));
            args.push(output.into());
            tools.steghide.clone()
        }
        TransformKind::ExtractPayload => {
            args.extend([arg("extract"), arg("-q"), arg("-f")]);
            args.push(arg("-sf"));
            args.push(input.into());
            args.push(arg("-xf"));
            args.push(output.into());
            tools.steghide.clone()
        }
    };

    CommandPlan { program, args, secret_channel: secret_channel(kind) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> ToolChain {
        ToolChain::with_programs("/usr/bin/gpg", "/usr/bin/7z", "/usr/bin/steghide")
    }

    #[test]
    fn test_strong_cipher_uses_passphrase_file() {
        let plan = build(
            TransformKind::EncryptStrong,
            &chain(),
            Path::new("notes.txt"),
            Path::new("notes.txt.gpg"),
            None,
            Some(Path::new("/tmp/veilbox-pass-1")),
        );

        assert_eq!(plan.secret_channel, SecretChannel::PassFile);
        assert_eq!(plan.program, PathBuf::from("/usr/bin/gpg"));
        assert!(plan.args.contains(&OsString::from("--symmetric")));
        assert!(plan.args.contains(&OsString::from("/tmp/veilbox-pass-1")));
    }

    #[test]
    fn test_archive_reads_password_from_stdin() {
        let plan = build(
            TransformKind::EncryptArchive,
            &chain(),
            Path::new("docs.txt"),
            Path::new("docs.txt.7z"),
            None,
            None,
        );

        assert_eq!(plan.secret_channel, SecretChannel::Stdin);
        assert_eq!(plan.args[0], OsString::from("a"));
        assert!(plan.args.contains(&OsString::from("-p")));
    }

    #[test]
    fn test_extract_archive_targets_output_directory() {
        let plan = build(
            TransformKind::DecryptArchive,
            &chain(),
            Path::new("docs.7z"),
            Path::new("docs_extracted"),
            None,
            None,
        );

        assert!(plan.args.contains(&OsString::from("-odocs_extracted")));
    }

    #[test]
    fn test_secret_never_appears_in_argv() {
        // The builder has no access to the secret at all; spot-check a
        // representative password against every plan anyway.
        let secret = OsString::from("Sw0rdfish!");
        for kind in [
            TransformKind::EncryptStrong,
            TransformKind::DecryptStrong,
            TransformKind::EncryptArchive,
            TransformKind::DecryptArchive,
            TransformKind::EmbedPayload,
            TransformKind::ExtractPayload,
        ] {
            let plan = build(
                kind,
                &chain(),
                Path::new("input.jpg.gpg.7z"),
                Path::new("output"),
                Some(Path::new("payload.bin")),
                Some(Path::new("/tmp/passfile")),
            );
            assert!(!plan.args.contains(&secret), "{kind:?} leaked the secret");
        }
    }

    #[test]
    fn test_embed_delivers_the_secret_twice() {
        assert_eq!(secret_lines(TransformKind::EmbedPayload), 2);
        assert_eq!(secret_lines(TransformKind::ExtractPayload), 1);
        assert_eq!(secret_lines(TransformKind::EncryptArchive), 1);
        assert_eq!(secret_lines(TransformKind::DecryptArchive), 1);
    }

    #[test]
    fn test_embed_wires_payload_carrier_and_output() {
        let plan = build(
            TransformKind::EmbedPayload,
            &chain(),
            Path::new("photo.jpg"),
            Path::new("photo_stego.jpg"),
            Some(Path::new("note.txt")),
            None,
        );

        let args: Vec<&OsString> = plan.args.iter().collect();
        let pos = |needle: &str| args.iter().position(|a| a.as_os_str() == needle).unwrap();
        assert_eq!(plan.args[pos("-ef") + 1], OsString::from("note.txt"));
        assert_eq!(plan.args[pos("-cf") + 1], OsString::from("photo.jpg"));
        assert_eq!(plan.args[pos("-sf") + 1], OsString::from("photo_stego.jpg"));
    }
}
