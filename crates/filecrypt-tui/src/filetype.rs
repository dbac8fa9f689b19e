//! Cosmetic file-type labels for the confirmation prompt.
//!
//! Sniffs a handful of magic-byte signatures and falls back to the file
//! extension. Display-only; the label never reaches the crypto core.

use std::io::Read;
use std::path::Path;

const SIGNATURES: &[(&[u8], &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "PNG image"),
    (b"\xFF\xD8\xFF", "JPEG image"),
    (b"GIF8", "GIF image"),
    (b"%PDF", "PDF document"),
    (b"PK\x03\x04", "ZIP archive"),
    (b"\x1F\x8B", "gzip archive"),
    (b"\x7FELF", "ELF binary"),
    (b"#!", "script"),
];

pub fn label(path: &Path) -> &'static str {
    if path.is_dir() {
        return "directory";
    }

    if let Ok(mut file) = std::fs::File::open(path) {
        let mut head = [0u8; 8];
        let n = file.read(&mut head).unwrap_or(0);
        for (magic, name) in SIGNATURES {
            if head[..n].starts_with(magic) {
                return name;
            }
        }
    }

    by_extension(path)
}

fn by_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("enc") => "encrypted file",
        Some("txt") | Some("md") | Some("log") => "text",
        Some("rs") | Some("c") | Some("h") | Some("py") | Some("sh") | Some("js") => {
            "source code"
        }
        Some("toml") | Some("json") | Some("yaml") | Some("yml") | Some("ini") => "config",
        Some("tar") | Some("zip") | Some("gz") | Some("zst") => "archive",
        Some(_) => "file",
        None => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_magic_bytes_win_over_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("picture.txt");
        fs::write(&path, b"\x89PNG\r\n\x1a\nrest").unwrap();
        assert_eq!(label(&path), "PNG image");
    }

    #[test]
    fn test_extension_fallback() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"plain words").unwrap();
        assert_eq!(label(&path), "text");
    }

    #[test]
    fn test_enc_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.enc");
        fs::write(&path, b"\x00\x01\x02").unwrap();
        assert_eq!(label(&path), "encrypted file");
    }

    #[test]
    fn test_directory_label() {
        let dir = TempDir::new().unwrap();
        assert_eq!(label(dir.path()), "directory");
    }

    #[test]
    fn test_unknown_without_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mystery");
        fs::write(&path, b"??").unwrap();
        assert_eq!(label(&path), "unknown");
    }
}
