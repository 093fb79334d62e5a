use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use uuid::Uuid;

static UNSAFE_CHARS: OnceLock<Regex> = OnceLock::new();

pub fn ensure_dirs(upload_folder: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(upload_folder)
}

/// Reduces a client-supplied filename to a flat ASCII name made of
/// `[A-Za-z0-9_.-]`. May return an empty string.
pub fn sanitize_filename(filename: &str) -> String {
    let unsafe_chars = UNSAFE_CHARS.get_or_init(|| Regex::new(r"[^A-Za-z0-9_.-]").unwrap());

    let ascii: String = filename
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    unsafe_chars
        .replace_all(&joined, "")
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Unique on-disk name for an upload. The original name is kept as a suffix
/// for readability; when nothing survives sanitization the extension is
/// guessed from the part's content type.
pub fn storage_key(filename: &str, content_type: Option<&str>) -> String {
    let id = Uuid::new_v4().simple().to_string();
    let sanitized = sanitize_filename(filename);
    if !sanitized.is_empty() {
        return format!("{}_{}", id, sanitized);
    }

    match content_type
        .and_then(mime_guess::get_mime_extensions_str)
        .and_then(|exts| exts.first())
    {
        Some(ext) => format!("{}.{}", id, ext),
        None => id,
    }
}

pub async fn save_upload(upload_folder: &Path, key: &str, data: &[u8]) -> std::io::Result<PathBuf> {
    let path = upload_folder.join(key);
    tokio::fs::write(&path, data).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_filename("face.jpg"), "face.jpg");
        assert_eq!(sanitize_filename("My Photo 01.png"), "My_Photo_01.png");
    }

    #[test]
    fn sanitize_strips_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename("/"), "");
    }

    #[test]
    fn sanitize_drops_non_ascii_and_symbols() {
        assert_eq!(sanitize_filename("sonrisa ñ.jpg"), "sonrisa_.jpg");
        assert_eq!(sanitize_filename("a<b>c|d?.gif"), "abcd.gif");
        assert_eq!(sanitize_filename("éé"), "");
    }

    #[test]
    fn keys_are_unique_for_the_same_name() {
        let a = storage_key("face.jpg", Some("image/jpeg"));
        let b = storage_key("face.jpg", Some("image/jpeg"));
        assert_ne!(a, b);
        assert!(a.ends_with("_face.jpg"));
    }

    #[test]
    fn key_falls_back_to_content_type_extension() {
        let key = storage_key("../", Some("image/png"));
        assert!(key.ends_with(".png"), "{key}");
        assert!(!key.contains('/'));

        let bare = storage_key("", None);
        assert_eq!(bare.len(), 32);
    }

    #[tokio::test]
    async fn save_upload_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("static/uploads");
        ensure_dirs(&nested).unwrap();

        let path = save_upload(&nested, "k_face.jpg", b"\xff\xd8jpeg").await.unwrap();
        assert_eq!(path, nested.join("k_face.jpg"));
        assert_eq!(std::fs::read(&path).unwrap(), b"\xff\xd8jpeg");
    }
}
