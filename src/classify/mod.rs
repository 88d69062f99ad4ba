use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Terminal classification of an upload; decided once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Text,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
const TEXT_EXTENSIONS: &[&str] = &["md", "mdx", "txt"];

/// Classifies an upload by declared media type first, file extension second.
/// Returns `None` for anything that is neither image-like nor text-like.
pub fn classify(media_type: &str, file_name: &str) -> Option<FileKind> {
    let extension = extension(file_name);

    if media_type.starts_with("image/") || has_extension(&extension, IMAGE_EXTENSIONS) {
        return Some(FileKind::Image);
    }

    if media_type.starts_with("text/") || has_extension(&extension, TEXT_EXTENSIONS) {
        return Some(FileKind::Text);
    }

    None
}

/// Encodes image bytes as a `data:` URL for inline vision submission.
pub fn image_data_url(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{media_type};base64,{}", BASE64.encode(bytes))
}

fn extension(file_name: &str) -> Option<String> {
    let (stem, extension) = file_name.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}

fn has_extension(extension: &Option<String>, candidates: &[&str]) -> bool {
    match extension {
        Some(extension) => candidates.contains(&extension.as_str()),
        None => false,
    }
}
