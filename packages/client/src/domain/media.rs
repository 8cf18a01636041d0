//! Media classification for attachments.

use super::value_object::{AttachmentPath, AttachmentPaths, BaseUrl, extension_of};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg"];

/// How an attachment is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    /// Anything else: offered as a download link.
    Generic,
}

impl MediaKind {
    /// Resolve from a lower-cased file extension.
    pub fn from_extension(extension: Option<&str>) -> Self {
        match extension {
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => MediaKind::Image,
            Some(ext) if VIDEO_EXTENSIONS.contains(&ext) => MediaKind::Video,
            Some(ext) if AUDIO_EXTENSIONS.contains(&ext) => MediaKind::Audio,
            _ => MediaKind::Generic,
        }
    }

    /// Resolve from a MIME type such as `image/png`.
    pub fn from_content_type(content_type: &str) -> Self {
        let top_level = content_type
            .split('/')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match top_level.as_str() {
            "image" => MediaKind::Image,
            "video" => MediaKind::Video,
            "audio" => MediaKind::Audio,
            _ => MediaKind::Generic,
        }
    }

    /// Resolve from a file name, e.g. a file picked for upload.
    pub fn from_file_name(file_name: &str) -> Self {
        Self::from_extension(extension_of(file_name).as_deref())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Generic => "download",
        }
    }
}

/// One renderable attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPreview {
    pub kind: MediaKind,
    /// Absolute URL for served files, the local file name for pending uploads.
    pub source: String,
    pub label: String,
}

impl MediaPreview {
    /// Preview of a file already stored by the backend.
    pub fn remote(path: &AttachmentPath, base_url: &BaseUrl) -> Self {
        Self {
            kind: path.media_kind(),
            source: base_url.file_url(path.as_str()),
            label: path.label(),
        }
    }

    /// Preview of a file selected locally and not yet uploaded.
    pub fn local(attachment: &Attachment) -> Self {
        Self {
            kind: attachment.kind(),
            source: attachment.file_name.clone(),
            label: attachment.file_name.clone(),
        }
    }
}

/// Single inline media or a carousel for several attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaLayout {
    None,
    Single(MediaPreview),
    Carousel(Vec<MediaPreview>),
}

impl MediaLayout {
    pub fn from_previews(mut previews: Vec<MediaPreview>) -> Self {
        match previews.len() {
            0 => MediaLayout::None,
            1 => MediaLayout::Single(previews.remove(0)),
            _ => MediaLayout::Carousel(previews),
        }
    }

    pub fn from_paths(paths: &AttachmentPaths, base_url: &BaseUrl) -> Self {
        Self::from_previews(
            paths
                .iter()
                .map(|path| MediaPreview::remote(path, base_url))
                .collect(),
        )
    }

    pub fn previews(&self) -> &[MediaPreview] {
        match self {
            MediaLayout::None => &[],
            MediaLayout::Single(preview) => std::slice::from_ref(preview),
            MediaLayout::Carousel(previews) => previews,
        }
    }
}

/// A local file read into memory for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content: Vec<u8>,
    /// MIME type if the picker reported one.
    pub content_type: Option<String>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Content type wins over the extension when both are known.
    pub fn kind(&self) -> MediaKind {
        match &self.content_type {
            Some(content_type) => MediaKind::from_content_type(content_type),
            None => MediaKind::from_file_name(&self.file_name),
        }
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("size", &self.content.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BaseUrl {
        BaseUrl::new("http://api.test").unwrap()
    }

    #[test]
    fn test_media_kind_from_path() {
        // テスト項目: 拡張子から画像・動画・音声・その他に分類される
        let cases = [
            ("public/uploads/photo.png", MediaKind::Image),
            ("public/uploads/PHOTO.JPEG", MediaKind::Image),
            ("public/uploads/clip.mkv", MediaKind::Video),
            ("public/uploads/song.ogg", MediaKind::Audio),
            ("public/uploads/notes.pdf", MediaKind::Generic),
            ("public/uploads/noext", MediaKind::Generic),
        ];

        for (path, expected) in cases {
            let path = AttachmentPath::new(path).unwrap();
            assert_eq!(path.media_kind(), expected, "{}", path.as_str());
        }
    }

    #[test]
    fn test_remote_preview_image_and_download() {
        // テスト項目: png は画像として、pdf はファイル名ラベル付きのダウンロードとして描画される
        // given (前提条件):
        let photo = AttachmentPath::new("public/uploads/photo.png").unwrap();
        let notes = AttachmentPath::new("public/uploads/notes.pdf").unwrap();

        // when (操作):
        let photo_preview = MediaPreview::remote(&photo, &base());
        let notes_preview = MediaPreview::remote(&notes, &base());

        // then (期待する結果):
        assert_eq!(photo_preview.kind, MediaKind::Image);
        assert_eq!(photo_preview.source, "http://api.test/public/uploads/photo.png");
        assert_eq!(notes_preview.kind, MediaKind::Generic);
        assert_eq!(notes_preview.label, "notes.pdf");
    }

    #[test]
    fn test_media_kind_from_content_type() {
        // テスト項目: MIME タイプのトップレベルで分類される
        assert_eq!(MediaKind::from_content_type("image/webp"), MediaKind::Image);
        assert_eq!(MediaKind::from_content_type("video/mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_content_type("audio/mpeg"), MediaKind::Audio);
        assert_eq!(
            MediaKind::from_content_type("application/pdf"),
            MediaKind::Generic
        );
    }

    #[test]
    fn test_attachment_kind_prefers_content_type() {
        // テスト項目: ローカル添付は MIME タイプがあればそれを優先する
        let by_name = Attachment::new("voice.mp3", vec![1, 2, 3]);
        let by_type = Attachment::new("blob", vec![]).with_content_type("image/png");

        assert_eq!(by_name.kind(), MediaKind::Audio);
        assert_eq!(by_type.kind(), MediaKind::Image);
        assert_eq!(MediaPreview::local(&by_name).label, "voice.mp3");
    }

    #[test]
    fn test_media_layout_single_and_carousel() {
        // テスト項目: 添付 1 件はそのまま、複数件はカルーセルになる
        let single = AttachmentPaths::parse("public/uploads/a.png");
        let many = AttachmentPaths::parse("public/uploads/a.png,public/uploads/b.mp4");

        assert!(matches!(
            MediaLayout::from_paths(&single, &base()),
            MediaLayout::Single(_)
        ));
        let carousel = MediaLayout::from_paths(&many, &base());
        assert!(matches!(carousel, MediaLayout::Carousel(ref items) if items.len() == 2));
        assert_eq!(carousel.previews()[1].kind, MediaKind::Video);
        assert_eq!(
            MediaLayout::from_paths(&AttachmentPaths::default(), &base()),
            MediaLayout::None
        );
    }
}
