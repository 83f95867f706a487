//! Upload media types and magic-byte detection.

use std::fmt;

const PDF_SIGNATURE: &[u8] = b"%PDF-";
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Content type sent by clients that do not know the file type.
const OCTET_STREAM: &str = "application/octet-stream";

/// A file type accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Pdf,
    Jpeg,
    Png,
}

impl MediaType {
    pub const ALL: [MediaType; 3] = [Self::Pdf, Self::Jpeg, Self::Png];

    /// Returns the canonical MIME type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    #[inline]
    pub const fn is_image(self) -> bool {
        matches!(self, Self::Jpeg | Self::Png)
    }

    const fn signature(self) -> &'static [u8] {
        match self {
            Self::Pdf => PDF_SIGNATURE,
            Self::Jpeg => JPEG_SIGNATURE,
            Self::Png => PNG_SIGNATURE,
        }
    }

    /// Parses a supported MIME type, ignoring parameters and case.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();

        match essence.to_ascii_lowercase().as_str() {
            "application/pdf" => Some(Self::Pdf),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Detects the type from the leading bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|media_type| media_type.matches(bytes))
    }

    /// Returns `true` if `bytes` start with this type's signature.
    #[inline]
    pub fn matches(self, bytes: &[u8]) -> bool {
        bytes.starts_with(self.signature())
    }

    /// Decides the type of an upload from its declared content type and bytes.
    ///
    /// A declared supported type must agree with the bytes. A missing or
    /// `application/octet-stream` declaration falls back to sniffing. Returns
    /// `None` for anything unsupported.
    pub fn resolve(declared: Option<&str>, bytes: &[u8]) -> Option<Self> {
        let declared = declared
            .map(str::trim)
            .filter(|mime| !mime.is_empty() && !mime.eq_ignore_ascii_case(OCTET_STREAM));

        match declared {
            None => Self::sniff(bytes),
            Some(mime) => Self::from_mime(mime).filter(|media_type| media_type.matches(bytes)),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use lector_postgres::types::constants::document::SUPPORTED_CONTENT_TYPES;

    use super::*;

    const PDF: &[u8] = b"%PDF-1.7\n%...";
    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00];

    #[test]
    fn sniffs_signatures() {
        assert_eq!(MediaType::sniff(PDF), Some(MediaType::Pdf));
        assert_eq!(MediaType::sniff(JPEG), Some(MediaType::Jpeg));
        assert_eq!(MediaType::sniff(PNG), Some(MediaType::Png));
        assert_eq!(MediaType::sniff(b"GIF89a"), None);
        assert_eq!(MediaType::sniff(b""), None);
    }

    #[test]
    fn declared_type_must_match_bytes() {
        assert_eq!(MediaType::resolve(Some("image/png"), PNG), Some(MediaType::Png));
        assert_eq!(MediaType::resolve(Some("image/png"), JPEG), None);
        assert_eq!(
            MediaType::resolve(Some("application/pdf; charset=binary"), PDF),
            Some(MediaType::Pdf)
        );
    }

    #[test]
    fn unsupported_declared_type_is_rejected() {
        assert_eq!(MediaType::resolve(Some("image/gif"), PNG), None);
        assert_eq!(MediaType::resolve(Some("text/plain"), b"hello"), None);
    }

    #[test]
    fn octet_stream_and_missing_types_are_sniffed() {
        assert_eq!(
            MediaType::resolve(Some("application/octet-stream"), JPEG),
            Some(MediaType::Jpeg)
        );
        assert_eq!(MediaType::resolve(None, PDF), Some(MediaType::Pdf));
        assert_eq!(MediaType::resolve(None, b"plain text"), None);
    }

    #[test]
    fn mime_parsing_is_lenient() {
        assert_eq!(MediaType::from_mime("IMAGE/JPEG"), Some(MediaType::Jpeg));
        assert_eq!(MediaType::from_mime("image/jpg"), Some(MediaType::Jpeg));
        assert_eq!(MediaType::Jpeg.to_string(), "image/jpeg");
        assert!(MediaType::Png.is_image());
        assert!(!MediaType::Pdf.is_image());
    }

    #[test]
    fn canonical_types_pass_the_schema_check() {
        let canonical: Vec<_> = MediaType::ALL.iter().map(|media_type| media_type.as_str()).collect();
        assert_eq!(canonical, SUPPORTED_CONTENT_TYPES);
    }
}
