pub mod http;

use mime::Mime;

/// Sniffs the mimetype of a downloaded media payload from its leading bytes.
pub fn detect_content_type(bytes: &[u8]) -> Mime {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => mime::IMAGE_JPEG,
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => mime::IMAGE_PNG,
        [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => mime::IMAGE_GIF,
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => known("image/webp"),
        [_, _, _, _, b'f', b't', b'y', b'p', ..] => known("video/mp4"),
        [0x1A, 0x45, 0xDF, 0xA3, ..] => known("video/webm"),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

fn known(essence: &str) -> Mime {
    essence.parse().unwrap_or(mime::APPLICATION_OCTET_STREAM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_content_type() {
        assert_eq!(detect_content_type(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]), mime::IMAGE_JPEG);
        assert_eq!(
            detect_content_type(b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR"),
            mime::IMAGE_PNG
        );
        assert_eq!(detect_content_type(b"GIF89a\x01\x00"), mime::IMAGE_GIF);
        assert_eq!(detect_content_type(b"RIFF\x24\x00\x00\x00WEBPVP8 ").essence_str(), "image/webp");
        assert_eq!(
            detect_content_type(b"\x00\x00\x00\x18ftypmp42\x00\x00\x00\x00").essence_str(),
            "video/mp4"
        );
        assert_eq!(detect_content_type(&[0x1A, 0x45, 0xDF, 0xA3, 0x01]).essence_str(), "video/webm");
    }

    #[test]
    fn test_detect_content_type_fallback() {
        assert_eq!(detect_content_type(b""), mime::APPLICATION_OCTET_STREAM);
        assert_eq!(detect_content_type(b"plain text"), mime::APPLICATION_OCTET_STREAM);
        assert_eq!(detect_content_type(b"RIFFxxxxWAVE"), mime::APPLICATION_OCTET_STREAM);
    }
}
