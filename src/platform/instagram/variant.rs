use super::model::{CarouselMedia, ImagePost, MediaKind, MediaVariant, VideoPost};

/// Picks the rendition to download for an asset whose original size is
/// `width` x `height`.
///
/// The first candidate matching the original size exactly wins. Without an exact
/// match the candidate with the largest area wins, ties going to the earliest one.
/// Returns `None` when nothing usable is found, in which case the item is skipped.
pub fn select_variant(width: u32, height: u32, candidates: &[MediaVariant]) -> Option<&str> {
    if let Some(exact) = candidates.iter().find(|c| c.width == width && c.height == height) {
        return non_empty(&exact.url);
    }

    let mut current_max: u64 = 0;
    let mut best: Option<&MediaVariant> = None;

    for candidate in candidates {
        let resolution = u64::from(candidate.width) * u64::from(candidate.height);
        if resolution > current_max {
            current_max = resolution;
            best = Some(candidate);
        }
    }

    best.and_then(|c| non_empty(&c.url))
}

fn non_empty(url: &str) -> Option<&str> {
    if url.is_empty() {
        None
    } else {
        Some(url)
    }
}

impl ImagePost {
    pub fn download_link(&self) -> Option<&str> {
        select_variant(self.width, self.height, &self.image_versions.candidates)
    }
}

impl VideoPost {
    pub fn download_link(&self) -> Option<&str> {
        select_variant(self.width, self.height, &self.video_versions)
    }
}

impl CarouselMedia {
    pub fn download_link(&self) -> Option<&str> {
        match self.kind() {
            MediaKind::Image => select_variant(self.width, self.height, &self.image_versions.candidates),
            MediaKind::Video => select_variant(self.width, self.height, &self.video_versions),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::instagram::model::ImageVersions;

    fn variant(url: &str, width: u32, height: u32) -> MediaVariant {
        MediaVariant {
            url: url.to_string(),
            width,
            height,
        }
    }

    #[test]
    fn test_exact_match_beats_larger_area() {
        let candidates = vec![
            variant("big-first", 2160, 2700),
            variant("exact", 1080, 1350),
            variant("big-last", 4320, 5400),
        ];
        assert_eq!(select_variant(1080, 1350, &candidates), Some("exact"));
    }

    #[test]
    fn test_first_exact_match_wins() {
        let candidates = vec![variant("first", 640, 640), variant("second", 640, 640)];
        assert_eq!(select_variant(640, 640, &candidates), Some("first"));
    }

    #[test]
    fn test_max_area_without_exact_match() {
        let candidates = vec![
            variant("small", 320, 400),
            variant("largest", 1080, 1350),
            variant("medium", 640, 800),
        ];
        assert_eq!(select_variant(1440, 1800, &candidates), Some("largest"));
    }

    #[test]
    fn test_area_tie_keeps_earliest() {
        // 800x600 and 600x800 share the same area
        let candidates = vec![variant("landscape", 800, 600), variant("portrait", 600, 800)];
        assert_eq!(select_variant(1, 1, &candidates), Some("landscape"));
    }

    #[test]
    fn test_empty_candidates_select_nothing() {
        assert_eq!(select_variant(1080, 1080, &[]), None);
    }

    #[test]
    fn test_zero_area_candidates_are_never_chosen() {
        let candidates = vec![variant("unsized", 0, 0)];
        assert_eq!(select_variant(1080, 1080, &candidates), None);
        // unless they are the exact match
        assert_eq!(select_variant(0, 0, &candidates), Some("unsized"));
    }

    #[test]
    fn test_empty_url_is_not_selected() {
        let candidates = vec![variant("", 1080, 1080)];
        assert_eq!(select_variant(1080, 1080, &candidates), None);
    }

    #[test]
    fn test_large_dimensions_do_not_overflow() {
        let candidates = vec![variant("a", 70_000, 70_000), variant("b", 80_000, 80_000)];
        assert_eq!(select_variant(1, 1, &candidates), Some("b"));
    }

    #[test]
    fn test_carousel_child_uses_its_own_kind() {
        let image = CarouselMedia {
            media_type: 1,
            width: 1080,
            height: 1080,
            image_versions: ImageVersions {
                candidates: vec![variant("image", 1080, 1080)],
            },
            video_versions: vec![variant("video", 1080, 1080)],
            ..Default::default()
        };
        assert_eq!(image.download_link(), Some("image"));

        let video = CarouselMedia { media_type: 2, ..image.clone() };
        assert_eq!(video.download_link(), Some("video"));

        let unknown = CarouselMedia { media_type: 5, ..image };
        assert_eq!(unknown.download_link(), None);
    }
}
