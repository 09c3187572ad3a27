use serde::{Deserialize, Deserializer};

pub const MEDIA_TYPE_INVALID: i64 = -1;
pub const MEDIA_TYPE_IMAGE: i64 = 1;
pub const MEDIA_TYPE_VIDEO: i64 = 2;
pub const MEDIA_TYPE_CAROUSEL: i64 = 8;

/// Kind of a media document, as reported by `items[0].media_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Carousel,
    /// The document did not parse or carried no items.
    Invalid,
    /// Parsed fine, but no decoder exists for this code.
    Unsupported(i64),
}

impl MediaKind {
    pub fn from_code(code: i64) -> Self {
        match code {
            MEDIA_TYPE_IMAGE => Self::Image,
            MEDIA_TYPE_VIDEO => Self::Video,
            MEDIA_TYPE_CAROUSEL => Self::Carousel,
            MEDIA_TYPE_INVALID => Self::Invalid,
            other => Self::Unsupported(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Image => MEDIA_TYPE_IMAGE,
            Self::Video => MEDIA_TYPE_VIDEO,
            Self::Carousel => MEDIA_TYPE_CAROUSEL,
            Self::Invalid => MEDIA_TYPE_INVALID,
            Self::Unsupported(code) => *code,
        }
    }
}

/// Reads an explicit `null` as the zero value of the field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// --- Common ---

/// One rendition of an image or video asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MediaVariant {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub height: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageVersions {
    #[serde(deserialize_with = "null_as_default")]
    pub candidates: Vec<MediaVariant>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MediaUser {
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_pic_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_private: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_verified: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MediaCaption {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
}

/// Fields shared by every post shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostHeader {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    pub caption: Option<MediaCaption>,
    #[serde(deserialize_with = "null_as_default")]
    pub user: MediaUser,
    #[serde(deserialize_with = "null_as_default")]
    pub media_type: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub like_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub comment_count: i64,
    #[serde(rename = "like_and_view_counts_disabled", deserialize_with = "null_as_default")]
    pub counts_disabled: bool,
    #[serde(rename = "photo_of_you", deserialize_with = "null_as_default")]
    pub is_photo_of_me: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub caption_is_edited: bool,
}

impl PostHeader {
    pub fn caption_text(&self) -> &str {
        self.caption.as_ref().map(|c| c.text.as_str()).unwrap_or("")
    }
}

// --- Posts ---

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImagePost {
    #[serde(flatten)]
    pub header: PostHeader,
    #[serde(rename = "image_versions2", deserialize_with = "null_as_default")]
    pub image_versions: ImageVersions,
    #[serde(rename = "original_width", deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(rename = "original_height", deserialize_with = "null_as_default")]
    pub height: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoPost {
    #[serde(flatten)]
    pub header: PostHeader,
    #[serde(deserialize_with = "null_as_default")]
    pub video_versions: Vec<MediaVariant>,
    #[serde(rename = "image_versions2", deserialize_with = "null_as_default")]
    pub image_versions: ImageVersions,
    #[serde(deserialize_with = "null_as_default")]
    pub view_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub play_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub video_duration: f64,
    #[serde(rename = "original_width", deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(rename = "original_height", deserialize_with = "null_as_default")]
    pub height: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CarouselPost {
    #[serde(flatten)]
    pub header: PostHeader,
    #[serde(deserialize_with = "null_as_default")]
    pub carousel_media: Vec<CarouselMedia>,
    #[serde(deserialize_with = "null_as_default")]
    pub carousel_media_count: u32,
}

/// A single child of a carousel; image or video on its own.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CarouselMedia {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub media_type: i64,
    #[serde(rename = "image_versions2", deserialize_with = "null_as_default")]
    pub image_versions: ImageVersions,
    #[serde(deserialize_with = "null_as_default")]
    pub video_versions: Vec<MediaVariant>,
    #[serde(deserialize_with = "null_as_default")]
    pub video_duration: f64,
    #[serde(rename = "original_width", alias = "original_weight", deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(rename = "original_height", deserialize_with = "null_as_default")]
    pub height: u32,
}

impl CarouselMedia {
    pub fn kind(&self) -> MediaKind {
        MediaKind::from_code(self.media_type)
    }
}

/// Top-level `{"items": [...]}` envelope of the media endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct ItemsEnvelope<T> {
    pub items: Option<Vec<T>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct MediaTypeProbe {
    pub media_type: i64,
}

// --- Profile ---

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EdgeCount {
    #[serde(deserialize_with = "null_as_default")]
    pub count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub biography: String,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_pic_url_hd: String,
    #[serde(deserialize_with = "null_as_default")]
    pub profile_pic_url: String,
    #[serde(rename = "edge_followed_by", deserialize_with = "null_as_default")]
    pub followers: EdgeCount,
    #[serde(rename = "edge_follow", deserialize_with = "null_as_default")]
    pub following: EdgeCount,
    #[serde(deserialize_with = "null_as_default")]
    pub blocked_by_viewer: bool,
    #[serde(rename = "has_blocked_viewer", deserialize_with = "null_as_default")]
    pub blocks_viewer: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_private: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_verified: bool,
    #[serde(rename = "is_professional_account", deserialize_with = "null_as_default")]
    pub is_professional: bool,
    #[serde(rename = "is_business_account", deserialize_with = "null_as_default")]
    pub is_business: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub follows_viewer: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub followed_by_viewer: bool,
}

impl UserProfile {
    pub fn follower_count(&self) -> i64 {
        self.followers.count
    }

    pub fn following_count(&self) -> i64 {
        self.following.count
    }

    /// HD picture when present, the regular one otherwise.
    pub fn best_profile_pic_url(&self) -> &str {
        if self.profile_pic_url_hd.is_empty() {
            &self.profile_pic_url
        } else {
            &self.profile_pic_url_hd
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ProfileEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    pub graphql: ProfileGraphql,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ProfileGraphql {
    #[serde(deserialize_with = "null_as_default")]
    pub user: UserProfile,
}
