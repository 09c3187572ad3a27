use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;
use url::Url;

pub const INSTAGRAM_HOSTNAMES: [&str; 2] = ["www.instagram.com", "instagram.com"];

const CONTENT_PATH_PREFIXES: [&str; 3] = ["/p/", "/reel/", "/tv/"];

const HANDLE_TRAILING_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ':', ';'];

static INSTAGRAM_USERNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@([a-zA-Z0-9._]+)")
        .context("Failed to create Instagram username regex")
        .unwrap()
});

static INSTAGRAM_STORIES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/stories/[a-zA-Z0-9._]+/\d+")
        .context("Failed to create Instagram stories regex")
        .unwrap()
});

/// What a single whitespace-delimited token of a chat message refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
    /// Post, reel or long-form video link that goes through the download flow.
    Content,
    /// Stories link. Recognized, but not handled.
    Story,
    /// Any other link on an Instagram host, looked up as a profile.
    Profile,
    /// Bare `@handle` token, looked up as a profile.
    Handle(String),
    Unrelated,
}

fn parse(link: &str) -> Option<Url> {
    Url::parse(link).ok()
}

fn has_instagram_host(url: &Url) -> bool {
    url.host_str()
        .map(|host| INSTAGRAM_HOSTNAMES.contains(&host.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn is_recognized_host(link: &str) -> bool {
    parse(link).map(|url| has_instagram_host(&url)).unwrap_or(false)
}

pub fn is_supported_content_link(link: &str) -> bool {
    let Some(url) = parse(link) else {
        return false;
    };

    let path = url.path();
    let is_content_path = CONTENT_PATH_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
        || INSTAGRAM_STORIES_REGEX.is_match(path);

    has_instagram_host(&url) && is_content_path
}

pub fn is_stories_link(link: &str) -> bool {
    parse(link)
        .map(|url| INSTAGRAM_STORIES_REGEX.is_match(url.path()))
        .unwrap_or(false)
}

pub fn extract_usernames(text: &str) -> Vec<&str> {
    INSTAGRAM_USERNAME_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

pub fn profile_url(username: &str) -> String {
    format!("https://www.instagram.com/{}/", username)
}

pub fn classify_token(token: &str) -> LinkKind {
    if is_supported_content_link(token) {
        if is_stories_link(token) {
            return LinkKind::Story;
        }
        return LinkKind::Content;
    }

    if is_recognized_host(token) {
        return LinkKind::Profile;
    }

    // only tokens that are a handle on their own, so e-mail addresses don't trigger lookups
    let handle = token.trim_end_matches(HANDLE_TRAILING_PUNCTUATION);
    if handle.starts_with('@') {
        if let Some(username) = extract_usernames(handle).first() {
            if handle.len() == username.len() + 1 {
                return LinkKind::Handle(username.to_string());
            }
        }
    }

    LinkKind::Unrelated
}
