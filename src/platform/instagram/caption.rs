use super::model::{CarouselPost, ImagePost, PostHeader, UserProfile, VideoPost};

fn post_caption(header: &PostHeader, views: Option<i64>) -> String {
    let mut caption = header.caption_text().to_string();

    if header.counts_disabled {
        caption.push_str("\n\n*Counts disabled by OP!*\n");
    } else {
        caption.push_str(&format!("\n\n*👍 : {}*\n", header.like_count));
        caption.push_str(&format!("*💬 : {}*\n", header.comment_count));
        if let Some(views) = views {
            caption.push_str(&format!("*👀 : {}*\n", views));
        }
    }

    let user = &header.user;
    if user.full_name.is_empty() {
        caption.push_str(&format!("*👤 : @{}*", user.username));
    } else {
        caption.push_str(&format!("*👤 : {} [@{}]*", user.full_name, user.username));
    }

    caption
}

impl ImagePost {
    pub fn caption(&self) -> String {
        post_caption(&self.header, None)
    }
}

impl VideoPost {
    pub fn caption(&self) -> String {
        post_caption(&self.header, Some(self.view_count))
    }
}

impl CarouselPost {
    pub fn caption(&self) -> String {
        post_caption(&self.header, None)
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

impl UserProfile {
    pub fn caption(&self) -> String {
        let mut caption = String::new();

        caption.push_str(&format!("*Name* : {}\n", or_dash(&self.full_name)));
        caption.push_str(&format!("*Username* : @{}\n", self.username));
        caption.push_str(&format!("*Bio* : {}\n", or_dash(&self.biography)));
        caption.push_str(&format!("*Followers* : {}\n", self.follower_count()));
        caption.push_str(&format!("*Following* : {}\n\n", self.following_count()));

        let flags = [
            (self.blocked_by_viewer, "• *Blocked by me* ✅\n"),
            (self.blocks_viewer, "• *Blocks me* 💀\n"),
            (self.is_private, "• *Private Acc.* ✅\n"),
            (self.is_verified, "• *Verfied* ✅\n"),
            (self.is_professional, "• *Professional Acc.* ✅\n"),
            (self.is_business, "• *Bussiness Acc.* ✅\n"),
            (self.follows_viewer, "• *Follows Me* 😍\n"),
            (self.followed_by_viewer, "• *Followed by me* 🤔\n"),
        ];

        for (enabled, line) in flags {
            if enabled {
                caption.push_str(line);
            }
        }

        caption
    }
}
