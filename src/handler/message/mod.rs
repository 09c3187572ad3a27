mod download;
mod profile;

pub(super) use download::handle_content_link;
pub(super) use profile::handle_profile_link;
