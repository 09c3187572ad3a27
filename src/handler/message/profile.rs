use crate::{
    handler::{DispatchError, DispatchOutcome, DispatchStage, MessageHandler, Reply},
    platform::{instagram::InstagramError, PlatformError},
    transport::{OutboundKind, OutboundMedia},
};

/// Looks the profile up and answers with its picture and a summary. Every failure
/// is dropped without a reply.
pub(in crate::handler) async fn handle_profile_link(
    handler: &MessageHandler,
    reply: &Reply<'_>,
    link: &str,
) -> DispatchOutcome {
    match send_profile(handler, reply, link).await {
        Ok(()) => {
            info!("Delivered profile card for {}", link);
            DispatchOutcome::Delivered { media_sent: 1 }
        }
        Err(e) => {
            let stage = e.stage();
            debug!("[{}] dropping profile lookup {}: {}", stage, link, e);
            DispatchOutcome::Dropped { stage }
        }
    }
}

async fn send_profile(handler: &MessageHandler, reply: &Reply<'_>, link: &str) -> Result<(), DispatchError> {
    let instagram = &handler.state.instagram;

    let profile = instagram.fetch_profile(link).await.map_err(|e| match e {
        PlatformError::Fetch(e) => DispatchError::Metadata(e),
        PlatformError::Instagram(InstagramError::ProfileNotFound) => DispatchError::ProfileNotFound,
        PlatformError::Instagram(e) => DispatchError::Decode(e),
    })?;

    let picture = profile.best_profile_pic_url();
    if picture.is_empty() {
        return Err(DispatchError::NoVariant);
    }

    debug!("[{}] {}", DispatchStage::FetchMedia, picture);
    let bytes = instagram.download(picture).await.map_err(DispatchError::MediaFetch)?;

    let media = OutboundMedia::new(OutboundKind::Image, bytes, reply.quote.clone()).with_caption(profile.caption());
    handler.transport.send_media(reply.chat, media).await?;

    Ok(())
}
