use crate::{
    handler::{DispatchError, DispatchOutcome, DispatchStage, MessageHandler, Reply},
    platform::instagram::{decode_media, CarouselMedia, CarouselPost, DecodedMedia, ImagePost, MediaKind, VideoPost},
    transport::{OutboundKind, OutboundMedia},
};

pub(in crate::handler) async fn handle_content_link(
    handler: &MessageHandler,
    reply: &Reply<'_>,
    link: &str,
) -> DispatchOutcome {
    match download(handler, reply, link).await {
        Ok(0) => {
            warn!("[{}] nothing delivered for {}", DispatchStage::Deliver, link);
            DispatchOutcome::Dropped {
                stage: DispatchStage::FetchMedia,
            }
        }
        Ok(media_sent) => {
            info!("Delivered {} media for {}", media_sent, link);
            DispatchOutcome::Delivered { media_sent }
        }
        Err(e) => {
            let stage = e.stage();
            match e.report_text() {
                Some(text) => {
                    warn!("[{}] {} failed: {}", stage, link, e);
                    if let Err(send_err) = handler.transport.send_text(reply.chat, &text, &reply.quote).await {
                        error!("Failed to report error to {}: {}", reply.chat, send_err);
                    }
                    DispatchOutcome::Reported(text)
                }
                None => {
                    warn!("[{}] dropping {}: {}", stage, link, e);
                    DispatchOutcome::Dropped { stage }
                }
            }
        }
    }
}

async fn download(handler: &MessageHandler, reply: &Reply<'_>, link: &str) -> Result<usize, DispatchError> {
    debug!("[{}] {}", DispatchStage::FetchMetadata, link);
    let body = handler
        .state
        .instagram
        .fetch_media_document(link)
        .await
        .map_err(DispatchError::Metadata)?;

    debug!("[{}] {} bytes", DispatchStage::Decode, body.len());
    match decode_media(&body)? {
        DecodedMedia::Carousel(post) => deliver_carousel(handler, reply, &post).await,
        DecodedMedia::Video(post) => deliver_video(handler, reply, &post).await,
        DecodedMedia::Image(post) => deliver_image(handler, reply, &post).await,
    }
}

async fn deliver_image(handler: &MessageHandler, reply: &Reply<'_>, post: &ImagePost) -> Result<usize, DispatchError> {
    let link = post.download_link().ok_or(DispatchError::NoVariant)?;

    debug!("[{}] {}", DispatchStage::FetchMedia, link);
    let bytes = handler
        .state
        .instagram
        .download(link)
        .await
        .map_err(DispatchError::MediaFetch)?;

    let media = OutboundMedia::new(OutboundKind::Image, bytes, reply.quote.clone())
        .with_dimensions(post.width, post.height)
        .with_caption(post.caption());

    handler.transport.send_media(reply.chat, media).await?;
    Ok(1)
}

async fn deliver_video(handler: &MessageHandler, reply: &Reply<'_>, post: &VideoPost) -> Result<usize, DispatchError> {
    let link = post.download_link().ok_or(DispatchError::NoVariant)?;

    debug!("[{}] {}", DispatchStage::FetchMedia, link);
    let bytes = handler
        .state
        .instagram
        .download(link)
        .await
        .map_err(DispatchError::MediaFetch)?;

    let media = OutboundMedia::new(OutboundKind::Video, bytes, reply.quote.clone())
        .with_dimensions(post.width, post.height)
        .with_duration(post.video_duration as u32)
        .with_caption(post.caption());

    handler.transport.send_media(reply.chat, media).await?;
    Ok(1)
}

/// Children are delivered one by one, each according to its own kind. A child that
/// cannot be fetched or sent is skipped. The caption follows as a text message
/// once at least one child went out.
async fn deliver_carousel(
    handler: &MessageHandler,
    reply: &Reply<'_>,
    post: &CarouselPost,
) -> Result<usize, DispatchError> {
    let mut media_sent = 0;

    for (index, child) in post.carousel_media.iter().enumerate() {
        match deliver_carousel_child(handler, reply, child).await {
            Ok(()) => media_sent += 1,
            Err(e) => warn!("[{}] skipping carousel item {}: {}", e.stage(), index, e),
        }
    }

    if media_sent > 0 {
        if let Err(e) = handler
            .transport
            .send_text(reply.chat, &post.caption(), &reply.quote)
            .await
        {
            warn!("[{}] carousel caption not sent: {}", DispatchStage::Deliver, e);
        }
    }

    Ok(media_sent)
}

async fn deliver_carousel_child(
    handler: &MessageHandler,
    reply: &Reply<'_>,
    child: &CarouselMedia,
) -> Result<(), DispatchError> {
    let kind = match child.kind() {
        MediaKind::Image => OutboundKind::Image,
        MediaKind::Video => OutboundKind::Video,
        other => return Err(DispatchError::UnknownMediaKind(other.code())),
    };
    let link = child.download_link().ok_or(DispatchError::NoVariant)?;

    let bytes = handler
        .state
        .instagram
        .download(link)
        .await
        .map_err(DispatchError::MediaFetch)?;

    let mut media =
        OutboundMedia::new(kind, bytes, reply.quote.clone()).with_dimensions(child.width, child.height);
    if kind == OutboundKind::Video {
        media = media.with_duration(child.video_duration as u32);
    }

    handler.transport.send_media(reply.chat, media).await?;
    Ok(())
}
