use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use crate::models::tweet::{
    Detail, MediaInfo, MediaItem, MediaKind, PhotoMedia, TweetRecord, TweetResult, TweetUser,
    UrlEntity, VideoMedia,
};
use crate::utils::html::decode_entities;

/// Pulls the tweet record out of one provider envelope.
///
/// Handles the two supported result variants; anything else (unknown
/// `__typename`, missing path, records failing field validation) is logged
/// and skipped so a bad record never aborts the batch.
pub fn unwrap_result(envelope: &Value) -> Option<TweetRecord> {
    let Some(result) = envelope.pointer("/data/tweetResult/result") else {
        warn!("provider envelope carries no tweet result");
        return None;
    };

    match serde_json::from_value::<TweetResult>(result.clone()) {
        Ok(TweetResult::Tweet(record)) => Some(record),
        Ok(TweetResult::TweetWithVisibilityResults { tweet }) => Some(tweet),
        Ok(TweetResult::Unknown) => {
            let typename = result
                .get("__typename")
                .and_then(Value::as_str)
                .unwrap_or("<missing>");
            warn!("type mismatch: {}", typename);
            None
        }
        Err(err) => {
            warn!("malformed tweet record: {}", err);
            None
        }
    }
}

/// Flattens a validated record into the outgoing `Detail` projection.
pub fn build_detail(record: &TweetRecord) -> Detail {
    Detail {
        user: extract_user(record),
        text: extract_text(record),
        urls: extract_urls(record),
        medias: extract_medias(record),
    }
}

fn extract_user(record: &TweetRecord) -> TweetUser {
    let legacy = &record.core.user_results.result.legacy;
    TweetUser {
        name: legacy.name.clone(),
        screen_name: legacy.screen_name.clone(),
    }
}

// Long-form posts keep their full body in the note substructure; the legacy
// field only holds the truncated short text.
fn extract_text(record: &TweetRecord) -> String {
    let raw = record
        .note_tweet
        .as_ref()
        .map(|note| note.note_tweet_results.result.text.as_str())
        .unwrap_or(&record.legacy.full_text);

    decode_entities(raw)
}

// Union of the three possible URL sources, deduplicated by short URL with
// later sources winning. No URLs anywhere means `None`, not an empty map.
fn extract_urls(record: &TweetRecord) -> Option<BTreeMap<String, String>> {
    let mut collected: Vec<&UrlEntity> = Vec::new();

    if let Some(note) = &record.note_tweet {
        if let Some(entity_set) = &note.note_tweet_results.result.entity_set {
            if let Some(urls) = &entity_set.urls {
                collected.extend(urls);
            }
        }
    }
    if let Some(extended) = &record.legacy.extended_entities {
        if let Some(urls) = &extended.urls {
            collected.extend(urls);
        }
    }
    if let Some(entities) = &record.legacy.entities {
        if let Some(urls) = &entities.urls {
            collected.extend(urls);
        }
    }

    if collected.is_empty() {
        return None;
    }

    Some(
        collected
            .into_iter()
            .map(|entity| (entity.url.clone(), entity.expanded_url.clone()))
            .collect(),
    )
}

// extended_entities takes precedence over entities when present, even when
// it carries no media itself.
fn extract_medias(record: &TweetRecord) -> Option<Vec<MediaInfo>> {
    let legacy = &record.legacy;
    let medias = if let Some(extended) = &legacy.extended_entities {
        extended.media.as_ref()
    } else if let Some(entities) = &legacy.entities {
        entities.media.as_ref()
    } else {
        None
    }?;

    Some(medias.iter().filter_map(resolve_media).collect())
}

/// Resolves one media item into a renderable asset, or drops it.
pub fn resolve_media(media: &MediaItem) -> Option<MediaInfo> {
    match media {
        MediaItem::Photo(photo) => resolve_photo(photo),
        MediaItem::Video(video) => resolve_video(video, MediaKind::Video),
        MediaItem::AnimatedGif(video) => resolve_video(video, MediaKind::AnimatedGif),
        MediaItem::Unknown => {
            warn!("unknown media type");
            None
        }
    }
}

fn resolve_photo(photo: &PhotoMedia) -> Option<MediaInfo> {
    let source = &photo.media_url_https;
    let Some((base, ext)) = source.rsplit_once('.') else {
        warn!("photo media has no file extension: {}", source);
        return None;
    };

    Some(MediaInfo {
        kind: MediaKind::Photo,
        url: format!("{base}?format={ext}&name=orig"),
        ext: ext.to_string(),
        shorten: photo.url.clone(),
    })
}

fn resolve_video(video: &VideoMedia, kind: MediaKind) -> Option<MediaInfo> {
    let Some(best) = video
        .video_info
        .variants
        .iter()
        .max_by_key(|variant| variant.bitrate.unwrap_or(0))
    else {
        warn!("video media has no variants");
        return None;
    };

    let trimmed = best.url.split('?').next().unwrap_or_default();
    let Some((_, ext)) = trimmed.rsplit_once('.') else {
        warn!("video variant has no file extension: {}", best.url);
        return None;
    };

    Some(MediaInfo {
        kind,
        url: best.url.clone(),
        ext: ext.to_string(),
        shorten: video.url.clone(),
    })
}
