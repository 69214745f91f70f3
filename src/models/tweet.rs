use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw provider shapes
//
// The lookup endpoint returns one envelope per tweet with the interesting
// record buried under data.tweetResult.result. Required fields are validated
// here at the deserialization boundary; a record that does not carry them is
// treated as an unsupported variant and skipped upstream.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub enum TweetResult {
    Tweet(TweetRecord),
    TweetWithVisibilityResults { tweet: TweetRecord },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TweetRecord {
    pub rest_id: String,
    pub core: TweetCore,
    pub legacy: LegacyTweet,
    #[serde(default)]
    pub note_tweet: Option<NoteTweet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TweetCore {
    pub user_results: UserResults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserResults {
    pub result: UserResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserResult {
    pub legacy: LegacyUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyUser {
    pub name: String,
    pub screen_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyTweet {
    pub full_text: String,
    #[serde(default)]
    pub entities: Option<TweetEntities>,
    #[serde(default)]
    pub extended_entities: Option<TweetEntities>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TweetEntities {
    #[serde(default)]
    pub urls: Option<Vec<UrlEntity>>,
    #[serde(default)]
    pub media: Option<Vec<MediaItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UrlEntity {
    pub url: String,
    pub expanded_url: String,
}

/// Long-form post body stored separately from the legacy short text.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteTweet {
    pub note_tweet_results: NoteTweetResults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteTweetResults {
    pub result: NoteTweetRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteTweetRecord {
    pub text: String,
    #[serde(default)]
    pub entity_set: Option<NoteEntitySet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteEntitySet {
    #[serde(default)]
    pub urls: Option<Vec<UrlEntity>>,
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaItem {
    Photo(PhotoMedia),
    Video(VideoMedia),
    AnimatedGif(VideoMedia),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoMedia {
    pub media_url_https: String,
    /// The t.co short link that stands in for this media in the tweet text.
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoMedia {
    pub video_info: VideoInfo,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    pub variants: Vec<VideoVariant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoVariant {
    #[serde(default)]
    pub bitrate: Option<i64>,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Outgoing projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Detail {
    pub user: TweetUser,
    pub text: String,
    pub urls: Option<BTreeMap<String, String>>,
    pub medias: Option<Vec<MediaInfo>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TweetUser {
    pub name: String,
    pub screen_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Video,
    AnimatedGif,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaInfo {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    pub ext: String,
    pub shorten: String,
}
