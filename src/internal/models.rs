use serde::Deserialize;

/// One search hit from the Algolia Hacker News index.
///
/// Identity is `object_id`; a result set never contains two hits with the
/// same id. Values are immutable once received.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Story {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub title: String,
    pub url: String,
    pub author: String,
    pub num_comments: u32,
    pub points: i32,
}

/// Response envelope of the search endpoint. Anything that does not
/// deserialize into this shape is treated as a failed fetch by the caller.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchResponse {
    pub hits: Vec<Story>,
}
