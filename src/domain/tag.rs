use std::{fmt, sync::LazyLock};

use regex::Regex;

/// Suffix character every spoiler tag ends with.
pub const TAG_SUFFIX: char = '雷';

const REPLY_MARKER: &str = "Re:";

// Bracket content that talks about whether spoilers exist rather than
// giving an opinion.
const EXCLUDED_MARKERS: [char; 2] = ['有', '無'];

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[]+)雷\]").expect("tag pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Tag(value.to_string())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Positive,
    Negative,
    Neutral,
    Other,
}

impl Category {
    /// Canonical report order.
    pub const ALL: [Category; 4] = [
        Category::Positive,
        Category::Negative,
        Category::Neutral,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Positive => "好評",
            Category::Negative => "負評",
            Category::Neutral => "普通",
            Category::Other => "其它",
        }
    }

    /// First matching marker wins: 好 > 負 > 普 > anything else.
    pub fn classify(tag: &Tag) -> Category {
        let text = tag.as_str();
        if text.contains('好') {
            Category::Positive
        } else if text.contains('負') {
            Category::Negative
        } else if text.contains('普') {
            Category::Neutral
        } else {
            Category::Other
        }
    }
}

/// Pulls the spoiler tag out of one post title, if it carries one.
///
/// Replies are skipped, only the first `[...雷]` bracket counts, and bracket
/// content mentioning 有/無 is dropped.
pub fn extract_tag(title: &str) -> Option<Tag> {
    if title.contains(REPLY_MARKER) {
        return None;
    }

    let content = TAG_PATTERN.captures(title)?.get(1)?.as_str();
    let excluded = EXCLUDED_MARKERS.iter().any(|marker| content.contains(*marker));
    (!excluded).then(|| Tag(format!("{}{}", content.trim(), TAG_SUFFIX)))
}

#[cfg(test)]
mod tests {
    use super::{extract_tag, Category, Tag};

    #[test]
    fn extract_tag_from_plain_title() {
        assert_eq!(extract_tag("[好雷] 電影很好看"), Some(Tag::from("好雷")));
        assert_eq!(extract_tag("[ 普 雷] 還可以"), Some(Tag::from("普雷")));
        assert_eq!(extract_tag("[超好雷]沙丘二"), Some(Tag::from("超好雷")));
    }

    #[test]
    fn extract_tag_skips_replies() {
        assert_eq!(extract_tag("Re: [好雷] B"), None);
        assert_eq!(extract_tag("Fw: Re: [負雷] 爛片"), None);
    }

    #[test]
    fn extract_tag_rejects_presence_markers() {
        assert_eq!(extract_tag("[有雷] D"), None);
        assert_eq!(extract_tag("[無雷] 心得"), None);
        assert_eq!(extract_tag("[微有雷] 心得"), None);
    }

    #[test]
    fn extract_tag_requires_suffix_bracket() {
        assert_eq!(extract_tag("[新聞] 票房破億"), None);
        assert_eq!(extract_tag("好雷 沒有括號"), None);
        assert_eq!(extract_tag(""), None);
    }

    #[test]
    fn extract_tag_uses_first_matching_bracket() {
        assert_eq!(extract_tag("[問題] [負雷] 結局"), Some(Tag::from("負雷")));
        assert_eq!(extract_tag("[好雷][負雷] 矛盾"), Some(Tag::from("好雷")));
    }

    #[test]
    fn classify_in_priority_order() {
        assert_eq!(Category::classify(&Tag::from("好雷")), Category::Positive);
        assert_eq!(Category::classify(&Tag::from("好負雷")), Category::Positive);
        assert_eq!(Category::classify(&Tag::from("負普雷")), Category::Negative);
        assert_eq!(Category::classify(&Tag::from("普雷")), Category::Neutral);
        assert_eq!(Category::classify(&Tag::from("微雷")), Category::Other);
        assert_eq!(Category::classify(&Tag::from("雷")), Category::Other);
    }
}
