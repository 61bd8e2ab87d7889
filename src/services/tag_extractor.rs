use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::domain::tag::{extract_tag, Tag};

static POST_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.r-ent").expect("post selector is valid"));
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.title").expect("title selector is valid"));

/// Collects at most one spoiler tag per post entry on a search-result page.
pub fn extract_tags(page: &str) -> Vec<Tag> {
    let html_document = Html::parse_document(page);
    let mut posts = 0;

    let tags: Vec<Tag> = html_document
        .select(&POST_SELECTOR)
        .inspect(|_| posts += 1)
        .filter_map(|post| post.select(&TITLE_SELECTOR).next())
        .filter_map(|title| extract_tag(title.text().collect::<String>().trim()))
        .collect();

    if posts == 0 {
        log::warn!("No post entries found on page");
    } else {
        log::debug!("Found {} tags in {} posts", tags.len(), posts);
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::extract_tags;
    use crate::domain::tag::Tag;

    fn search_page(titles: &[&str]) -> String {
        let entries: String = titles
            .iter()
            .map(|title| {
                format!(
                    r#"<div class="r-ent">
                        <div class="nrec"></div>
                        <div class="title">
                            <a href="/bbs/movie/M.1.A.html">{}</a>
                        </div>
                        <div class="meta"><div class="author">someone</div></div>
                    </div>"#,
                    title
                )
            })
            .collect();

        format!(
            r#"<html><body><div class="r-list-container">{}</div></body></html>"#,
            entries
        )
    }

    #[test]
    fn extract_tags_from_search_page() {
        let page = search_page(&["[好雷] A", "Re: [好雷] B", "[普雷] C", "[有雷] D"]);
        assert_eq!(
            extract_tags(&page),
            vec![Tag::from("好雷"), Tag::from("普雷")]
        );
    }

    #[test]
    fn extract_tags_from_deleted_post() {
        let page = r#"<div class="r-ent"><div class="title">
                (本文已被刪除) [someone]
            </div></div>
            <div class="r-ent"><div class="title"><a>[ 負 雷] 失望</a></div></div>"#;
        assert_eq!(extract_tags(page), vec![Tag::from("負雷")]);
    }

    #[test]
    fn extract_tags_from_unrelated_markup() {
        assert!(extract_tags("<html><body><p>503</p></body></html>").is_empty());
        assert!(extract_tags("").is_empty());
    }
}
