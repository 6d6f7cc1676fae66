use scraper::{ElementRef, Html};

const MAX_LABEL_CHARS: usize = 80;

/// Short human-readable label for an element given its outer HTML: visible
/// text if any, else the tag name, else the raw snippet.
pub fn text_or_tag(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let element = fragment
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .next();

    match element {
        Some(el) => {
            let text: String = el.text().collect::<String>().trim().to_string();
            if text.is_empty() {
                el.value().name().to_string()
            } else {
                truncate(&text)
            }
        }
        None => truncate(html.trim()),
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_LABEL_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX_LABEL_CHARS).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_visible_text() {
        assert_eq!(text_or_tag("<button id=\"go\">Submit</button>"), "Submit");
    }

    #[test]
    fn falls_back_to_tag_name() {
        assert_eq!(text_or_tag("<input type=\"text\">"), "input");
    }

    #[test]
    fn nested_text_is_flattened() {
        assert_eq!(
            text_or_tag("<a href=\"/x\"><span>More</span> information</a>"),
            "More information"
        );
    }

    #[test]
    fn long_text_is_truncated() {
        let html = format!("<p>{}</p>", "x".repeat(200));
        let label = text_or_tag(&html);
        assert_eq!(label.chars().count(), MAX_LABEL_CHARS + 1);
        assert!(label.ends_with('…'));
    }
}
