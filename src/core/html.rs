// src/core/html.rs

/// Tags that end a visual line in the marker popup.
const LINE_BREAK_TAGS: &[&str] = &[
    "br", "div", "p", "li", "tr", "table", "ul", "ol", "hr",
    "h1", "h2", "h3", "h4", "h5", "h6",
];

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Lowercased element name of a tag body (`"/div class=x"` → `"div"`).
fn tag_name(tag: &str) -> String {
    let t = tag.trim_start_matches('/').trim_start();
    let end = t.find(|c: char| !c.is_ascii_alphanumeric()).unwrap_or(t.len());
    to_lower(&t[..end])
}

/// Plain text of an HTML fragment.
/// Block tags and `<br>` become line breaks, inline tags vanish, entities are
/// decoded after tags are gone, whitespace is collapsed per line.
pub fn to_text<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tail = &rest[lt..];

        // A lone '<' in text ("a < b") is not a tag
        let opens_tag = tail[1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!');
        if !opens_tag {
            out.push('<');
            rest = &tail[1..];
            continue;
        }

        match tail.find('>') {
            Some(gt) => {
                if LINE_BREAK_TAGS.contains(&tag_name(&tail[1..gt]).as_str()) {
                    out.push('\n');
                }
                rest = &tail[gt + 1..];
            }
            None => {
                // Unterminated tag: drop the remainder
                rest = "";
            }
        }
    }
    out.push_str(rest);

    super::sanitize::normalize_lines(&super::sanitize::decode_entities(&out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_tags_break_lines_inline_tags_vanish() {
        let html = r#"<div class="popup"><b>Level:</b> Town</div><div>Chunks: <span>5</span></div>"#;
        assert_eq!(to_text(html), "Level: Town\nChunks: 5");
    }

    #[test]
    fn br_variants_break_lines() {
        assert_eq!(to_text("a<br>b<BR/>c<br />d"), "a\nb\nc\nd");
    }

    #[test]
    fn entities_decoded_after_tags_removed() {
        // Encoded markup must stay text, not be stripped as a tag
        assert_eq!(to_text("<p>&lt;b&gt;Rock &amp; Stone</p>"), "<b>Rock & Stone");
    }

    #[test]
    fn lone_angle_bracket_is_text() {
        assert_eq!(to_text("1 < 2 <i>ok</i>"), "1 < 2 ok");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(to_text("  Balance:   $1.00  "), "Balance: $1.00");
        assert_eq!(to_text(""), "");
    }

    #[test]
    fn tag_name_handles_closing_and_attrs() {
        assert_eq!(tag_name("/DIV"), "div");
        assert_eq!(tag_name("br/"), "br");
        assert_eq!(tag_name("span style='x'"), "span");
    }
}
