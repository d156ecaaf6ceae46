//! Minimal single-file component scanner.
//!
//! Only the top level of the file is inspected: every element found there is
//! reported as a [`RawBlock`] with its attributes and the byte range of its
//! inner content. Nothing inside a block is interpreted, so the range can be
//! spliced back into the original text untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::ops::Range;

static ATTRIBUTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^\s=/"']+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("attribute regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub tag: String,
    pub attrs: Vec<(String, Option<String>)>,
    /// Byte range of the text between the opening and closing tag.
    pub content: Range<usize>,
    /// Byte range of the whole element, tags included.
    pub element: Range<usize>,
    pub self_closing: bool,
}

impl RawBlock {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_deref().unwrap_or(""))
    }

    pub fn content<'a>(&self, source: &'a str) -> &'a str {
        &source[self.content.clone()]
    }

    /// Only an html `<template>` may nest elements of its own name. Every
    /// other block is raw text up to the first closing tag.
    fn balances_nested(&self) -> bool {
        self.tag == "template" && self.attr("lang").map_or(true, |lang| lang == "html")
    }
}

/// A top-level element whose opening or closing tag never ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnclosedElement {
    pub tag: String,
    pub offset: usize,
}

impl fmt::Display for UnclosedElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> opened at byte {} is never closed", self.tag, self.offset)
    }
}

pub fn parse_blocks(source: &str) -> Result<Vec<RawBlock>, UnclosedElement> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(offset) = source[pos..].find('<') {
        let start = pos + offset;
        let rest = &source[start..];

        if rest.starts_with("<!--") {
            pos = match rest.find("-->") {
                Some(end) => start + end + 3,
                None => source.len(),
            };
            continue;
        }

        let name_end = tag_name_end(source, start + 1);
        if name_end == start + 1 {
            // stray `<`, closing tag or doctype at the top level
            pos = start + 1;
            continue;
        }
        let tag = &source[start + 1..name_end];
        let unclosed = || UnclosedElement {
            tag: tag.to_string(),
            offset: start,
        };

        let open_end = find_tag_end(source, name_end).ok_or_else(unclosed)?;
        let raw_attrs = &source[name_end..open_end];
        let self_closing = raw_attrs.trim_end().ends_with('/');
        let mut block = RawBlock {
            tag: tag.to_string(),
            attrs: parse_attrs(raw_attrs.trim_end().trim_end_matches('/')),
            content: open_end + 1..open_end + 1,
            element: start..open_end + 1,
            self_closing,
        };

        if !self_closing {
            let content_start = open_end + 1;
            let (content_end, close_end) =
                find_close(source, tag, content_start, block.balances_nested())
                    .ok_or_else(unclosed)?;
            block.content = content_start..content_end;
            block.element = start..close_end;
        }

        pos = block.element.end;
        blocks.push(block);
    }

    Ok(blocks)
}

fn tag_name_end(source: &str, from: usize) -> usize {
    source[from..]
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')))
        .map(|(i, _)| from + i)
        .unwrap_or(source.len())
}

/// Index of the `>` closing an opening tag, skipping quoted attribute values.
fn find_tag_end(source: &str, from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, byte) in source.as_bytes()[from..].iter().enumerate() {
        match (quote, *byte) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(*byte),
            (None, b'>') => return Some(from + i),
            _ => {}
        }
    }
    None
}

/// Returns `(content_end, after_close)` for the `</tag>` ending the block.
fn find_close(source: &str, tag: &str, from: usize, nested: bool) -> Option<(usize, usize)> {
    let open = format!("<{tag}");
    let close = format!("</{tag}");
    let mut depth = 1usize;
    let mut pos = from;

    while let Some(offset) = source[pos..].find('<') {
        let at = pos + offset;
        let rest = &source[at..];
        if nested && rest.starts_with("<!--") {
            pos = at + rest.find("-->").map_or(rest.len(), |end| end + 3);
        } else if rest.starts_with(&close) && is_name_boundary(source, at + close.len()) {
            let end = find_tag_end(source, at + close.len())?;
            depth -= 1;
            if depth == 0 {
                return Some((at, end + 1));
            }
            pos = end + 1;
        } else if nested && rest.starts_with(&open) && is_name_boundary(source, at + open.len()) {
            let end = find_tag_end(source, at + open.len())?;
            if !source[at..end].trim_end().ends_with('/') {
                depth += 1;
            }
            pos = end + 1;
        } else {
            pos = at + 1;
        }
    }
    None
}

fn is_name_boundary(source: &str, at: usize) -> bool {
    source[at..]
        .chars()
        .next()
        .is_some_and(|c| c.is_whitespace() || c == '>' || c == '/')
}

fn parse_attrs(raw: &str) -> Vec<(String, Option<String>)> {
    ATTRIBUTE_RE
        .captures_iter(raw)
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string());
            (caps[1].to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const COMPONENT: &str = r#"<template>
  <div>
    <template v-if="ok"><p>{{ $t('hello') }}</p></template>
  </div>
</template>

<!-- <i18n>{"commented": true}</i18n> -->
<i18n locale="en" lang="json">
{"hello": "Hello"}
</i18n>

<script>
export default { name: 'Widget' }
</script>

<i18n lang='yaml'>
ja:
  hello: こんにちは
</i18n>
<docs src="./docs.md" />
"#;

    #[test]
    fn finds_top_level_blocks_in_order() {
        let blocks = parse_blocks(COMPONENT).unwrap();
        let tags: Vec<_> = blocks.iter().map(|b| b.tag.as_str()).collect();
        assert_eq!(tags, vec!["template", "i18n", "script", "i18n", "docs"]);
    }

    #[test]
    fn nested_templates_stay_inside_outer_template() {
        let blocks = parse_blocks(COMPONENT).unwrap();
        let template = blocks[0].content(COMPONENT);
        assert!(template.contains(r#"<template v-if="ok">"#));
        assert!(template.trim_end().ends_with("</div>"));
    }

    #[test]
    fn reads_attributes_and_content() {
        let blocks = parse_blocks(COMPONENT).unwrap();
        let first = &blocks[1];
        assert_eq!(first.attr("locale"), Some("en"));
        assert_eq!(first.attr("lang"), Some("json"));
        assert_eq!(first.content(COMPONENT), "\n{\"hello\": \"Hello\"}\n");

        let second = &blocks[3];
        assert_eq!(second.attr("lang"), Some("yaml"));
        assert_eq!(second.attr("locale"), None);
        assert!(second.content(COMPONENT).contains("こんにちは"));

        let docs = &blocks[4];
        assert_eq!(docs.attr("src"), Some("./docs.md"));
        assert!(docs.content.is_empty());
    }

    #[test]
    fn boolean_and_unquoted_attributes() {
        let source = "<i18n global locale=fr>{}</i18n>";
        let blocks = parse_blocks(source).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].attr("global"), Some(""));
        assert_eq!(blocks[0].attr("locale"), Some("fr"));
        assert_eq!(blocks[0].content(source), "{}");
    }

    #[test]
    fn self_closing_block_records_its_whole_tag() {
        let source = "<template><p/></template>\n<i18n locale=\"en\" src=\"./en.json\" />\n";
        let blocks = parse_blocks(source).unwrap();
        let i18n = &blocks[1];
        assert!(i18n.self_closing);
        assert!(i18n.content.is_empty());
        assert_eq!(
            &source[i18n.element.clone()],
            "<i18n locale=\"en\" src=\"./en.json\" />"
        );
        assert!(!blocks[0].self_closing);
        assert_eq!(&source[blocks[0].element.clone()], "<template><p/></template>");
    }

    #[test]
    fn custom_block_content_is_raw_text() {
        let source = "<i18n locale=\"en\">{\"tip\": \"use <i18n> tags\"}</i18n>\n<i18n locale=\"ja\">{\"tip\": \"x\"}</i18n>";
        let blocks = parse_blocks(source).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].content(source), "{\"tip\": \"use <i18n> tags\"}");
        assert_eq!(blocks[1].attr("locale"), Some("ja"));
    }

    #[test]
    fn commented_tags_inside_template_are_not_counted() {
        let source = "<template><!-- <template> --><p/></template>\n<i18n>{}</i18n>";
        let blocks = parse_blocks(source).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].content(source), "<!-- <template> --><p/>");
    }

    #[test]
    fn unterminated_block_is_an_error() {
        let err = parse_blocks("<template/>\n<i18n>{\"a\": 1}").unwrap_err();
        assert_eq!(
            err,
            UnclosedElement {
                tag: "i18n".to_string(),
                offset: 12,
            }
        );
        assert_eq!(err.to_string(), "<i18n> opened at byte 12 is never closed");
    }
}
