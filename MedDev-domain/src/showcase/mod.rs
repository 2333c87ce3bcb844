//! SAP / XML showcase
//!
//! Holds the sample HL7 CDA document and turns it into highlighted, escaped
//! HTML for the code block.

/// Sample clinical document shown in the SAP section
pub const SAMPLE_CLINICAL_DOCUMENT: &str = r#"<ClinicalDocument>
  <patient>
    <name>John Doe</name>
    <id>12345</id>
    <dob>1980-01-01</dob>
    <diagnosis>Hypertension</diagnosis>
    <medications>
      <medication>
        <name>Lisinopril</name>
        <dose>10mg</dose>
        <frequency>Once daily</frequency>
      </medication>
    </medications>
  </patient>
  <metadata>
    <author>Dr. Jane Smith</author>
    <date>2025-07-22</date>
    <system>SAP Clinical Module</system>
  </metadata>
</ClinicalDocument>"#;

/// Escape `xml` and wrap attribute values, comments and bare tags in spans
///
/// Passes run in order: escaping, quoted values (`xml-attr`), comments
/// (`xml-comment`), then `<tag>` / `</tag>` tokens without attributes
/// (`xml-tag`). Text inserted by one pass is never matched again by it.
pub fn highlight_xml(xml: &str) -> String {
    if xml.is_empty() {
        return String::new();
    }
    let escaped = escape(xml);
    let with_attrs = wrap_quoted(&escaped);
    let with_comments = wrap_comments(&with_attrs);
    wrap_tags(&with_comments)
}

fn escape(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    for c in xml.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

// "..." on a single line
fn wrap_quoted(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('"') {
        let after = &rest[open + 1..];
        let line_end = after.find('\n').unwrap_or(after.len());
        match after[..line_end].find('"') {
            Some(close) => {
                out.push_str(&rest[..open]);
                out.push_str("<span class=\"xml-attr\">\"");
                out.push_str(&after[..close]);
                out.push_str("\"</span>");
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[..=open]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

const COMMENT_OPEN: &str = "&lt;!--";
const COMMENT_CLOSE: &str = "--&gt;";

fn wrap_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find(COMMENT_OPEN) {
        let body_start = open + COMMENT_OPEN.len();
        match rest[body_start..].find(COMMENT_CLOSE) {
            Some(close) => {
                let end = body_start + close + COMMENT_CLOSE.len();
                out.push_str(&rest[..open]);
                out.push_str("<span class=\"xml-comment\">");
                out.push_str(&rest[open..end]);
                out.push_str("</span>");
                rest = &rest[end..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-')
}

// Length of a `&lt;/?name&gt;` token at the start of `s`, if there is one
fn tag_len(s: &str) -> Option<usize> {
    let after_open = s.strip_prefix("&lt;")?;
    let name = after_open.strip_prefix('/').unwrap_or(after_open);
    let name_len = name.find(|c: char| !is_name_char(c)).unwrap_or(name.len());
    if name_len == 0 || !name[name_len..].starts_with("&gt;") {
        return None;
    }
    Some(s.len() - name.len() + name_len + "&gt;".len())
}

fn wrap_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find("&lt;") {
        out.push_str(&rest[..open]);
        rest = &rest[open..];
        match tag_len(rest) {
            Some(len) => {
                out.push_str("<span class=\"xml-tag\">");
                out.push_str(&rest[..len]);
                out.push_str("</span>");
                rest = &rest[len..];
            }
            None => {
                out.push_str("&lt;");
                rest = &rest["&lt;".len()..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Show/hide state of the sample snippet, visible initially
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlSnippet {
    visible: bool,
}

impl Default for XmlSnippet {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl XmlSnippet {
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn button_label(&self) -> &'static str {
        if self.visible {
            "Hide Sample XML Snippet"
        } else {
            "Show Sample XML Snippet"
        }
    }

    /// Highlighted sample while visible
    pub fn html(&self) -> Option<String> {
        self.visible.then(|| highlight_xml(SAMPLE_CLINICAL_DOCUMENT))
    }
}
