//! arXiv export API client.
//!
//! Endpoint used:
//!   query: http://export.arxiv.org/api/query
//!
//! The response is an Atom feed; each `<entry>` becomes one `PaperRecord`.

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use tracing::{debug, instrument};

use researchiq_common::entities::{PaperSource, NO_ABSTRACT, UNKNOWN_YEAR, UNTITLED};
use researchiq_common::{PaperRecord, ResearchIqError, Result, SandboxClient};
use super::LiteratureSource;

pub const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

const ATOM_NS: &[u8] = b"http://www.w3.org/2005/Atom";

pub struct ArxivClient {
    client: SandboxClient,
    endpoint: String,
}

impl ArxivClient {
    pub fn new(client: SandboxClient) -> Self {
        Self::with_endpoint(client, ARXIV_API_URL)
    }

    /// Point the client at a mirror or a local stand-in for the export API.
    pub fn with_endpoint(client: SandboxClient, endpoint: impl Into<String>) -> Self {
        Self { client, endpoint: endpoint.into() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue the search request and return the raw Atom body.
    #[instrument(skip(self))]
    async fn fetch_feed(&self, query: &str, max_results: usize) -> Result<String> {
        let params = [
            ("search_query", format!("all:{}", query)),
            ("start", "0".to_string()),
            ("max_results", max_results.to_string()),
        ];

        let resp = self.client
            .get(&self.endpoint)?
            .query(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ResearchIqError::Upstream {
                status,
                url: resp.url().to_string(),
            });
        }

        Ok(resp.text().await?)
    }
}

#[async_trait]
impl LiteratureSource for ArxivClient {
    fn name(&self) -> &'static str {
        "arXiv"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<PaperRecord>> {
        let xml = self.fetch_feed(query, max_results).await?;
        let papers = parse_feed(&xml)?;
        debug!(count = papers.len(), "arXiv feed parsed");
        Ok(papers)
    }
}

// ── Feed parsing ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum Field {
    Title,
    Summary,
    Published,
}

#[derive(Default)]
struct RawEntry {
    title: Option<String>,
    summary: Option<String>,
    published: Option<String>,
}

impl RawEntry {
    /// The first matching element wins, even when it holds no text.
    fn set(&mut self, field: Field, text: String) {
        let slot = match field {
            Field::Title     => &mut self.title,
            Field::Summary   => &mut self.summary,
            Field::Published => &mut self.published,
        };
        if slot.is_none() {
            *slot = Some(normalize_newlines(&text));
        }
    }
}

/// Text currently being collected for one entry field. Only the text ahead
/// of the field's first child element counts.
struct OpenField {
    field: Field,
    text: String,
    saw_child: bool,
}

/// Parse a whole Atom feed into records.
///
/// All-or-nothing: malformed markup anywhere in the body fails the parse and
/// no records are returned. Only Atom `entry` elements directly under the
/// root are read, and only Atom `title`, `summary` and `published` directly
/// under an entry.
pub fn parse_feed(xml: &str) -> Result<Vec<PaperRecord>> {
    let mut reader = NsReader::from_str(xml);
    let mut papers = Vec::new();

    let mut depth: usize = 0;
    let mut saw_root = false;
    let mut entry: Option<RawEntry> = None;
    let mut open: Option<OpenField> = None;

    loop {
        match reader.read_resolved_event() {
            Ok((ns, Event::Start(e))) => {
                let is_atom = in_atom_ns(&ns)?;
                if saw_root && depth == 0 {
                    return Err(junk_after_root());
                }
                depth += 1;
                saw_root = true;
                match depth {
                    2 if is_atom && e.local_name().as_ref() == b"entry" => {
                        entry = Some(RawEntry::default());
                    }
                    3 if is_atom && entry.is_some() => {
                        open = field_for(e.local_name().as_ref()).map(|field| OpenField {
                            field,
                            text: String::new(),
                            saw_child: false,
                        });
                    }
                    _ => {
                        if let Some(o) = open.as_mut() {
                            o.saw_child = true;
                        }
                    }
                }
            }
            Ok((ns, Event::Empty(e))) => {
                let is_atom = in_atom_ns(&ns)?;
                if saw_root && depth == 0 {
                    return Err(junk_after_root());
                }
                saw_root = true;
                match depth + 1 {
                    2 if is_atom && e.local_name().as_ref() == b"entry" => {
                        papers.push(normalize(RawEntry::default()));
                    }
                    // `<title/>` is present but holds no text.
                    3 if is_atom => {
                        if let (Some(field), Some(raw)) = (field_for(e.local_name().as_ref()), entry.as_mut()) {
                            raw.set(field, String::new());
                        }
                    }
                    _ => {
                        if let Some(o) = open.as_mut() {
                            o.saw_child = true;
                        }
                    }
                }
            }
            Ok((_, Event::Text(e))) => {
                let text = e.unescape().map_err(|err| ResearchIqError::Xml(err.to_string()))?;
                if depth == 0 && !text.trim().is_empty() {
                    return Err(ResearchIqError::Xml("text outside the document element".to_string()));
                }
                if let Some(o) = open.as_mut().filter(|o| depth == 3 && !o.saw_child) {
                    o.text.push_str(&text);
                }
            }
            Ok((_, Event::CData(e))) => {
                if let Some(o) = open.as_mut().filter(|o| depth == 3 && !o.saw_child) {
                    o.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok((_, Event::End(_))) => {
                match depth {
                    3 => {
                        if let (Some(o), Some(raw)) = (open.take(), entry.as_mut()) {
                            raw.set(o.field, o.text);
                        }
                    }
                    2 => {
                        if let Some(raw) = entry.take() {
                            papers.push(normalize(raw));
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Ok((_, Event::Eof)) => break,
            Err(e) => {
                return Err(ResearchIqError::Xml(format!(
                    "{} (at byte {})",
                    e,
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
    }

    if !saw_root {
        return Err(ResearchIqError::Xml("no element found".to_string()));
    }
    if depth != 0 {
        return Err(ResearchIqError::Xml("unclosed element at end of document".to_string()));
    }

    Ok(papers)
}

/// Whether an element sits in the Atom namespace. Unbound prefixes are
/// a well-formedness error.
fn in_atom_ns(ns: &ResolveResult) -> Result<bool> {
    match ns {
        ResolveResult::Bound(Namespace(n)) => Ok(*n == ATOM_NS),
        ResolveResult::Unbound => Ok(false),
        ResolveResult::Unknown(prefix) => Err(ResearchIqError::Xml(format!(
            "unbound prefix: {}",
            String::from_utf8_lossy(prefix)
        ))),
    }
}

fn junk_after_root() -> ResearchIqError {
    ResearchIqError::Xml("junk after document element".to_string())
}

/// `\r\n` and lone `\r` become `\n`, as any conforming XML parser does.
fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn field_for(local_name: &[u8]) -> Option<Field> {
    match local_name {
        b"title"     => Some(Field::Title),
        b"summary"   => Some(Field::Summary),
        b"published" => Some(Field::Published),
        _ => None,
    }
}

fn normalize(raw: RawEntry) -> PaperRecord {
    PaperRecord::new(
        clean_text(raw.title.as_deref(), UNTITLED),
        clean_text(raw.summary.as_deref(), NO_ABSTRACT),
        year_prefix(raw.published.as_deref()),
        PaperSource::Arxiv,
    )
}

/// Trimmed text with newlines turned into spaces, or the sentinel when
/// nothing is left after trimming.
fn clean_text(raw: Option<&str>, sentinel: &str) -> String {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => text.replace('\n', " "),
        _ => sentinel.to_string(),
    }
}

/// First four characters of the timestamp, unvalidated.
fn year_prefix(raw: Option<&str>) -> String {
    match raw {
        Some(ts) if !ts.is_empty() => ts.chars().take(4).collect(),
        _ => UNKNOWN_YEAR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(entries: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <title type="html">ArXiv Query: search_query=all:ai</title>
  <id>http://arxiv.org/api/abc</id>
  {}
</feed>"#,
            entries
        )
    }

    #[test]
    fn test_parse_full_entry() {
        let xml = feed(
            r#"<entry>
    <id>http://arxiv.org/abs/2301.00001v1</id>
    <published>2023-01-01T00:00:00Z</published>
    <title>Deep Learning
  for Everyone</title>
    <summary>  We study nets.
Twice.  </summary>
    <arxiv:comment>10 pages</arxiv:comment>
  </entry>"#,
        );

        let papers = parse_feed(&xml).unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].title, "Deep Learning   for Everyone");
        assert_eq!(papers[0].abstract_text, "We study nets. Twice.");
        assert_eq!(papers[0].published_year, "2023");
        assert_eq!(papers[0].source, "arxiv");
    }

    #[test]
    fn test_missing_fields_resolve_to_sentinels() {
        let xml = feed("<entry><id>x</id></entry><entry/>");
        let papers = parse_feed(&xml).unwrap();
        assert_eq!(papers.len(), 2);
        for p in &papers {
            assert_eq!(p.title, UNTITLED);
            assert_eq!(p.abstract_text, NO_ABSTRACT);
            assert_eq!(p.published_year, UNKNOWN_YEAR);
        }
    }

    #[test]
    fn test_blank_fields_resolve_to_sentinels() {
        let xml = feed("<entry><title>   </title><summary/><published></published></entry>");
        let papers = parse_feed(&xml).unwrap();
        assert_eq!(papers[0].title, UNTITLED);
        assert_eq!(papers[0].abstract_text, NO_ABSTRACT);
        assert_eq!(papers[0].published_year, UNKNOWN_YEAR);
    }

    #[test]
    fn test_year_is_not_validated() {
        let xml = feed("<entry><published>circa 1999</published></entry><entry><published>20</published></entry>");
        let papers = parse_feed(&xml).unwrap();
        assert_eq!(papers[0].published_year, "circ");
        assert_eq!(papers[1].published_year, "20");
    }

    #[test]
    fn test_feed_title_is_not_an_entry() {
        let papers = parse_feed(&feed("")).unwrap();
        assert!(papers.is_empty());
    }

    #[test]
    fn test_entries_keep_document_order() {
        let xml = feed(
            "<entry><title>A</title><published>2023-01-01T00:00:00Z</published></entry>\
             <entry><title>B</title><published>2022-06-15T00:00:00Z</published></entry>",
        );
        let papers = parse_feed(&xml).unwrap();
        let years: Vec<_> = papers.iter().map(|p| p.published_year.as_str()).collect();
        assert_eq!(years, ["2023", "2022"]);
        assert_eq!(papers[1].title, "B");
    }

    #[test]
    fn test_entities_are_unescaped() {
        let xml = feed("<entry><title>Nets &amp; Trees &lt;2&gt;</title></entry>");
        let papers = parse_feed(&xml).unwrap();
        assert_eq!(papers[0].title, "Nets & Trees <2>");
    }

    #[test]
    fn test_non_atom_elements_ignored() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:x="urn:other">
  <x:entry><title>Foreign</title></x:entry>
  <entry><x:title>Foreign title</x:title><title>Real</title></entry>
</feed>"#;
        let papers = parse_feed(xml).unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].title, "Real");
    }

    #[test]
    fn test_unnamespaced_feed_yields_nothing() {
        let xml = "<feed><entry><title>No namespace</title></entry></feed>";
        assert!(parse_feed(xml).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let xml = feed("<entry><title>Good</title></entry><entry><title>Broken</entry>");
        let err = parse_feed(&xml).unwrap_err();
        assert!(matches!(err, ResearchIqError::Xml(_)));
    }

    #[test]
    fn test_second_root_is_an_error() {
        let xml = format!(
            "{}\n<feed xmlns=\"http://www.w3.org/2005/Atom\"><entry><title>B</title></entry></feed>",
            feed("<entry><title>A</title></entry>")
        );
        let err = parse_feed(&xml).unwrap_err();
        assert!(err.to_string().contains("junk after document element"));
    }

    #[test]
    fn test_undefined_entity_outside_fields_is_an_error() {
        let xml = feed("<entry><id>&bogus;</id><title>A</title></entry>");
        assert!(matches!(parse_feed(&xml), Err(ResearchIqError::Xml(_))));
    }

    #[test]
    fn test_unbound_prefix_is_an_error() {
        let xml = feed("<entry><zz:foo>x</zz:foo><title>A</title></entry>");
        let err = parse_feed(&xml).unwrap_err();
        assert!(err.to_string().contains("unbound prefix"));
    }

    #[test]
    fn test_crlf_line_endings_are_normalized() {
        let xml = feed("<entry><title>Deep\r\nLearning</title><summary>One\rTwo</summary></entry>");
        let papers = parse_feed(&xml).unwrap();
        assert_eq!(papers[0].title, "Deep Learning");
        assert_eq!(papers[0].abstract_text, "One Two");
    }

    #[test]
    fn test_first_field_element_wins_even_when_empty() {
        let xml = feed(
            "<entry><title></title><title>Second</title>\
             <summary/><summary>Later</summary></entry>",
        );
        let papers = parse_feed(&xml).unwrap();
        assert_eq!(papers[0].title, UNTITLED);
        assert_eq!(papers[0].abstract_text, NO_ABSTRACT);
    }

    #[test]
    fn test_truncated_and_empty_bodies_are_errors() {
        assert!(parse_feed(r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry>"#).is_err());
        assert!(parse_feed("").is_err());
        assert!(parse_feed("not xml at all").is_err());
    }
}
