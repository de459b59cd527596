use scraper::{Html, Selector};

/// How the text nodes under a matched element are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextJoin {
    /// Text nodes concatenated verbatim.
    Concat,
    /// Each node trimmed, empty nodes dropped, the rest joined by one space.
    Spaced,
}

/// Read-only queries against a parsed page. Extraction only ever needs the
/// first match of a CSS selector.
pub trait PageDom {
    fn first_text(&self, selector: &str, join: TextJoin) -> Option<String>;
    fn first_attr(&self, selector: &str, attr: &str) -> Option<String>;
}

/// `PageDom` backed by the `scraper` crate's html5ever tree.
pub struct HtmlDom {
    document: Html,
}

impl HtmlDom {
    /// Never fails: malformed markup yields whatever tree html5ever recovers.
    pub fn parse(html: &str) -> Self {
        HtmlDom {
            document: Html::parse_document(html),
        }
    }

    fn first(&self, selector: &str) -> Option<scraper::ElementRef<'_>> {
        let selector = Selector::parse(selector).ok()?;
        self.document.select(&selector).next()
    }
}

impl PageDom for HtmlDom {
    fn first_text(&self, selector: &str, join: TextJoin) -> Option<String> {
        let el = self.first(selector)?;
        let text = match join {
            TextJoin::Concat => el.text().collect::<String>(),
            TextJoin::Spaced => el
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        };
        Some(text)
    }

    fn first_attr(&self, selector: &str, attr: &str) -> Option<String> {
        self.first(selector)?.value().attr(attr).map(String::from)
    }
}
