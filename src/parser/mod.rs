pub mod dom;

use crate::text::{collapse_whitespace, normalize};
use dom::{HtmlDom, PageDom, TextJoin};

const DESCRIPTION_SELECTOR: &str = "div.video-description";
const VIDEO_SELECTOR: &str = "video";
const TRANSCRIPT_SELECTOR: &str = "div.video-transcript";

/// Fields pulled from one cluster page. `None` means the region was absent
/// or yielded no text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFields {
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub transcript: Option<String>,
}

impl PageFields {
    /// All three fields absent, used when the page could not be fetched.
    pub fn missing() -> Self {
        PageFields::default()
    }
}

/// Parse raw page HTML and pull out description, video source and transcript.
pub fn extract(html: &str) -> PageFields {
    let dom = HtmlDom::parse(html);
    extract_from(&dom)
}

pub fn extract_from(dom: &impl PageDom) -> PageFields {
    let description = dom
        .first_text(DESCRIPTION_SELECTOR, TextJoin::Concat)
        // NFKD can turn NBSP or spacing accents into new spaces, so collapse again
        .map(|t| collapse_whitespace(&normalize(&collapse_whitespace(&t))));

    // src is kept verbatim
    let video_url = dom.first_attr(VIDEO_SELECTOR, "src");

    let transcript = dom
        .first_text(TRANSCRIPT_SELECTOR, TextJoin::Spaced)
        .map(|t| normalize(&t));

    PageFields {
        description: non_empty(description),
        video_url: non_empty(video_url),
        transcript: non_empty(transcript),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
