const BOLD_MARKER: &str = "**";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub bold: bool,
}

/// Splits `**bold**` runs out of step content. An unpaired marker stays literal.
pub fn parse_markup(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find(BOLD_MARKER) {
        let inner = &rest[open + BOLD_MARKER.len()..];
        let Some(close) = inner.find(BOLD_MARKER) else {
            break;
        };
        push_span(&mut spans, &rest[..open], false);
        push_span(&mut spans, &inner[..close], true);
        rest = &inner[close + BOLD_MARKER.len()..];
    }
    push_span(&mut spans, rest, false);
    spans
}

fn push_span<'a>(spans: &mut Vec<Span<'a>>, text: &'a str, bold: bool) {
    if !text.is_empty() {
        spans.push(Span { text, bold });
    }
}
