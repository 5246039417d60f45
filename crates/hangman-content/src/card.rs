//! Placeholder illustrations: a coloured SVG card with the label on it.

/// MIME type of the generated cards.
pub const SVG_MIME_TYPE: &str = "image/svg+xml";

const PALETTE: [&str; 6] = [
    "#f4a261", "#2a9d8f", "#e76f51", "#8ab17d", "#9b5de5", "#00bbf9",
];

/// Renders a 256x256 card showing `label`.
///
/// The background colour depends only on the label, so the same word
/// always gets the same card.
#[must_use]
pub fn render(label: &str) -> String {
    let index = label.bytes().map(usize::from).sum::<usize>() % PALETTE.len();
    let fill = PALETTE[index];
    let text = escape(label.trim());

    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"256\" height=\"256\" viewBox=\"0 0 256 256\">\
<rect width=\"256\" height=\"256\" rx=\"24\" fill=\"{fill}\"/>\
<text x=\"128\" y=\"136\" font-family=\"sans-serif\" font-size=\"28\" text-anchor=\"middle\" fill=\"#ffffff\">{text}</text>\
</svg>"
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
