use std::cell::OnceCell;

use regex::Regex;

/// Anki field values carry HTML markup; options and prompts are shown as
/// plain text.
pub fn strip_html(text: &str) -> String {
    // OnceCell will only compile the Regex once
    let cell = OnceCell::new();
    let re: &Regex = cell.get_or_init(|| Regex::new(r"<[^>]+>").unwrap());

    re.replace_all(text, "")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Extracts the media filename from an Anki `[sound:...]` tag.
pub fn sound_filename(field: &str) -> Option<String> {
    let cell = OnceCell::new();
    let re: &Regex = cell.get_or_init(|| Regex::new(r"\[sound:([^\]]+)\]").unwrap());

    re.captures(field).map(|captures| captures[1].to_string())
}
