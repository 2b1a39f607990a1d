//! Minimal inline markdown for text-bearing blocks.
//!
//! Each rule is an independent textual substitution applied in order over
//! the output of the previous one. There is no nesting or escaping logic.

use regex::Regex;
use std::sync::LazyLock;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.+?)`").unwrap());
static STRIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~(.+?)~~").unwrap());
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").unwrap());

pub fn render_inline(text: &str) -> String {
    let out = BOLD.replace_all(text, "<strong>${1}</strong>");
    let out = ITALIC.replace_all(&out, "<em>${1}</em>");
    let out = CODE.replace_all(&out, "<code>${1}</code>");
    let out = STRIKE.replace_all(&out, "<del>${1}</del>");
    let out = LINK.replace_all(&out, "<a href=\"${2}\">${1}</a>");
    out.into_owned()
}
