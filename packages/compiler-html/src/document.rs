//! Document shell around rendered fragments, and the export artifact.

use crate::compiler::{escape_html, render_block_with_report, Context, RenderReport};
use aspxone_model::{Block, SizeTier};
use chrono::{DateTime, Local};
use tracing::info;

pub const GENERATOR: &str = "ASPxone Builder";
pub const CONTENT_TYPE: &str = "text/html";
pub const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css";
pub const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/js/bootstrap.bundle.min.js";

/// Indent level of top-level fragments inside `body > div.container`
pub const FRAGMENT_INDENT: usize = 2;

/// Options for document export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Contents of `<title>`
    pub title: String,
    /// File name without extension
    pub file_stem: String,
    /// File extension. Cosmetic only: the payload is HTML whichever
    /// dialect the embedded code uses.
    pub extension: String,
    /// Timestamp for the generation comment; `None` uses the current time
    pub generated_at: Option<DateTime<Local>>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: "Generated Page".to_string(),
            file_stem: "page".to_string(),
            extension: "cshtml".to_string(),
            generated_at: None,
        }
    }
}

impl ExportOptions {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.file_stem, self.extension.trim_start_matches('.'))
    }

    /// Pin the generation timestamp, making output byte-reproducible
    pub fn generated_at(mut self, at: DateTime<Local>) -> Self {
        self.generated_at = Some(at);
        self
    }
}

/// Exported page, ready to hand to whatever delivers files
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
    pub report: RenderReport,
}

/// Wrap rendered fragments in the full document shell.
///
/// Fragments are separated by a blank line. The assembler knows nothing
/// about blocks beyond the fragment text.
pub fn assemble(fragments: &[String], options: &ExportOptions) -> String {
    let generated_at = options.generated_at.unwrap_or_else(Local::now);
    let mut report = RenderReport::default();
    let mut ctx = Context::new(0, &mut report);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!(
        "<meta name=\"description\" content=\"Generated page from {GENERATOR}\">"
    ));
    ctx.add_line(&format!("<meta name=\"generator\" content=\"{GENERATOR}\">"));
    ctx.add_line(&format!("<title>{}</title>", escape_html(&options.title)));
    ctx.blank_line();

    ctx.add_line("<!-- Bootstrap CSS -->");
    ctx.add_line(&format!("<link href=\"{BOOTSTRAP_CSS}\" rel=\"stylesheet\">"));
    ctx.blank_line();

    ctx.add_line("<!-- Custom Styles -->");
    ctx.add_line("<style>");
    ctx.indent();
    ctx.add_line("body {");
    ctx.indent();
    ctx.add_line(
        "font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",
    );
    ctx.add_line("line-height: 1.6;");
    ctx.dedent();
    ctx.add_line("}");
    ctx.blank_line();
    ctx.add_line(".container {");
    ctx.indent();
    ctx.add_line("max-width: 1200px;");
    ctx.dedent();
    ctx.add_line("}");
    ctx.blank_line();
    ctx.add_line("/* Size utility classes */");
    for tier in SizeTier::ALL {
        let (class, size) = tier.utility_rule();
        ctx.add_line(&format!(".{class} {{ font-size: {size}; }}"));
    }
    ctx.dedent();
    ctx.add_line("</style>");
    ctx.dedent();
    ctx.add_line("</head>");

    ctx.add_line("<body>");
    ctx.indent();
    ctx.add_line(&format!(
        "<!-- Generated by {GENERATOR} on {} at {} -->",
        generated_at.format("%Y-%m-%d"),
        generated_at.format("%H:%M:%S")
    ));
    ctx.blank_line();
    ctx.add_line("<div class=\"container mt-4\">");
    if !fragments.is_empty() {
        let mut body = fragments.join("\n\n");
        body.push('\n');
        ctx.add(&body);
    }
    ctx.add_line("</div>");
    ctx.blank_line();
    ctx.add_line("<!-- Bootstrap JS -->");
    ctx.add_line(&format!("<script src=\"{BOOTSTRAP_JS}\"></script>"));
    ctx.dedent();
    ctx.add_line("</body>");
    ctx.add_line("</html>");

    let mut out = ctx.get_output();
    out.push('\n');
    out
}

/// Render every top-level block in order and assemble the document
pub fn export_document(blocks: &[Block], options: &ExportOptions) -> Artifact {
    let mut report = RenderReport::default();
    let fragments: Vec<String> = blocks
        .iter()
        .map(|block| render_block_with_report(block, FRAGMENT_INDENT, &mut report))
        .collect();

    let body = assemble(&fragments, options);
    let file_name = options.file_name();

    info!(
        blocks = blocks.len(),
        file_name = %file_name,
        bytes = body.len(),
        dropped_styles = report.style_warnings.len(),
        "Exported page"
    );

    Artifact {
        file_name,
        content_type: CONTENT_TYPE,
        body,
        report,
    }
}
