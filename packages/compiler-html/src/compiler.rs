use crate::markdown::render_inline;
use aspxone_model::{
    parse_inline_style, Appearance, Block, BlockId, BlockKind, CodeProps, ContainerProps,
    MediaProps, NavbarProps, ScriptingMode, StyleError,
};
use tracing::warn;

/// Indentation unit for generated markup
pub const INDENT: &str = "  ";

/// Indentation applied to each line of embedded Razor / MVC code
const CODE_INDENT: &str = "    ";

/// A custom CSS declaration dropped from the output
#[derive(Debug, Clone, PartialEq)]
pub struct StyleWarning {
    pub block_id: BlockId,
    pub declaration: String,
    pub error: StyleError,
}

/// Non-fatal findings collected while rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    pub style_warnings: Vec<StyleWarning>,
    /// Blocks rendered as an "unknown element type" comment
    pub unknown_blocks: Vec<(BlockId, String)>,
}

impl RenderReport {
    pub fn is_clean(&self) -> bool {
        self.style_warnings.is_empty() && self.unknown_blocks.is_empty()
    }
}

pub(crate) struct Context<'r> {
    depth: usize,
    buffer: String,
    report: &'r mut RenderReport,
}

impl<'r> Context<'r> {
    pub(crate) fn new(depth: usize, report: &'r mut RenderReport) -> Self {
        Self {
            depth,
            buffer: String::new(),
            report,
        }
    }

    pub(crate) fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub(crate) fn add_line(&mut self, text: &str) {
        self.add_indent();
        self.add(text);
        self.add("\n");
    }

    pub(crate) fn blank_line(&mut self) {
        self.add("\n");
    }

    /// Only the first line is indented; the text itself is never touched
    pub(crate) fn add_verbatim(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.add_indent();
        self.add(text);
        if !text.ends_with('\n') {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(INDENT);
        }
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    pub(crate) fn get_output(self) -> String {
        let mut out = self.buffer;
        while out.ends_with('\n') {
            out.pop();
        }
        out
    }
}

/// Render one block (and its descendants) to a markup fragment.
///
/// The fragment starts at `indent_level` and carries no trailing newline.
/// Rendering is pure: the same block always yields the same bytes.
pub fn render_block(block: &Block, indent_level: usize) -> String {
    let mut report = RenderReport::default();
    render_block_with_report(block, indent_level, &mut report)
}

/// [`render_block`], also collecting dropped style declarations and unknown
/// block types into `report`
pub fn render_block_with_report(
    block: &Block,
    indent_level: usize,
    report: &mut RenderReport,
) -> String {
    let mut ctx = Context::new(indent_level, report);
    compile_block(block, &mut ctx);
    ctx.get_output()
}

fn compile_block(block: &Block, ctx: &mut Context) {
    match &block.kind {
        BlockKind::Heading(props) => {
            let tag = props.level.tag();
            let attrs = Attributes::for_block(block, &props.appearance, ctx)
                .class(props.size.bootstrap_class());
            ctx.add_line(&format!(
                "<{tag}{}>{}</{tag}>",
                attrs.render(),
                render_inline(&block.content)
            ));
        }

        BlockKind::Paragraph(props) => {
            let attrs = Attributes::for_block(block, &props.appearance, ctx)
                .class(props.size.bootstrap_class());
            ctx.add_line(&format!(
                "<p{}>{}</p>",
                attrs.render(),
                render_inline(&block.content)
            ));
        }

        BlockKind::Link(props) => {
            let attrs = Attributes::for_block(block, &props.appearance, ctx)
                .attr("href", href_or_hash(&props.href))
                .class(props.size.bootstrap_class());
            ctx.add_line(&format!(
                "<a{}>{}</a>",
                attrs.render(),
                render_inline(&block.content)
            ));
        }

        BlockKind::Button(props) => {
            let attrs = Attributes::for_block(block, &props.appearance, ctx)
                .attr("href", href_or_hash(&props.href))
                .class("btn")
                .class("btn-primary")
                .class(props.size.bootstrap_class());
            ctx.add_line(&format!(
                "<a{}>{}</a>",
                attrs.render(),
                render_inline(&block.content)
            ));
        }

        BlockKind::Footer(props) => {
            let attrs = Attributes::for_block(block, &props.appearance, ctx)
                .class("py-3")
                .class("text-center")
                .class(props.size.bootstrap_class());
            ctx.add_line(&format!(
                "<footer{}>{}</footer>",
                attrs.render(),
                render_inline(&block.content)
            ));
        }

        BlockKind::Image(props) => {
            // Images carry no text, so no `color` declaration
            let attrs = Attributes::from_appearance(block, &props.appearance, false, ctx)
                .attr("src", &props.src)
                .attr("alt", &props.alt)
                .class("img-fluid");
            ctx.add_line(&format!("<img{} />", attrs.render()));
        }

        BlockKind::Audio(props) => compile_media(block, "audio", props, ctx),
        BlockKind::Video(props) => compile_media(block, "video", props, ctx),

        BlockKind::Textbox(props) => {
            let wrapper = Attributes::new()
                .class("mb-3")
                .class(props.size.bootstrap_class())
                .style(presentational_style(&props.appearance, true));
            ctx.add_line(&format!("<div{}>", wrapper.render()));
            ctx.indent();

            let label_for = props
                .appearance
                .element_id()
                .map(|id| format!(" for=\"{}\"", escape_html(id)))
                .unwrap_or_default();
            ctx.add_line(&format!(
                "<label class=\"form-label\"{}>{}</label>",
                label_for,
                render_inline(&block.content)
            ));

            let mut input = Attributes::new().attr("type", "text");
            if let Some(id) = props.appearance.element_id() {
                input = input.attr("id", id);
            }
            if !props.name.is_empty() {
                input = input.attr("name", &props.name);
            }
            let input = input
                .attr("placeholder", &props.placeholder)
                .class("form-control")
                .style(custom_style(block, &props.appearance, ctx));
            ctx.add_line(&format!("<input{} />", input.render()));

            ctx.dedent();
            ctx.add_line("</div>");
        }

        BlockKind::Navbar(props) => compile_navbar(block, props, ctx),

        BlockKind::Row(props) => compile_container(block, props, "row g-3", true, ctx),
        BlockKind::InlineRow(props) => {
            compile_container(block, props, "d-flex flex-wrap gap-3", false, ctx)
        }

        BlockKind::CodeBlock(props) => compile_code(block, props, false, ctx),
        BlockKind::PageCode(props) => compile_code(block, props, true, ctx),

        BlockKind::Unknown { type_name, .. } => {
            warn!(block_id = %block.id, type_name = %type_name, "Unknown block type in export");
            ctx.report
                .unknown_blocks
                .push((block.id.clone(), type_name.clone()));
            ctx.add_line(&format!(
                "<!-- Unknown element type: {} -->",
                comment_safe(type_name)
            ));
        }
    }
}

fn compile_media(block: &Block, tag: &str, props: &MediaProps, ctx: &mut Context) {
    let wrapper = Attributes::new()
        .class("border border-secondary rounded p-3 mb-3")
        .style(presentational_style(&props.appearance, false));
    ctx.add_line(&format!("<div{}>", wrapper.render()));
    ctx.indent();
    ctx.add_line(&format!("<h6>{}</h6>", block.content));

    let mut media = Attributes::new();
    if let Some(id) = props.appearance.element_id() {
        media = media.attr("id", id);
    }
    media = media.attr("src", &props.src);
    for flag in props.playback.attributes() {
        media = media.flag(flag);
    }
    if tag == "video" {
        media = media.class("w-100");
    }
    let media = media.style(custom_style(block, &props.appearance, ctx));

    ctx.add_line(&format!("<{tag}{}>", media.render()));
    ctx.indent();
    ctx.add_line(&format!(
        "Your browser does not support the {tag} element."
    ));
    ctx.dedent();
    ctx.add_line(&format!("</{tag}>"));

    ctx.dedent();
    ctx.add_line("</div>");
}

fn compile_navbar(block: &Block, props: &NavbarProps, ctx: &mut Context) {
    let attrs = Attributes::for_block(block, &props.appearance, ctx)
        .class("navbar")
        .class("navbar-expand-lg");
    ctx.add_line(&format!("<nav{}>", attrs.render()));
    ctx.indent();
    ctx.add_line("<div class=\"container-fluid\">");
    ctx.indent();
    ctx.add_line(&format!(
        "<a class=\"navbar-brand\" href=\"#\">{}</a>",
        render_inline(&block.content)
    ));

    if !props.items.is_empty() {
        ctx.add_line("<ul class=\"navbar-nav\">");
        ctx.indent();
        for item in &props.items {
            let icon = item
                .icon
                .as_deref()
                .filter(|icon| !icon.trim().is_empty())
                .map(|icon| format!("<i class=\"{}\"></i> ", escape_html(icon)))
                .unwrap_or_default();
            ctx.add_line(&format!(
                "<li class=\"nav-item\"><a class=\"nav-link\" href=\"{}\">{}{}</a></li>",
                escape_html(href_or_hash(&item.href)),
                icon,
                item.label
            ));
        }
        ctx.dedent();
        ctx.add_line("</ul>");
    }

    ctx.dedent();
    ctx.add_line("</div>");
    ctx.dedent();
    ctx.add_line("</nav>");
}

/// Rows wrap each child in a Bootstrap column; inline rows lay children out
/// directly in a flex wrapper. Children go through the same `compile_block`
/// as top-level blocks.
fn compile_container(
    block: &Block,
    props: &ContainerProps,
    classes: &str,
    wrap_columns: bool,
    ctx: &mut Context,
) {
    let attrs = Attributes::for_block(block, &props.appearance, ctx).class(classes);
    ctx.add_line(&format!("<div{}>", attrs.render()));
    ctx.indent();

    if props.children.is_empty() {
        ctx.add_line(&format!(
            "<!-- Empty {}: drop elements here to add them -->",
            block.kind.type_name()
        ));
    }

    for child in &props.children {
        if wrap_columns {
            ctx.add_line("<div class=\"col\">");
            ctx.indent();
            compile_block(child, ctx);
            ctx.dedent();
            ctx.add_line("</div>");
        } else {
            compile_block(child, ctx);
        }
    }

    ctx.dedent();
    ctx.add_line("</div>");
}

/// Embedded code is opaque text: wrapped in the dialect's delimiters, never
/// parsed or validated.
fn compile_code(block: &Block, props: &CodeProps, page_level: bool, ctx: &mut Context) {
    let mode = props.scripting_mode;
    ctx.add_line(&format!(
        "<!-- {} ({}) -->",
        comment_safe(&block.content),
        mode.label()
    ));

    let lines: Vec<&str> = props.code.lines().collect();

    match (mode, page_level) {
        (ScriptingMode::Mvc, false) => {
            ctx.add_line(&format!("<% {} %>", lines.join("\n")));
        }
        (ScriptingMode::Mvc, true) => {
            ctx.add_line("<%");
            add_code_lines(&lines, CODE_INDENT, ctx);
            ctx.add_line("%>");
        }
        (ScriptingMode::Razor, _) => {
            ctx.add_line("@{");
            add_code_lines(&lines, CODE_INDENT, ctx);
            ctx.add_line("}");
        }
        (ScriptingMode::PageScript, false) => {
            ctx.add_verbatim(&props.code);
        }
        (ScriptingMode::PageScript, true) => {
            ctx.add_line("<script>");
            ctx.add_verbatim(&props.code);
            ctx.add_line("</script>");
        }
        (ScriptingMode::Plain, _) => {
            let attrs = Attributes::for_block(block, &props.appearance, ctx);
            let escaped = escape_html(&props.code);
            ctx.add_line(&format!("<pre{}><code>{}</code></pre>", attrs.render(), escaped));
        }
    }
}

fn add_code_lines(lines: &[&str], prefix: &str, ctx: &mut Context) {
    for line in lines {
        if line.trim().is_empty() {
            ctx.blank_line();
        } else {
            ctx.add_line(&format!("{prefix}{line}"));
        }
    }
}

/// Attributes of one emitted element. `id` always comes first, then
/// type-specific attributes, then `class`, then `style`.
struct Attributes {
    id: Option<String>,
    attrs: Vec<(String, Option<String>)>,
    classes: Vec<String>,
    style: Option<String>,
}

impl Attributes {
    fn new() -> Self {
        Self {
            id: None,
            attrs: Vec::new(),
            classes: Vec::new(),
            style: None,
        }
    }

    /// Id and full inline style (colors plus custom CSS) from the block's
    /// appearance
    fn for_block(block: &Block, appearance: &Appearance, ctx: &mut Context) -> Self {
        Self::from_appearance(block, appearance, true, ctx)
    }

    fn from_appearance(
        block: &Block,
        appearance: &Appearance,
        include_text: bool,
        ctx: &mut Context,
    ) -> Self {
        let mut attrs = Self::new();
        attrs.id = appearance.element_id().map(str::to_string);
        attrs.style = join_styles(vec![
            presentational_style(appearance, include_text),
            custom_style(block, appearance, ctx),
        ]);
        attrs
    }

    fn attr(mut self, name: &str, value: &str) -> Self {
        if name == "id" {
            self.id = Some(value.to_string());
        } else {
            self.attrs.push((name.to_string(), Some(value.to_string())));
        }
        self
    }

    /// Boolean attribute with no value
    fn flag(mut self, name: &str) -> Self {
        self.attrs.push((name.to_string(), None));
        self
    }

    fn class(mut self, class: &str) -> Self {
        if !class.is_empty() {
            self.classes.push(class.to_string());
        }
        self
    }

    fn style(mut self, style: Option<String>) -> Self {
        self.style = join_styles(vec![self.style.take(), style]);
        self
    }

    fn render(&self) -> String {
        let mut out = String::new();

        if let Some(id) = &self.id {
            out.push_str(&format!(" id=\"{}\"", escape_html(id)));
        }

        for (name, value) in &self.attrs {
            match value {
                Some(value) => out.push_str(&format!(" {}=\"{}\"", name, escape_html(value))),
                None => out.push_str(&format!(" {}", name)),
            }
        }

        if !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", self.classes.join(" ")));
        }

        // Style text is emitted as authored, without escaping
        if let Some(style) = &self.style {
            out.push_str(&format!(" style=\"{}\"", style));
        }

        out
    }
}

/// Background (unless transparent) and optionally text color
fn presentational_style(appearance: &Appearance, include_text: bool) -> Option<String> {
    let mut parts = Vec::new();

    if appearance.has_background() {
        parts.push(format!("background-color: {}", appearance.background_color.trim()));
    }

    if include_text {
        if let Some(color) = appearance.text_color() {
            parts.push(format!("color: {}", color));
        }
    }

    (!parts.is_empty()).then(|| parts.join("; "))
}

/// Accepted custom CSS declarations. Rejected ones are reported and dropped.
fn custom_style(block: &Block, appearance: &Appearance, ctx: &mut Context) -> Option<String> {
    if appearance.custom_css.trim().is_empty() {
        return None;
    }

    let parsed = parse_inline_style(&appearance.custom_css);
    for rejected in parsed.rejected {
        warn!(
            block_id = %block.id,
            declaration = %rejected.text,
            error = %rejected.error,
            "Dropping malformed custom CSS declaration"
        );
        ctx.report.style_warnings.push(StyleWarning {
            block_id: block.id.clone(),
            declaration: rejected.text,
            error: rejected.error,
        });
    }

    (!parsed.declarations.is_empty()).then(|| {
        parsed
            .declarations
            .iter()
            .map(|d| d.to_css())
            .collect::<Vec<_>>()
            .join("; ")
    })
}

fn join_styles(parts: Vec<Option<String>>) -> Option<String> {
    let parts: Vec<String> = parts.into_iter().flatten().collect();
    (!parts.is_empty()).then(|| parts.join("; "))
}

fn href_or_hash(href: &str) -> &str {
    if href.trim().is_empty() {
        "#"
    } else {
        href
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Keep user text from closing an HTML comment early
fn comment_safe(text: &str) -> String {
    text.replace("-->", "--&gt;")
}
