use crate::error::ModelError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Opaque block identifier, unique across the whole page tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Closed set of block types offered by the toolbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Heading,
    Paragraph,
    Link,
    Button,
    Image,
    Audio,
    Video,
    Textbox,
    Navbar,
    Footer,
    Row,
    InlineRow,
    CodeBlock,
    PageCode,
}

impl BlockType {
    pub const ALL: [BlockType; 14] = [
        BlockType::Heading,
        BlockType::Paragraph,
        BlockType::Link,
        BlockType::Button,
        BlockType::Image,
        BlockType::Audio,
        BlockType::Video,
        BlockType::Textbox,
        BlockType::Navbar,
        BlockType::Footer,
        BlockType::Row,
        BlockType::InlineRow,
        BlockType::CodeBlock,
        BlockType::PageCode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Heading => "heading",
            BlockType::Paragraph => "paragraph",
            BlockType::Link => "link",
            BlockType::Button => "button",
            BlockType::Image => "image",
            BlockType::Audio => "audio",
            BlockType::Video => "video",
            BlockType::Textbox => "textbox",
            BlockType::Navbar => "navbar",
            BlockType::Footer => "footer",
            BlockType::Row => "row",
            BlockType::InlineRow => "inline-row",
            BlockType::CodeBlock => "code-block",
            BlockType::PageCode => "page-code",
        }
    }

    /// Container types may hold child blocks
    pub fn is_container(self) -> bool {
        matches!(self, BlockType::Row | BlockType::InlineRow)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "heading" => Ok(BlockType::Heading),
            "paragraph" => Ok(BlockType::Paragraph),
            "link" => Ok(BlockType::Link),
            "button" => Ok(BlockType::Button),
            "image" => Ok(BlockType::Image),
            "audio" => Ok(BlockType::Audio),
            "video" => Ok(BlockType::Video),
            "textbox" => Ok(BlockType::Textbox),
            "navbar" => Ok(BlockType::Navbar),
            "footer" => Ok(BlockType::Footer),
            "row" => Ok(BlockType::Row),
            "inline-row" | "inlinerow" => Ok(BlockType::InlineRow),
            "code-block" | "csharp" => Ok(BlockType::CodeBlock),
            "page-code" | "pagecode" => Ok(BlockType::PageCode),
            _ => Err(ModelError::UnknownBlockType(s.to_string())),
        }
    }
}

/// Display size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SizeTier {
    #[serde(rename = "XS")]
    Xs,
    #[serde(rename = "S")]
    S,
    #[default]
    #[serde(rename = "M")]
    M,
    #[serde(rename = "L")]
    L,
    #[serde(rename = "XL")]
    Xl,
    #[serde(rename = "2XL")]
    Xxl,
    #[serde(rename = "3XL")]
    Xxxl,
}

impl SizeTier {
    pub const ALL: [SizeTier; 7] = [
        SizeTier::Xs,
        SizeTier::S,
        SizeTier::M,
        SizeTier::L,
        SizeTier::Xl,
        SizeTier::Xxl,
        SizeTier::Xxxl,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SizeTier::Xs => "XS",
            SizeTier::S => "S",
            SizeTier::M => "M",
            SizeTier::L => "L",
            SizeTier::Xl => "XL",
            SizeTier::Xxl => "2XL",
            SizeTier::Xxxl => "3XL",
        }
    }

    /// Bootstrap font-size class used on exported elements
    pub fn bootstrap_class(self) -> &'static str {
        match self {
            SizeTier::Xs | SizeTier::S => "fs-6",
            SizeTier::M => "fs-5",
            SizeTier::L => "fs-4",
            SizeTier::Xl => "fs-3",
            SizeTier::Xxl => "fs-2",
            SizeTier::Xxxl => "fs-1",
        }
    }

    /// Utility class name and font size emitted in the document shell
    pub fn utility_rule(self) -> (&'static str, &'static str) {
        match self {
            SizeTier::Xs => ("text-xs", "0.75rem"),
            SizeTier::S => ("text-sm", "0.875rem"),
            SizeTier::M => ("text-base", "1rem"),
            SizeTier::L => ("text-lg", "1.125rem"),
            SizeTier::Xl => ("text-xl", "1.25rem"),
            SizeTier::Xxl => ("text-2xl", "1.5rem"),
            SizeTier::Xxxl => ("text-3xl", "1.875rem"),
        }
    }
}

impl FromStr for SizeTier {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SizeTier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::UnknownSizeTier(s.to_string()))
    }
}

/// Heading level, accepted in either case on input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HeadingLevel {
    #[default]
    #[serde(alias = "h1")]
    H1,
    #[serde(alias = "h2")]
    H2,
    #[serde(alias = "h3")]
    H3,
    #[serde(alias = "h4")]
    H4,
    #[serde(alias = "h5")]
    H5,
    #[serde(alias = "h6")]
    H6,
}

impl HeadingLevel {
    /// Lowercase tag name (`h1`..`h6`)
    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        }
    }
}

impl FromStr for HeadingLevel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h1" => Ok(HeadingLevel::H1),
            "h2" => Ok(HeadingLevel::H2),
            "h3" => Ok(HeadingLevel::H3),
            "h4" => Ok(HeadingLevel::H4),
            "h5" => Ok(HeadingLevel::H5),
            "h6" => Ok(HeadingLevel::H6),
            _ => Err(ModelError::UnknownHeadingLevel(s.to_string())),
        }
    }
}

/// Delimiter convention for embedded server-side code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScriptingMode {
    #[serde(rename = "template-engine-mvc", alias = "mvc")]
    Mvc,
    #[default]
    #[serde(rename = "template-engine-razor", alias = "razor")]
    Razor,
    #[serde(rename = "page-script")]
    PageScript,
    #[serde(rename = "none")]
    Plain,
}

impl ScriptingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ScriptingMode::Mvc => "template-engine-mvc",
            ScriptingMode::Razor => "template-engine-razor",
            ScriptingMode::PageScript => "page-script",
            ScriptingMode::Plain => "none",
        }
    }

    /// Human label surfaced next to exported code
    pub fn label(self) -> &'static str {
        match self {
            ScriptingMode::Mvc => "MVC",
            ScriptingMode::Razor => "Razor",
            ScriptingMode::PageScript => "Page Script",
            ScriptingMode::Plain => "None",
        }
    }
}

impl FromStr for ScriptingMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "template-engine-mvc" | "mvc" => Ok(ScriptingMode::Mvc),
            "template-engine-razor" | "razor" => Ok(ScriptingMode::Razor),
            "page-script" => Ok(ScriptingMode::PageScript),
            "none" => Ok(ScriptingMode::Plain),
            _ => Err(ModelError::UnknownScriptingMode(s.to_string())),
        }
    }
}

/// Presentation properties shared by every block type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Appearance {
    /// `"transparent"` means no background is emitted
    pub background_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    pub custom_css: String,
}

pub const TRANSPARENT: &str = "transparent";

impl Appearance {
    pub fn new(background_color: &str, text_color: Option<&str>) -> Self {
        Self {
            background_color: background_color.to_string(),
            text_color: text_color.map(str::to_string),
            element_id: None,
            custom_css: String::new(),
        }
    }

    pub fn has_background(&self) -> bool {
        let bg = self.background_color.trim();
        !bg.is_empty() && !bg.eq_ignore_ascii_case(TRANSPARENT)
    }

    /// DOM id, ignoring blank values left behind by the editing form
    pub fn element_id(&self) -> Option<&str> {
        self.element_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn text_color(&self) -> Option<&str> {
        self.text_color
            .as_deref()
            .map(str::trim)
            .filter(|color| !color.is_empty())
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self::new(TRANSPARENT, None)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadingProps {
    pub level: HeadingLevel,
    pub size: SizeTier,
    #[serde(flatten)]
    pub appearance: Appearance,
}

/// Paragraph and footer properties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextProps {
    pub size: SizeTier,
    #[serde(flatten)]
    pub appearance: Appearance,
}

/// Link and button properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkProps {
    pub size: SizeTier,
    pub href: String,
    #[serde(flatten)]
    pub appearance: Appearance,
}

impl Default for LinkProps {
    fn default() -> Self {
        Self {
            size: SizeTier::M,
            href: "#".to_string(),
            appearance: Appearance::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    #[serde(flatten)]
    pub appearance: Appearance,
}

/// Boolean playback flags, each emitted only when set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playback {
    pub controls: bool,
    pub autoplay: bool,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub muted: bool,
}

impl Playback {
    /// Attribute names of the flags that are on, in fixed order
    pub fn attributes(&self) -> Vec<&'static str> {
        [
            (self.controls, "controls"),
            (self.autoplay, "autoplay"),
            (self.looping, "loop"),
            (self.muted, "muted"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            controls: true,
            autoplay: false,
            looping: false,
            muted: false,
        }
    }
}

/// Audio and video properties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaProps {
    pub src: String,
    #[serde(flatten)]
    pub playback: Playback,
    #[serde(flatten)]
    pub appearance: Appearance,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextboxProps {
    pub size: SizeTier,
    pub placeholder: String,
    pub name: String,
    #[serde(flatten)]
    pub appearance: Appearance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NavItem {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            icon: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavbarProps {
    pub items: Vec<NavItem>,
    #[serde(flatten)]
    pub appearance: Appearance,
}

/// Row and inline-row properties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerProps {
    pub children: Vec<Block>,
    #[serde(flatten)]
    pub appearance: Appearance,
}

/// Code-block and page-code properties. `code` is opaque text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeProps {
    pub code: String,
    pub scripting_mode: ScriptingMode,
    #[serde(flatten)]
    pub appearance: Appearance,
}

/// Block variant with its typed properties
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Heading(HeadingProps),
    Paragraph(TextProps),
    Link(LinkProps),
    Button(LinkProps),
    Image(ImageProps),
    Audio(MediaProps),
    Video(MediaProps),
    Textbox(TextboxProps),
    Navbar(NavbarProps),
    Footer(TextProps),
    Row(ContainerProps),
    InlineRow(ContainerProps),
    CodeBlock(CodeProps),
    PageCode(CodeProps),

    /// Block loaded from a page file whose type or properties were not
    /// understood. Kept verbatim so saving the page does not lose it.
    Unknown { type_name: String, properties: Value },
}

impl BlockKind {
    pub fn block_type(&self) -> Option<BlockType> {
        Some(match self {
            BlockKind::Heading(_) => BlockType::Heading,
            BlockKind::Paragraph(_) => BlockType::Paragraph,
            BlockKind::Link(_) => BlockType::Link,
            BlockKind::Button(_) => BlockType::Button,
            BlockKind::Image(_) => BlockType::Image,
            BlockKind::Audio(_) => BlockType::Audio,
            BlockKind::Video(_) => BlockType::Video,
            BlockKind::Textbox(_) => BlockType::Textbox,
            BlockKind::Navbar(_) => BlockType::Navbar,
            BlockKind::Footer(_) => BlockType::Footer,
            BlockKind::Row(_) => BlockType::Row,
            BlockKind::InlineRow(_) => BlockType::InlineRow,
            BlockKind::CodeBlock(_) => BlockType::CodeBlock,
            BlockKind::PageCode(_) => BlockType::PageCode,
            BlockKind::Unknown { .. } => return None,
        })
    }

    pub fn type_name(&self) -> &str {
        match self {
            BlockKind::Unknown { type_name, .. } => type_name,
            other => other.block_type().map(BlockType::as_str).unwrap_or_default(),
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, BlockKind::Row(_) | BlockKind::InlineRow(_))
    }

    pub fn appearance(&self) -> Option<&Appearance> {
        match self {
            BlockKind::Heading(p) => Some(&p.appearance),
            BlockKind::Paragraph(p) | BlockKind::Footer(p) => Some(&p.appearance),
            BlockKind::Link(p) | BlockKind::Button(p) => Some(&p.appearance),
            BlockKind::Image(p) => Some(&p.appearance),
            BlockKind::Audio(p) | BlockKind::Video(p) => Some(&p.appearance),
            BlockKind::Textbox(p) => Some(&p.appearance),
            BlockKind::Navbar(p) => Some(&p.appearance),
            BlockKind::Row(p) | BlockKind::InlineRow(p) => Some(&p.appearance),
            BlockKind::CodeBlock(p) | BlockKind::PageCode(p) => Some(&p.appearance),
            BlockKind::Unknown { .. } => None,
        }
    }

    pub fn appearance_mut(&mut self) -> Option<&mut Appearance> {
        match self {
            BlockKind::Heading(p) => Some(&mut p.appearance),
            BlockKind::Paragraph(p) | BlockKind::Footer(p) => Some(&mut p.appearance),
            BlockKind::Link(p) | BlockKind::Button(p) => Some(&mut p.appearance),
            BlockKind::Image(p) => Some(&mut p.appearance),
            BlockKind::Audio(p) | BlockKind::Video(p) => Some(&mut p.appearance),
            BlockKind::Textbox(p) => Some(&mut p.appearance),
            BlockKind::Navbar(p) => Some(&mut p.appearance),
            BlockKind::Row(p) | BlockKind::InlineRow(p) => Some(&mut p.appearance),
            BlockKind::CodeBlock(p) | BlockKind::PageCode(p) => Some(&mut p.appearance),
            BlockKind::Unknown { .. } => None,
        }
    }

    /// Display size, for the types that have one
    pub fn size(&self) -> Option<SizeTier> {
        match self {
            BlockKind::Heading(p) => Some(p.size),
            BlockKind::Paragraph(p) | BlockKind::Footer(p) => Some(p.size),
            BlockKind::Link(p) | BlockKind::Button(p) => Some(p.size),
            BlockKind::Textbox(p) => Some(p.size),
            _ => None,
        }
    }

    pub fn children(&self) -> Option<&[Block]> {
        match self {
            BlockKind::Row(p) | BlockKind::InlineRow(p) => Some(&p.children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Block>> {
        match self {
            BlockKind::Row(p) | BlockKind::InlineRow(p) => Some(&mut p.children),
            _ => None,
        }
    }

    /// Decode a properties object for a known block type
    pub fn from_properties(block_type: BlockType, properties: Value) -> serde_json::Result<Self> {
        let properties = match properties {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        Ok(match block_type {
            BlockType::Heading => BlockKind::Heading(serde_json::from_value(properties)?),
            BlockType::Paragraph => BlockKind::Paragraph(serde_json::from_value(properties)?),
            BlockType::Link => BlockKind::Link(serde_json::from_value(properties)?),
            BlockType::Button => BlockKind::Button(serde_json::from_value(properties)?),
            BlockType::Image => BlockKind::Image(serde_json::from_value(properties)?),
            BlockType::Audio => BlockKind::Audio(serde_json::from_value(properties)?),
            BlockType::Video => BlockKind::Video(serde_json::from_value(properties)?),
            BlockType::Textbox => BlockKind::Textbox(serde_json::from_value(properties)?),
            BlockType::Navbar => BlockKind::Navbar(serde_json::from_value(properties)?),
            BlockType::Footer => BlockKind::Footer(serde_json::from_value(properties)?),
            BlockType::Row => BlockKind::Row(serde_json::from_value(properties)?),
            BlockType::InlineRow => BlockKind::InlineRow(serde_json::from_value(properties)?),
            BlockType::CodeBlock => BlockKind::CodeBlock(serde_json::from_value(properties)?),
            BlockType::PageCode => BlockKind::PageCode(serde_json::from_value(properties)?),
        })
    }
}

/// One placeable unit of page content
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawBlock")]
pub struct Block {
    pub id: BlockId,
    pub content: String,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(id: BlockId, content: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id,
            content: content.into(),
            kind,
        }
    }

    pub fn block_type(&self) -> Option<BlockType> {
        self.kind.block_type()
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn children(&self) -> &[Block] {
        self.kind.children().unwrap_or_default()
    }

    /// This block followed by all of its descendants, depth-first
    pub fn descendants(&self) -> Vec<&Block> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.descendants());
        }
        out
    }
}

/// Page-file shape of a block: `{ id, type, content, properties }`
#[derive(Deserialize)]
struct RawBlock {
    id: BlockId,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    properties: Value,
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        let kind = match raw.type_name.parse::<BlockType>() {
            Ok(block_type) => BlockKind::from_properties(block_type, raw.properties.clone())
                .unwrap_or(BlockKind::Unknown {
                    type_name: raw.type_name,
                    properties: raw.properties,
                }),
            Err(_) => BlockKind::Unknown {
                type_name: raw.type_name,
                properties: raw.properties,
            },
        };

        Block {
            id: raw.id,
            content: raw.content,
            kind,
        }
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Block", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", self.kind.type_name())?;
        state.serialize_field("content", &self.content)?;
        match &self.kind {
            BlockKind::Heading(p) => state.serialize_field("properties", p)?,
            BlockKind::Paragraph(p) | BlockKind::Footer(p) => {
                state.serialize_field("properties", p)?
            }
            BlockKind::Link(p) | BlockKind::Button(p) => state.serialize_field("properties", p)?,
            BlockKind::Image(p) => state.serialize_field("properties", p)?,
            BlockKind::Audio(p) | BlockKind::Video(p) => state.serialize_field("properties", p)?,
            BlockKind::Textbox(p) => state.serialize_field("properties", p)?,
            BlockKind::Navbar(p) => state.serialize_field("properties", p)?,
            BlockKind::Row(p) | BlockKind::InlineRow(p) => state.serialize_field("properties", p)?,
            BlockKind::CodeBlock(p) | BlockKind::PageCode(p) => {
                state.serialize_field("properties", p)?
            }
            BlockKind::Unknown { properties, .. } => {
                state.serialize_field("properties", properties)?
            }
        }
        state.end()
    }
}
