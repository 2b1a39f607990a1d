//! Property defaults for newly created blocks.
//!
//! Buttons start filled with contrasting text while plain text blends with
//! the page background.

use crate::block::{
    Appearance, Block, BlockId, BlockKind, BlockType, CodeProps, ContainerProps, HeadingLevel,
    HeadingProps, ImageProps, LinkProps, MediaProps, NavItem, NavbarProps, Playback,
    ScriptingMode, SizeTier, TextProps, TextboxProps, TRANSPARENT,
};
use serde_json::Value;

pub const DEFAULT_CODE_SAMPLE: &str = "// Enter your C# code here\nstring message = \"Hello World\";";
pub const DEFAULT_PAGE_CODE_SAMPLE: &str =
    "// Enter your C# page code here\nstring pageTitle = \"My Page\";";

/// Initial content text for a block type
pub fn default_content(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Heading => "New Heading",
        BlockType::Paragraph => "New paragraph text goes here.",
        BlockType::Link => "New Link",
        BlockType::Button => "New Button",
        BlockType::Image => "Image",
        BlockType::Audio => "Audio Player",
        BlockType::Video => "Video Player",
        BlockType::Textbox => "Text Input",
        BlockType::Navbar => "My Site",
        BlockType::Footer => "© My Website. All rights reserved.",
        BlockType::Row => "Row",
        BlockType::InlineRow => "Inline Row",
        BlockType::CodeBlock => "C# Code Block",
        BlockType::PageCode => "C# Page Code",
    }
}

/// Initial properties for a block type
pub fn defaults_for(block_type: BlockType) -> BlockKind {
    match block_type {
        BlockType::Heading => BlockKind::Heading(HeadingProps {
            level: HeadingLevel::H1,
            size: SizeTier::Xl,
            appearance: Appearance::new(TRANSPARENT, Some("#000000")),
        }),
        BlockType::Paragraph => BlockKind::Paragraph(TextProps {
            size: SizeTier::M,
            appearance: Appearance::new(TRANSPARENT, Some("#000000")),
        }),
        BlockType::Link => BlockKind::Link(LinkProps {
            size: SizeTier::M,
            href: "#".to_string(),
            appearance: Appearance::new(TRANSPARENT, Some("#2563eb")),
        }),
        BlockType::Button => BlockKind::Button(LinkProps {
            size: SizeTier::M,
            href: "#".to_string(),
            appearance: Appearance::new("#2563eb", Some("#ffffff")),
        }),
        BlockType::Image => BlockKind::Image(ImageProps {
            src: String::new(),
            alt: String::new(),
            appearance: Appearance::new(TRANSPARENT, None),
        }),
        BlockType::Audio => BlockKind::Audio(media_defaults()),
        BlockType::Video => BlockKind::Video(media_defaults()),
        BlockType::Textbox => BlockKind::Textbox(TextboxProps {
            size: SizeTier::M,
            placeholder: "Enter text...".to_string(),
            name: String::new(),
            appearance: Appearance::new(TRANSPARENT, Some("#000000")),
        }),
        BlockType::Navbar => BlockKind::Navbar(NavbarProps {
            items: vec![
                NavItem::new("Home", "/"),
                NavItem::new("About", "/about"),
                NavItem::new("Contact", "/contact"),
            ],
            appearance: Appearance::new("#212529", Some("#ffffff")),
        }),
        BlockType::Footer => BlockKind::Footer(TextProps {
            size: SizeTier::S,
            appearance: Appearance::new("#f8f9fa", Some("#6c757d")),
        }),
        BlockType::Row => BlockKind::Row(ContainerProps::default()),
        BlockType::InlineRow => BlockKind::InlineRow(ContainerProps::default()),
        BlockType::CodeBlock => BlockKind::CodeBlock(CodeProps {
            code: DEFAULT_CODE_SAMPLE.to_string(),
            scripting_mode: ScriptingMode::Razor,
            appearance: Appearance::new("#f8f9fa", Some("#212529")),
        }),
        BlockType::PageCode => BlockKind::PageCode(CodeProps {
            code: DEFAULT_PAGE_CODE_SAMPLE.to_string(),
            scripting_mode: ScriptingMode::Razor,
            appearance: Appearance::new("#fff3cd", Some("#856404")),
        }),
    }
}

/// Like [`defaults_for`], but total over arbitrary type names: names outside
/// the block type set resolve to an `Unknown` kind with no properties.
pub fn defaults_for_name(name: &str) -> BlockKind {
    match name.parse::<BlockType>() {
        Ok(block_type) => defaults_for(block_type),
        Err(_) => BlockKind::Unknown {
            type_name: name.to_string(),
            properties: Value::Object(Default::default()),
        },
    }
}

fn media_defaults() -> MediaProps {
    MediaProps {
        src: String::new(),
        playback: Playback::default(),
        appearance: Appearance::new(TRANSPARENT, None),
    }
}

impl Block {
    /// Build a block of `block_type` with its default content and properties
    pub fn with_defaults(id: BlockId, block_type: BlockType) -> Self {
        Block::new(id, default_content(block_type), defaults_for(block_type))
    }
}
