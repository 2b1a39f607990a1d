//! # Field Changes
//!
//! One variant per editable field of the property form. The form calls
//! back with a `FieldChange` on every edit; [`Block::apply_field`] applies it
//! to a copy of the selected block, which is then written back through the
//! store's update operation.

use crate::block::{
    Appearance, Block, BlockKind, HeadingLevel, NavItem, Playback, ScriptingMode, SizeTier,
};
use crate::error::FieldError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldChange {
    Content(String),
    Size(SizeTier),
    Level(HeadingLevel),
    Href(String),
    Src(String),
    Alt(String),
    Placeholder(String),
    Name(String),
    Code(String),
    ScriptingMode(ScriptingMode),
    BackgroundColor(String),
    TextColor(Option<String>),
    ElementId(Option<String>),
    CustomCss(String),
    Controls(bool),
    Autoplay(bool),
    Loop(bool),
    Muted(bool),
    NavItems(Vec<NavItem>),
}

impl FieldChange {
    /// Form field name, as used in the page file
    pub fn name(&self) -> &'static str {
        match self {
            FieldChange::Content(_) => "content",
            FieldChange::Size(_) => "size",
            FieldChange::Level(_) => "level",
            FieldChange::Href(_) => "href",
            FieldChange::Src(_) => "src",
            FieldChange::Alt(_) => "alt",
            FieldChange::Placeholder(_) => "placeholder",
            FieldChange::Name(_) => "name",
            FieldChange::Code(_) => "code",
            FieldChange::ScriptingMode(_) => "scriptingMode",
            FieldChange::BackgroundColor(_) => "backgroundColor",
            FieldChange::TextColor(_) => "textColor",
            FieldChange::ElementId(_) => "elementId",
            FieldChange::CustomCss(_) => "customCss",
            FieldChange::Controls(_) => "controls",
            FieldChange::Autoplay(_) => "autoplay",
            FieldChange::Loop(_) => "loop",
            FieldChange::Muted(_) => "muted",
            FieldChange::NavItems(_) => "items",
        }
    }
}

impl Block {
    /// Apply one form edit. On error the block is left unchanged.
    pub fn apply_field(&mut self, change: FieldChange) -> Result<(), FieldError> {
        let field = change.name();

        match change {
            FieldChange::Content(content) => {
                self.content = content;
                Ok(())
            }

            FieldChange::Size(size) => match &mut self.kind {
                BlockKind::Heading(p) => set(&mut p.size, size),
                BlockKind::Paragraph(p) | BlockKind::Footer(p) => set(&mut p.size, size),
                BlockKind::Link(p) | BlockKind::Button(p) => set(&mut p.size, size),
                BlockKind::Textbox(p) => set(&mut p.size, size),
                other => Err(mismatch(field, other)),
            },

            FieldChange::Level(level) => match &mut self.kind {
                BlockKind::Heading(p) => set(&mut p.level, level),
                other => Err(mismatch(field, other)),
            },

            FieldChange::Href(href) => match &mut self.kind {
                BlockKind::Link(p) | BlockKind::Button(p) => set(&mut p.href, href),
                other => Err(mismatch(field, other)),
            },

            FieldChange::Src(src) => match &mut self.kind {
                BlockKind::Image(p) => set(&mut p.src, src),
                BlockKind::Audio(p) | BlockKind::Video(p) => set(&mut p.src, src),
                other => Err(mismatch(field, other)),
            },

            FieldChange::Alt(alt) => match &mut self.kind {
                BlockKind::Image(p) => set(&mut p.alt, alt),
                other => Err(mismatch(field, other)),
            },

            FieldChange::Placeholder(placeholder) => match &mut self.kind {
                BlockKind::Textbox(p) => set(&mut p.placeholder, placeholder),
                other => Err(mismatch(field, other)),
            },

            FieldChange::Name(name) => match &mut self.kind {
                BlockKind::Textbox(p) => set(&mut p.name, name),
                other => Err(mismatch(field, other)),
            },

            FieldChange::Code(code) => match &mut self.kind {
                BlockKind::CodeBlock(p) | BlockKind::PageCode(p) => set(&mut p.code, code),
                other => Err(mismatch(field, other)),
            },

            FieldChange::ScriptingMode(mode) => match &mut self.kind {
                BlockKind::CodeBlock(p) | BlockKind::PageCode(p) => {
                    set(&mut p.scripting_mode, mode)
                }
                other => Err(mismatch(field, other)),
            },

            FieldChange::Controls(on) => self.with_playback(field, |p| p.controls = on),
            FieldChange::Autoplay(on) => self.with_playback(field, |p| p.autoplay = on),
            FieldChange::Loop(on) => self.with_playback(field, |p| p.looping = on),
            FieldChange::Muted(on) => self.with_playback(field, |p| p.muted = on),

            FieldChange::NavItems(items) => match &mut self.kind {
                BlockKind::Navbar(p) => set(&mut p.items, items),
                other => Err(mismatch(field, other)),
            },

            FieldChange::BackgroundColor(color) => {
                self.with_appearance(field, |a| a.background_color = color)
            }
            FieldChange::TextColor(color) => self.with_appearance(field, |a| a.text_color = color),
            FieldChange::ElementId(id) => self.with_appearance(field, |a| {
                a.element_id = id.filter(|id| !id.trim().is_empty());
            }),
            FieldChange::CustomCss(css) => self.with_appearance(field, |a| a.custom_css = css),
        }
    }

    fn with_appearance(
        &mut self,
        field: &'static str,
        edit: impl FnOnce(&mut Appearance),
    ) -> Result<(), FieldError> {
        let type_name = self.kind.type_name().to_string();
        let appearance = self
            .kind
            .appearance_mut()
            .ok_or_else(|| FieldError::not_applicable(field, type_name))?;
        edit(appearance);
        Ok(())
    }

    fn with_playback(
        &mut self,
        field: &'static str,
        edit: impl FnOnce(&mut Playback),
    ) -> Result<(), FieldError> {
        match &mut self.kind {
            BlockKind::Audio(p) | BlockKind::Video(p) => {
                edit(&mut p.playback);
                Ok(())
            }
            other => Err(mismatch(field, other)),
        }
    }
}

fn mismatch(field: &'static str, kind: &BlockKind) -> FieldError {
    FieldError::not_applicable(field, kind.type_name())
}

fn set<T>(slot: &mut T, value: T) -> Result<(), FieldError> {
    *slot = value;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockId, BlockType};

    fn block(block_type: BlockType) -> Block {
        Block::with_defaults(BlockId::new("b-1"), block_type)
    }

    #[test]
    fn test_content_applies_to_every_type() {
        for block_type in BlockType::ALL {
            let mut b = block(block_type);
            b.apply_field(FieldChange::Content("Changed".to_string())).unwrap();
            assert_eq!(b.content, "Changed");
        }
    }

    #[test]
    fn test_heading_level_change() {
        let mut b = block(BlockType::Heading);
        b.apply_field(FieldChange::Level(HeadingLevel::H3)).unwrap();

        match &b.kind {
            BlockKind::Heading(p) => assert_eq!(p.level, HeadingLevel::H3),
            other => panic!("Expected heading, got {:?}", other),
        }
    }

    #[test]
    fn test_inapplicable_field_leaves_block_unchanged() {
        let mut b = block(BlockType::Paragraph);
        let before = b.clone();

        let err = b
            .apply_field(FieldChange::Src("https://example.com/a.png".to_string()))
            .unwrap_err();

        assert_eq!(err, FieldError::not_applicable("src", "paragraph"));
        assert_eq!(b, before);
    }

    #[test]
    fn test_playback_flags_only_on_media() {
        let mut video = block(BlockType::Video);
        video.apply_field(FieldChange::Autoplay(true)).unwrap();
        video.apply_field(FieldChange::Muted(true)).unwrap();

        match &video.kind {
            BlockKind::Video(p) => {
                assert_eq!(p.playback.attributes(), vec!["controls", "autoplay", "muted"])
            }
            other => panic!("Expected video, got {:?}", other),
        }

        let mut image = block(BlockType::Image);
        assert!(image.apply_field(FieldChange::Loop(true)).is_err());
    }

    #[test]
    fn test_blank_element_id_clears_it() {
        let mut b = block(BlockType::Button);
        b.apply_field(FieldChange::ElementId(Some("cta".to_string()))).unwrap();
        assert_eq!(b.kind.appearance().unwrap().element_id(), Some("cta"));

        b.apply_field(FieldChange::ElementId(Some("  ".to_string()))).unwrap();
        assert_eq!(b.kind.appearance().unwrap().element_id, None);
    }

    #[test]
    fn test_field_change_wire_format() {
        let change: FieldChange =
            serde_json::from_str(r#"{ "field": "scriptingMode", "value": "template-engine-mvc" }"#)
                .unwrap();
        assert_eq!(change, FieldChange::ScriptingMode(ScriptingMode::Mvc));
    }
}
