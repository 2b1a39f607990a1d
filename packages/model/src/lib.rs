//! # ASPxone Model
//!
//! Typed block model shared by the editor and the HTML compiler.
//!
//! A page is an ordered forest of [`Block`]s. Each block carries one
//! [`BlockKind`] variant with its own property record, so the set of
//! properties a block can have is fixed by its type. Only the container
//! kinds (`row`, `inline-row`) hold children.

pub mod block;
pub mod defaults;
pub mod error;
pub mod field;
pub mod id_generator;
pub mod style;

pub use block::{
    Appearance, Block, BlockId, BlockKind, BlockType, CodeProps, ContainerProps, HeadingLevel,
    HeadingProps, ImageProps, LinkProps, MediaProps, NavItem, NavbarProps, Playback,
    ScriptingMode, SizeTier, TextProps, TextboxProps,
};
pub use defaults::{default_content, defaults_for, defaults_for_name};
pub use error::{FieldError, ModelError};
pub use field::FieldChange;
pub use id_generator::IdGenerator;
pub use style::{
    parse_inline_style, to_camel_case, to_kebab_case, Declaration, InlineStyle,
    RejectedDeclaration, StyleError,
};
