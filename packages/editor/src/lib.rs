//! # ASPxone Editor
//!
//! Page editing engine for the ASPxone builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: blocks, defaults, field changes      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Page store + EditSession            │
//! │  - Load/save page files                     │
//! │  - Apply mutations with validation          │
//! │  - Track the selected block                 │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: blocks → document            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use aspxone_editor::{EditSession, Page};
//! use aspxone_model::{BlockType, FieldChange};
//!
//! let mut session = EditSession::new(Page::load("page.json")?);
//!
//! // Toolbox click: insert and select
//! session.add_block(BlockType::Heading, None);
//!
//! // Property form edit on the selected block
//! session.change_field(FieldChange::Content("Welcome".to_string()));
//!
//! let artifact = session.export(&Default::default());
//! session.page().save("page.json")?;
//! ```

mod errors;
mod mutations;
mod page;
mod session;

pub use errors::EditorError;
pub use mutations::{Mutation, MutationError, MutationResult};
pub use page::Page;
pub use session::EditSession;
