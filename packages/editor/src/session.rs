//! # Edit Session
//!
//! Couples a [`Page`] with the current selection and is the surface the
//! canvas, toolbox and property form call into.
//!
//! Selection is kept by block id, so reordering never changes which block
//! is selected. Stale ids and out-of-range indices coming from the UI are
//! logged and ignored; the page is left as it was.

use crate::{Mutation, MutationResult, Page};
use aspxone_compiler_html::{Artifact, ExportOptions};
use aspxone_model::{Block, BlockId, BlockType, FieldChange};
use tracing::debug;

pub struct EditSession {
    page: Page,
    selected: Option<BlockId>,
}

impl EditSession {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            selected: None,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn selected_id(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    /// The selected block as currently stored in the page
    pub fn selected_block(&self) -> Option<&Block> {
        self.selected.as_ref().and_then(|id| self.page.find(id))
    }

    /// Select a block, or clear the selection with `None`
    pub fn set_selection(&mut self, id: Option<BlockId>) {
        match id {
            Some(id) if !self.page.contains(&id) => {
                debug!(block_id = %id, "Ignoring selection of unknown block");
            }
            id => self.selected = id,
        }
    }

    /// Cancel editing
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Insert a default block and select it
    pub fn add_block(&mut self, block_type: BlockType, parent_id: Option<&BlockId>) -> Option<Block> {
        match self.page.insert(block_type, parent_id) {
            Ok(block) => {
                self.selected = Some(block.id.clone());
                Some(block)
            }
            Err(e) => {
                debug!(block_type = %block_type, error = %e, "Ignoring insert");
                None
            }
        }
    }

    /// Write back an edited block and select it
    pub fn update_block(&mut self, block: Block) -> bool {
        let id = block.id.clone();
        match self.page.update(block) {
            Ok(()) => {
                self.selected = Some(id);
                true
            }
            Err(e) => {
                debug!(block_id = %id, error = %e, "Ignoring update");
                false
            }
        }
    }

    /// Apply one property-form edit to the selected block
    pub fn change_field(&mut self, change: FieldChange) -> bool {
        let Some(mut block) = self.selected_block().cloned() else {
            debug!(field = change.name(), "Ignoring field change with nothing selected");
            return false;
        };

        if let Err(e) = block.apply_field(change) {
            debug!(block_id = %block.id, error = %e, "Ignoring field change");
            return false;
        }

        self.update_block(block)
    }

    /// Remove a block. The selection is cleared whichever block was removed.
    pub fn delete_block(&mut self, id: &BlockId) -> Option<Block> {
        self.selected = None;

        match self.page.remove(id) {
            Ok(block) => Some(block),
            Err(e) => {
                debug!(block_id = %id, error = %e, "Ignoring delete");
                None
            }
        }
    }

    pub fn reorder(&mut self, drag_index: usize, hover_index: usize) -> bool {
        self.page
            .reorder(drag_index, hover_index)
            .map_err(|e| debug!(drag_index, hover_index, error = %e, "Ignoring reorder"))
            .is_ok()
    }

    pub fn reorder_children(
        &mut self,
        container_id: &BlockId,
        drag_index: usize,
        hover_index: usize,
    ) -> bool {
        self.page
            .reorder_children(container_id, drag_index, hover_index)
            .map_err(|e| debug!(container_id = %container_id, error = %e, "Ignoring reorder"))
            .is_ok()
    }

    /// Nest a block into a container, or move it back to the top level
    pub fn move_block(
        &mut self,
        id: &BlockId,
        new_parent_id: Option<&BlockId>,
        index: usize,
    ) -> bool {
        self.page
            .move_block(id, new_parent_id, index)
            .map_err(|e| debug!(block_id = %id, error = %e, "Ignoring move"))
            .is_ok()
    }

    /// Apply a serialized mutation with the same selection rules as the
    /// direct calls
    pub fn apply(&mut self, mutation: Mutation) -> Option<MutationResult> {
        let clears_selection = matches!(mutation, Mutation::Remove { .. });
        let selects = matches!(mutation, Mutation::Insert { .. } | Mutation::Update { .. });
        if clears_selection {
            self.selected = None;
        }

        match self.page.apply(mutation) {
            Ok(result) => {
                if selects {
                    self.selected = result.affected.as_ref().map(|b| b.id.clone());
                }
                Some(result)
            }
            Err(e) => {
                debug!(error = %e, "Ignoring mutation");
                None
            }
        }
    }

    pub fn export(&self, options: &ExportOptions) -> Artifact {
        self.page.export(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let session = EditSession::new(Page::new("index"));

        assert!(session.selected_id().is_none());
        assert!(session.page().is_empty());
    }

    #[test]
    fn test_selection_ignores_unknown_ids() {
        let mut session = EditSession::new(Page::new("index"));
        let block = session.add_block(BlockType::Heading, None).unwrap();

        session.set_selection(Some(BlockId::new("stale")));
        assert_eq!(session.selected_id(), Some(&block.id));

        session.set_selection(None);
        assert!(session.selected_id().is_none());
    }

    #[test]
    fn test_change_field_without_selection() {
        let mut session = EditSession::new(Page::new("index"));
        session.add_block(BlockType::Paragraph, None);
        session.clear_selection();

        assert!(!session.change_field(FieldChange::Content("x".to_string())));
        assert_eq!(session.page().version(), 1);
    }

    #[test]
    fn test_apply_follows_selection_rules() {
        let mut session = EditSession::new(Page::new("index"));

        let result = session
            .apply(Mutation::Insert {
                block_type: BlockType::Image,
                parent_id: None,
            })
            .unwrap();
        let id = result.affected.unwrap().id;
        assert_eq!(session.selected_id(), Some(&id));

        assert!(session
            .apply(Mutation::Remove {
                block_id: BlockId::new("missing"),
            })
            .is_none());
        assert!(session.selected_id().is_none());
    }
}
