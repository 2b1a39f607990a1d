//! # Page Store
//!
//! The ordered, possibly nested forest of blocks that makes up one page.
//!
//! Every operation returns a `Result`; the tree is unchanged whenever an
//! error comes back. Each successful change bumps the page version.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit → Export → Save
//!   ↓      ↓       ↓       ↓
//! JSON Mutations  HTML   JSON
//! ```

use crate::mutations::{find_in, find_in_mut, move_within, remove_from};
use crate::{EditorError, Mutation, MutationError, MutationResult};
use aspxone_compiler_html::{export_document, Artifact, ExportOptions};
use aspxone_model::{Block, BlockId, BlockType, IdGenerator};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Editable page
#[derive(Debug, Clone)]
pub struct Page {
    title: String,
    blocks: Vec<Block>,

    /// Current version number (increments on each mutation)
    version: u64,

    ids: IdGenerator,
}

/// On-disk shape of a page
#[derive(Serialize, Deserialize)]
struct PageFile {
    title: String,
    #[serde(default)]
    blocks: Vec<Block>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            ids: IdGenerator::new(&title),
            title,
            blocks: Vec::new(),
            version: 0,
        }
    }

    /// Build a page from an existing tree. Fails if two blocks anywhere in
    /// the tree share an id.
    pub fn with_blocks(title: impl Into<String>, blocks: Vec<Block>) -> Result<Self, MutationError> {
        let mut seen = HashSet::new();
        for block in blocks.iter().flat_map(Block::descendants) {
            if !seen.insert(&block.id) {
                return Err(MutationError::DuplicateId(block.id.clone()));
            }
        }

        let mut page = Self::new(title);
        page.blocks = blocks;
        Ok(page)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Top-level blocks in order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of blocks, nested ones included
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All blocks depth-first, in document order
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().flat_map(Block::descendants)
    }

    pub fn find(&self, id: &BlockId) -> Option<&Block> {
        find_in(&self.blocks, id)
    }

    pub fn find_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        find_in_mut(&mut self.blocks, id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.find(id).is_some()
    }

    /// Insert a block of `block_type` with its default properties, at the
    /// end of the top level or of `parent_id`'s children
    pub fn insert(
        &mut self,
        block_type: BlockType,
        parent_id: Option<&BlockId>,
    ) -> Result<Block, MutationError> {
        if let Some(parent_id) = parent_id {
            let parent = self
                .find(parent_id)
                .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
            if !parent.is_container() {
                return Err(MutationError::NotAContainer(parent_id.clone()));
            }
        }

        let block = Block::with_defaults(self.next_id(), block_type);

        let siblings = match parent_id {
            Some(parent_id) => self
                .find_mut(parent_id)
                .and_then(|parent| parent.kind.children_mut())
                .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?,
            None => &mut self.blocks,
        };
        siblings.push(block.clone());

        self.bump();
        debug!(block_id = %block.id, block_type = %block_type, "Inserted block");
        Ok(block)
    }

    /// Replace the block with the same id in place, at any depth
    pub fn update(&mut self, block: Block) -> Result<(), MutationError> {
        let current = self
            .find(&block.id)
            .ok_or_else(|| MutationError::NodeNotFound(block.id.clone()))?;

        // Ids the replacement may reuse: the ones it is replacing
        let replaced: HashSet<&BlockId> = current.descendants().into_iter().map(|b| &b.id).collect();
        let taken: HashSet<&BlockId> = self
            .iter()
            .map(|b| &b.id)
            .filter(|id| !replaced.contains(id))
            .collect();

        let mut seen = HashSet::new();
        for incoming in block.descendants() {
            if taken.contains(&incoming.id) || !seen.insert(&incoming.id) {
                return Err(MutationError::DuplicateId(incoming.id.clone()));
            }
        }

        let id = block.id.clone();
        let slot = self
            .find_mut(&id)
            .ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;
        *slot = block;

        self.bump();
        debug!(block_id = %id, "Updated block");
        Ok(())
    }

    /// Remove a block and everything nested inside it
    pub fn remove(&mut self, id: &BlockId) -> Result<Block, MutationError> {
        let removed =
            remove_from(&mut self.blocks, id).ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;

        self.bump();
        debug!(block_id = %id, descendants = removed.descendants().len() - 1, "Removed block");
        Ok(removed)
    }

    /// Move the top-level block at `drag_index` to `hover_index`
    pub fn reorder(&mut self, drag_index: usize, hover_index: usize) -> Result<(), MutationError> {
        move_within(&mut self.blocks, drag_index, hover_index)?;

        if drag_index != hover_index {
            self.bump();
            debug!(drag_index, hover_index, "Reordered blocks");
        }
        Ok(())
    }

    /// Reorder one container's children. The container's new state is
    /// written back through [`Page::update`].
    pub fn reorder_children(
        &mut self,
        container_id: &BlockId,
        drag_index: usize,
        hover_index: usize,
    ) -> Result<(), MutationError> {
        let mut container = self
            .find(container_id)
            .cloned()
            .ok_or_else(|| MutationError::NodeNotFound(container_id.clone()))?;

        let children = container
            .kind
            .children_mut()
            .ok_or_else(|| MutationError::NotAContainer(container_id.clone()))?;
        move_within(children, drag_index, hover_index)?;

        if drag_index == hover_index {
            return Ok(());
        }
        self.update(container)
    }

    /// Detach a block and re-insert it at `index` (clamped) in the top level
    /// or in `new_parent_id`'s children
    pub fn move_block(
        &mut self,
        id: &BlockId,
        new_parent_id: Option<&BlockId>,
        index: usize,
    ) -> Result<(), MutationError> {
        let moving = self
            .find(id)
            .ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;

        if let Some(parent_id) = new_parent_id {
            if moving.descendants().iter().any(|b| &b.id == parent_id) {
                return Err(MutationError::CycleDetected);
            }
            let parent = self
                .find(parent_id)
                .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
            if !parent.is_container() {
                return Err(MutationError::NotAContainer(parent_id.clone()));
            }
        }

        let block =
            remove_from(&mut self.blocks, id).ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;

        let siblings = match new_parent_id {
            Some(parent_id) => self
                .find_mut(parent_id)
                .and_then(|parent| parent.kind.children_mut())
                .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?,
            None => &mut self.blocks,
        };
        let index = index.min(siblings.len());
        siblings.insert(index, block);

        self.bump();
        debug!(block_id = %id, parent = ?new_parent_id, index, "Moved block");
        Ok(())
    }

    /// Apply a serialized mutation
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, MutationError> {
        let name = mutation.name();

        let affected = match mutation {
            Mutation::Insert {
                block_type,
                parent_id,
            } => Some(self.insert(block_type, parent_id.as_ref())?),

            Mutation::Update { block } => {
                let id = block.id.clone();
                self.update(block)?;
                self.find(&id).cloned()
            }

            Mutation::Remove { block_id } => Some(self.remove(&block_id)?),

            Mutation::Reorder {
                drag_index,
                hover_index,
            } => {
                self.reorder(drag_index, hover_index)?;
                None
            }

            Mutation::ReorderChildren {
                container_id,
                drag_index,
                hover_index,
            } => {
                self.reorder_children(&container_id, drag_index, hover_index)?;
                None
            }

            Mutation::Move {
                block_id,
                new_parent_id,
                index,
            } => {
                self.move_block(&block_id, new_parent_id.as_ref(), index)?;
                None
            }
        };

        debug!(mutation = name, version = self.version, "Applied mutation");
        Ok(MutationResult {
            version: self.version,
            affected,
        })
    }

    /// Render the current tree to a full document
    pub fn export(&self, options: &ExportOptions) -> Artifact {
        export_document(&self.blocks, options)
    }

    pub fn from_json(source: &str) -> Result<Self, EditorError> {
        let file: PageFile = serde_json::from_str(source)?;
        Ok(Self::with_blocks(file.title, file.blocks)?)
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        let file = PageFile {
            title: self.title.clone(),
            blocks: self.blocks.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Load a page file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        let mut json = self.to_json()?;
        json.push('\n');
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loaded pages may already contain ids from an earlier session
    fn next_id(&mut self) -> BlockId {
        let Self { ids, blocks, .. } = self;
        ids.next_free(|id| find_in(blocks, id).is_some())
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_empty_page() {
        let page = Page::new("index");

        assert_eq!(page.title(), "index");
        assert_eq!(page.version(), 0);
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
    }

    #[test]
    fn test_version_increments_only_on_success() {
        let mut page = Page::new("index");

        page.insert(BlockType::Heading, None).unwrap();
        assert_eq!(page.version(), 1);

        let missing = BlockId::new("missing");
        assert!(page.remove(&missing).is_err());
        assert!(page.reorder(0, 0).is_ok());
        assert_eq!(page.version(), 1);
    }

    #[test]
    fn test_generated_ids_skip_loaded_ones() {
        let seed = IdGenerator::new("index").next_free(|_| false);
        let taken = Block::with_defaults(seed.clone(), BlockType::Paragraph);
        let mut page = Page::with_blocks("index", vec![taken]).unwrap();

        let block = page.insert(BlockType::Paragraph, None).unwrap();

        assert_ne!(block.id, seed);
        assert_eq!(page.len(), 2);
    }

    #[test]
    fn test_iter_is_document_order() {
        let mut page = Page::new("index");
        let row = page.insert(BlockType::Row, None).unwrap();
        let inner = page.insert(BlockType::Heading, Some(&row.id)).unwrap();
        let last = page.insert(BlockType::Footer, None).unwrap();

        let order: Vec<&BlockId> = page.iter().map(|b| &b.id).collect();

        assert_eq!(order, vec![&row.id, &inner.id, &last.id]);
        assert_eq!(page.len(), 3);
    }

    #[test]
    fn test_update_rejects_duplicate_ids() {
        let mut page = Page::new("index");
        let first = page.insert(BlockType::Heading, None).unwrap();
        let row = page.insert(BlockType::Row, None).unwrap();

        let mut changed = page.find(&row.id).cloned().unwrap();
        changed
            .kind
            .children_mut()
            .unwrap()
            .push(Block::with_defaults(first.id.clone(), BlockType::Paragraph));

        assert_eq!(
            page.update(changed),
            Err(MutationError::DuplicateId(first.id.clone()))
        );
        assert!(page.find(&row.id).unwrap().children().is_empty());
    }

    #[test]
    fn test_update_may_keep_its_own_children() {
        let mut page = Page::new("index");
        let row = page.insert(BlockType::Row, None).unwrap();
        page.insert(BlockType::Heading, Some(&row.id)).unwrap();

        let mut changed = page.find(&row.id).cloned().unwrap();
        changed.content = "Hero".to_string();

        assert!(page.update(changed).is_ok());
        assert_eq!(page.find(&row.id).unwrap().content, "Hero");
        assert_eq!(page.find(&row.id).unwrap().children().len(), 1);
    }

    #[test]
    fn test_json_round_trip_keeps_unknown_blocks() {
        let source = r#"{
            "title": "landing",
            "blocks": [
                { "id": "a", "type": "heading", "content": "Hi", "properties": { "level": "h2" } },
                { "id": "b", "type": "carousel", "content": "", "properties": { "slides": 3 } }
            ]
        }"#;

        let page = Page::from_json(source).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.blocks()[1].kind.type_name(), "carousel");

        let reloaded = Page::from_json(&page.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.blocks(), page.blocks());
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let source = r#"{
            "title": "dupes",
            "blocks": [
                { "id": "a", "type": "paragraph", "content": "one" },
                { "id": "b", "type": "row", "properties": { "children": [
                    { "id": "a", "type": "paragraph", "content": "two" }
                ] } }
            ]
        }"#;

        let result = Page::from_json(source);

        assert!(matches!(
            result,
            Err(EditorError::Mutation(MutationError::DuplicateId(ref id))) if id.as_str() == "a"
        ));
    }

    #[test]
    fn test_with_blocks_rejects_duplicate_top_level_ids() {
        let blocks = vec![
            Block::with_defaults(BlockId::new("a"), BlockType::Paragraph),
            Block::with_defaults(BlockId::new("a"), BlockType::Heading),
        ];

        assert_eq!(
            Page::with_blocks("index", blocks).unwrap_err(),
            MutationError::DuplicateId(BlockId::new("a"))
        );
    }

    #[test]
    fn test_invalid_page_file() {
        let result = Page::from_json("{ \"blocks\": [] }");
        assert!(matches!(result, Err(EditorError::Json(_))));
    }
}
