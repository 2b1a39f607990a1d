//! # Page Mutations
//!
//! Serializable edit operations on a page's block tree.
//!
//! ## Mutation Semantics
//!
//! ### Insert
//! - Builds the block from its type defaults with a fresh id
//! - Appends to the top level, or to a container's children
//!
//! ### Update
//! - Atomic replacement of the block with the same id, at any depth
//! - Position in the tree is preserved
//!
//! ### Remove
//! - Removes the block and all descendants (no orphan promotion)
//!
//! ### Reorder / ReorderChildren
//! - Moves the block at `drag_index` to `hover_index`, shifting the blocks
//!   in between by one
//! - Equal indices are a no-op
//!
//! ### Move
//! - Atomic relocation into another container or the top level
//! - Fails if the target is the block itself or one of its descendants
//!
//! A failed mutation leaves the tree unchanged.

use aspxone_model::{Block, BlockId, BlockType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a default block of `block_type`
    Insert {
        block_type: BlockType,
        parent_id: Option<BlockId>,
    },

    /// Replace the block with the same id
    Update { block: Block },

    /// Remove a block and its subtree
    Remove { block_id: BlockId },

    /// Reorder the top-level list
    Reorder { drag_index: usize, hover_index: usize },

    /// Reorder one container's children
    ReorderChildren {
        container_id: BlockId,
        drag_index: usize,
        hover_index: usize,
    },

    /// Move a block to a new parent (or the top level) at index
    Move {
        block_id: BlockId,
        new_parent_id: Option<BlockId>,
        index: usize,
    },
}

impl Mutation {
    /// Debug name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::Insert { .. } => "insert",
            Mutation::Update { .. } => "update",
            Mutation::Remove { .. } => "remove",
            Mutation::Reorder { .. } => "reorder",
            Mutation::ReorderChildren { .. } => "reorder_children",
            Mutation::Move { .. } => "move",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    NodeNotFound(BlockId),

    #[error("Parent not found: {0}")]
    ParentNotFound(BlockId),

    #[error("Block {0} is not a container")]
    NotAContainer(BlockId),

    #[error("Duplicate block id: {0}")]
    DuplicateId(BlockId),

    #[error("Index {index} out of range for {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Would create cycle")]
    CycleDetected,
}

/// Result of applying a mutation
#[derive(Debug, Clone)]
pub struct MutationResult {
    /// New version number
    pub version: u64,

    /// The inserted, updated or removed block
    pub affected: Option<Block>,
}

pub(crate) fn find_in<'a>(blocks: &'a [Block], id: &BlockId) -> Option<&'a Block> {
    for block in blocks {
        if &block.id == id {
            return Some(block);
        }
        if let Some(found) = find_in(block.children(), id) {
            return Some(found);
        }
    }
    None
}

pub(crate) fn find_in_mut<'a>(blocks: &'a mut [Block], id: &BlockId) -> Option<&'a mut Block> {
    for block in blocks {
        if &block.id == id {
            return Some(block);
        }
        if let Some(children) = block.kind.children_mut() {
            if let Some(found) = find_in_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Remove a block from whichever list holds it and return it
pub(crate) fn remove_from(blocks: &mut Vec<Block>, id: &BlockId) -> Option<Block> {
    if let Some(pos) = blocks.iter().position(|b| &b.id == id) {
        return Some(blocks.remove(pos));
    }

    for block in blocks {
        if let Some(children) = block.kind.children_mut() {
            if let Some(removed) = remove_from(children, id) {
                return Some(removed);
            }
        }
    }

    None
}

/// Move the item at `drag` to `hover`, shifting the items in between
pub(crate) fn move_within<T>(items: &mut Vec<T>, drag: usize, hover: usize) -> Result<(), MutationError> {
    let len = items.len();
    for index in [drag, hover] {
        if index >= len {
            return Err(MutationError::IndexOutOfRange { index, len });
        }
    }

    if drag != hover {
        let item = items.remove(drag);
        items.insert(hover, item);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: &str, block_type: BlockType) -> Block {
        Block::with_defaults(BlockId::new(id), block_type)
    }

    fn tree() -> Vec<Block> {
        let mut row = block("row", BlockType::Row);
        row.kind.children_mut().unwrap().extend([
            block("a", BlockType::Heading),
            block("b", BlockType::Paragraph),
        ]);
        vec![block("top", BlockType::Button), row]
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::Move {
            block_id: BlockId::new("a"),
            new_parent_id: None,
            index: 0,
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_find_at_any_depth() {
        let blocks = tree();

        assert_eq!(find_in(&blocks, &BlockId::new("top")).unwrap().id.as_str(), "top");
        assert_eq!(find_in(&blocks, &BlockId::new("b")).unwrap().id.as_str(), "b");
        assert!(find_in(&blocks, &BlockId::new("missing")).is_none());
    }

    #[test]
    fn test_remove_nested_block() {
        let mut blocks = tree();

        let removed = remove_from(&mut blocks, &BlockId::new("a")).unwrap();

        assert_eq!(removed.id.as_str(), "a");
        assert_eq!(blocks[1].children().len(), 1);
        assert!(remove_from(&mut blocks, &BlockId::new("a")).is_none());
    }

    #[test]
    fn test_move_within_shifts_neighbours() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        move_within(&mut items, 0, 2).unwrap();
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);

        move_within(&mut items, 3, 0).unwrap();
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn test_move_within_rejects_out_of_range() {
        let mut items = vec![1, 2];
        assert_eq!(
            move_within(&mut items, 0, 2),
            Err(MutationError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(items, vec![1, 2]);
    }
}
