//! Mutation sequences applied through `Page::apply`, as a remote host would

use aspxone_editor::{Mutation, MutationError, Page};
use aspxone_model::{BlockId, BlockType};

#[test]
fn test_sequence_builds_nested_layout() {
    let mut page = Page::new("landing");

    let row = page
        .apply(Mutation::Insert {
            block_type: BlockType::Row,
            parent_id: None,
        })
        .unwrap()
        .affected
        .unwrap();

    for block_type in [BlockType::Heading, BlockType::Paragraph, BlockType::Button] {
        page.apply(Mutation::Insert {
            block_type,
            parent_id: Some(row.id.clone()),
        })
        .unwrap();
    }

    let result = page
        .apply(Mutation::ReorderChildren {
            container_id: row.id.clone(),
            drag_index: 0,
            hover_index: 2,
        })
        .unwrap();

    assert_eq!(result.version, 5);
    let order: Vec<Option<BlockType>> = page
        .find(&row.id)
        .unwrap()
        .children()
        .iter()
        .map(|b| b.block_type())
        .collect();
    assert_eq!(
        order,
        vec![
            Some(BlockType::Paragraph),
            Some(BlockType::Button),
            Some(BlockType::Heading)
        ]
    );
}

#[test]
fn test_failed_mutation_leaves_page_untouched() {
    let mut page = Page::new("landing");
    let heading = page.insert(BlockType::Heading, None).unwrap();
    let before = page.clone();

    let attempts = vec![
        (
            Mutation::Insert {
                block_type: BlockType::Paragraph,
                parent_id: Some(heading.id.clone()),
            },
            MutationError::NotAContainer(heading.id.clone()),
        ),
        (
            Mutation::Remove {
                block_id: BlockId::new("missing"),
            },
            MutationError::NodeNotFound(BlockId::new("missing")),
        ),
        (
            Mutation::Reorder {
                drag_index: 0,
                hover_index: 1,
            },
            MutationError::IndexOutOfRange { index: 1, len: 1 },
        ),
        (
            Mutation::Move {
                block_id: heading.id.clone(),
                new_parent_id: Some(BlockId::new("missing")),
                index: 0,
            },
            MutationError::ParentNotFound(BlockId::new("missing")),
        ),
    ];

    for (mutation, expected) in attempts {
        let err = page.apply(mutation).unwrap_err();
        assert_eq!(err, expected);
        assert_eq!(page.blocks(), before.blocks());
        assert_eq!(page.version(), before.version());
    }
}

#[test]
fn test_mutations_from_json() {
    let mut page = Page::new("landing");
    let heading = page.insert(BlockType::Heading, None).unwrap();
    page.insert(BlockType::Footer, None).unwrap();

    let json = format!(
        r#"[
            {{ "Reorder": {{ "drag_index": 1, "hover_index": 0 }} }},
            {{ "Remove": {{ "block_id": "{}" }} }}
        ]"#,
        heading.id
    );
    let mutations: Vec<Mutation> = serde_json::from_str(&json).unwrap();

    for mutation in mutations {
        page.apply(mutation).unwrap();
    }

    assert_eq!(page.len(), 1);
    assert_eq!(page.blocks()[0].block_type(), Some(BlockType::Footer));
}
