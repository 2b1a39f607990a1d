use aspxone_compiler_html::{export_document, render_block, ExportOptions};
use aspxone_model::{Block, BlockId, BlockKind, BlockType, FieldChange};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn block(id: &str, block_type: BlockType) -> Block {
    Block::with_defaults(BlockId::new(id), block_type)
}

fn landing_page() -> Vec<Block> {
    let mut hero = block("hero", BlockType::Heading);
    hero.apply_field(FieldChange::Content("Welcome to **ASPxone**".to_string()))
        .unwrap();

    let mut columns = block("columns", BlockType::Row);
    if let BlockKind::Row(props) = &mut columns.kind {
        for i in 0..3 {
            let mut card = block(&format!("card-{}", i), BlockType::InlineRow);
            if let BlockKind::InlineRow(inner) = &mut card.kind {
                inner.children.push(block(&format!("card-{}-title", i), BlockType::Heading));
                inner.children.push(block(&format!("card-{}-text", i), BlockType::Paragraph));
                inner.children.push(block(&format!("card-{}-cta", i), BlockType::Button));
            }
            props.children.push(card);
        }
    }

    vec![
        block("nav", BlockType::Navbar),
        hero,
        columns,
        block("video", BlockType::Video),
        block("init", BlockType::PageCode),
        block("footer", BlockType::Footer),
    ]
}

fn render_single_block(c: &mut Criterion) {
    let mut paragraph = block("p", BlockType::Paragraph);
    paragraph
        .apply_field(FieldChange::Content(
            "Some **bold**, some *italic*, `code` and a [link](/docs)".to_string(),
        ))
        .unwrap();

    c.bench_function("render_single_block", |b| {
        b.iter(|| render_block(black_box(&paragraph), 2))
    });
}

fn render_nested_row(c: &mut Criterion) {
    let page = landing_page();
    let row = &page[2];

    c.bench_function("render_nested_row", |b| {
        b.iter(|| render_block(black_box(row), 2))
    });
}

fn export_landing_page(c: &mut Criterion) {
    let page = landing_page();
    let options = ExportOptions::default();

    c.bench_function("export_landing_page", |b| {
        b.iter(|| export_document(black_box(&page), &options))
    });
}

criterion_group!(
    benches,
    render_single_block,
    render_nested_row,
    export_landing_page
);
criterion_main!(benches);
