use anyhow::{anyhow, Result};
use aspxone_editor::Page;
use aspxone_model::{BlockId, BlockType, FieldChange};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Page file to edit
    pub page: PathBuf,

    /// Block type (heading, paragraph, row, code-block, ...)
    pub block_type: String,

    /// Container to insert into (defaults to the top level)
    #[arg(short, long)]
    pub parent: Option<String>,

    /// Content text, replacing the type's default
    #[arg(short, long)]
    pub content: Option<String>,
}

pub fn add(args: AddArgs, cwd: &str) -> Result<()> {
    let path = PathBuf::from(cwd).join(&args.page);
    let block_type: BlockType = args.block_type.parse().map_err(|e| {
        let known: Vec<&str> = BlockType::ALL.iter().map(|t| t.as_str()).collect();
        anyhow!("{}. Use one of: {}", e, known.join(", "))
    })?;

    let mut page = Page::load(&path)?;
    let parent = args.parent.map(BlockId::new);
    let mut block = page.insert(block_type, parent.as_ref())?;

    if let Some(content) = args.content {
        block.apply_field(FieldChange::Content(content))?;
        page.update(block.clone())?;
    }

    page.save(&path)?;

    println!(
        "  {} Added {} {} to {}",
        "✓".green(),
        block_type.to_string().bright_white(),
        block.id.to_string().dimmed(),
        args.page.display()
    );

    Ok(())
}
