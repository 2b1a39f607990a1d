use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use aspxone_editor::Page;
use aspxone_model::{BlockType, FieldChange};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

pub const STARTER_PAGE_NAME: &str = "page.json";

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Title of the starter page
    #[arg(short, long, default_value = "Generated Page")]
    pub title: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing ASPxone project...".bright_blue().bold());

    // Create starter page
    let page_path = PathBuf::from(cwd).join(STARTER_PAGE_NAME);
    if !page_path.exists() {
        starter_page(&args.title)?.save(&page_path)?;
        println!("  {} Created {}", "✓".green(), STARTER_PAGE_NAME);
    }

    let config = Config {
        title: args.title.clone(),
        ..Config::default()
    };

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: aspxone add {} paragraph", STARTER_PAGE_NAME);
    println!("  2. Run: aspxone export {}", STARTER_PAGE_NAME);

    Ok(())
}

/// One heading carrying the page title
fn starter_page(title: &str) -> Result<Page> {
    let mut page = Page::new(title);
    let mut heading = page.insert(BlockType::Heading, None)?;
    heading.apply_field(FieldChange::Content(title.to_string()))?;
    page.update(heading)?;
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_page_has_title_heading() {
        let page = starter_page("Welcome").unwrap();

        assert_eq!(page.title(), "Welcome");
        assert_eq!(page.len(), 1);
        assert_eq!(page.blocks()[0].block_type(), Some(BlockType::Heading));
        assert_eq!(page.blocks()[0].content, "Welcome");
    }
}
