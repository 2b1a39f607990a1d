use super::export::find_page_files;
use crate::config::Config;
use anyhow::Result;
use aspxone_compiler_html::{render_block_with_report, RenderReport};
use aspxone_editor::Page;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct LintArgs {
    /// Page file or directory to lint (defaults to the configured srcDir)
    pub input: Option<PathBuf>,

    /// List clean files too
    #[arg(short, long)]
    pub all: bool,
}

pub fn lint(args: LintArgs, cwd: &str) -> Result<()> {
    let input = match &args.input {
        Some(input) => PathBuf::from(cwd).join(input),
        None => Config::load(cwd)?.get_src_dir(cwd),
    };

    println!("🔍 {} ASPxone Linter", "Starting".green().bold());
    println!("   Input: {}", input.display());
    println!();

    let files = if input.is_file() {
        vec![input.clone()]
    } else if input.is_dir() {
        let files = find_page_files(&input)?;
        println!("   Found {} page files", files.len());
        println!();
        files
    } else {
        return Err(anyhow::anyhow!(
            "Input path does not exist: {}",
            input.display()
        ));
    };

    let mut total_issues = 0;
    for file in &files {
        total_issues += lint_file(file, args.all)?;
    }

    println!();
    println!(
        "✨ {} Linting complete!",
        if total_issues > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Files checked: {}", files.len());

    if total_issues == 0 {
        println!("   {} No issues found!", "✓".green());
    } else {
        println!("   {} {}", "Issues:".red(), total_issues);
        // Exit with error code if there are issues
        std::process::exit(1);
    }

    Ok(())
}

fn lint_file(file_path: &Path, show_clean: bool) -> Result<usize> {
    let page = match Page::load(file_path) {
        Ok(page) => page,
        Err(err) => {
            eprintln!("{} Failed to load {}: {}", "✗".red(), file_path.display(), err);
            return Ok(1);
        }
    };

    let report = lint_page(&page);
    if report.is_clean() {
        if show_clean {
            println!("{} {}", "✓".green(), file_path.display());
        }
        return Ok(0);
    }

    println!("{}", file_path.display());
    for warning in &report.style_warnings {
        println!(
            "  {} [custom-css] {}: '{}' {}",
            "warning".yellow().bold(),
            warning.block_id,
            warning.declaration,
            warning.error
        );
    }
    for (block_id, type_name) in &report.unknown_blocks {
        println!(
            "  {} [unknown-type] {}: '{}' is not a block type",
            "error".red().bold(),
            block_id,
            type_name
        );
    }
    println!();

    Ok(report.style_warnings.len() + report.unknown_blocks.len())
}

/// Render every top-level block, keeping only the findings
fn lint_page(page: &Page) -> RenderReport {
    let mut report = RenderReport::default();
    for block in page.blocks() {
        render_block_with_report(block, 0, &mut report);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_reports_styles_and_unknown_types() {
        let page = Page::from_json(
            r#"{
                "title": "broken",
                "blocks": [
                    { "id": "a", "type": "paragraph", "properties": { "customCss": "color red; margin: 0" } },
                    { "id": "b", "type": "row", "properties": { "children": [
                        { "id": "c", "type": "carousel" }
                    ] } }
                ]
            }"#,
        )
        .unwrap();

        let report = lint_page(&page);

        assert_eq!(report.style_warnings.len(), 1);
        assert_eq!(report.style_warnings[0].declaration, "color red");
        assert_eq!(report.unknown_blocks.len(), 1);
        assert_eq!(report.unknown_blocks[0].1, "carousel");
    }
}
