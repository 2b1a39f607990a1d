use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, Result};
use aspxone_compiler_html::{Artifact, ExportOptions};
use aspxone_editor::Page;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Page file or directory of pages (defaults to the configured srcDir)
    pub path: Option<String>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// File extension of the exported document (overrides config)
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Document title (overrides the page title)
    #[arg(short, long)]
    pub title: Option<String>,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = match &args.path {
        Some(path) => PathBuf::from(cwd).join(path),
        None => config.get_src_dir(cwd),
    };

    let (root, pages) = if input.is_file() {
        let root = input.parent().map(Path::to_path_buf).unwrap_or_default();
        (root, vec![input.clone()])
    } else if input.is_dir() {
        (input.clone(), find_page_files(&input)?)
    } else {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    };

    if pages.is_empty() {
        println!("{}", "⚠️  No page files found".yellow());
        return Ok(());
    }

    if !args.stdout {
        println!("{}", "🔨 Exporting pages...".bright_blue().bold());
    }

    let out_dir = config.get_out_dir(cwd, args.out_dir.as_deref());
    let mut success_count = 0;
    let mut error_count = 0;

    for page_file in &pages {
        let relative_path = page_file.strip_prefix(&root).unwrap_or(page_file);

        match export_file(page_file, &args, &config) {
            Ok(artifact) if args.stdout => {
                success_count += 1;
                print!("{}", artifact.body);
            }
            Ok(artifact) => {
                let output_file = out_dir
                    .join(relative_path)
                    .with_file_name(&artifact.file_name);
                if let Some(parent) = output_file.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&output_file, &artifact.body)?;

                success_count += 1;
                println!(
                    "  {} {} → {}",
                    "✓".green(),
                    relative_path.display(),
                    output_file.display()
                );
                for warning in &artifact.report.style_warnings {
                    println!(
                        "    {} {}: dropped '{}' ({})",
                        "⚠️".yellow(),
                        warning.block_id,
                        warning.declaration,
                        warning.error
                    );
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    if args.stdout {
        return Ok(());
    }

    println!();
    if error_count == 0 {
        println!("{} Exported {} pages successfully", "✅".green(), success_count);
    } else {
        println!(
            "{} Exported {} pages, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }

    Ok(())
}

fn export_file(page_file: &Path, args: &ExportArgs, config: &Config) -> Result<Artifact> {
    let page = Page::load(page_file)?;
    let options = export_options(page_file, &page, args, config);
    Ok(page.export(&options))
}

/// Flags override the page, the page overrides the config
pub(crate) fn export_options(
    page_file: &Path,
    page: &Page,
    args: &ExportArgs,
    config: &Config,
) -> ExportOptions {
    let title = match (&args.title, page.title().trim()) {
        (Some(title), _) => title.clone(),
        (None, "") => config.title.clone(),
        (None, title) => title.to_string(),
    };

    let file_stem = page_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| ExportOptions::default().file_stem);

    ExportOptions {
        title,
        file_stem,
        extension: args
            .extension
            .clone()
            .unwrap_or_else(|| config.extension.clone()),
        generated_at: None,
    }
}

/// Every `*.json` page file under `dir`, skipping the config file
pub(crate) fn find_page_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let is_config = path.file_name().map(|n| n == DEFAULT_CONFIG_NAME).unwrap_or(false);
        if path.is_file() && !is_config && path.extension().map(|e| e == "json").unwrap_or(false) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}
