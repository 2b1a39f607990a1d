use aspxone_compiler_html::ExportOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "aspxone.config.json";

/// ASPxone configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory containing page files
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Where exported documents are written (defaults to the working directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,

    /// Extension of exported documents
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Document title used when a page has none
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_src_dir() -> String {
    ".".to_string()
}

fn default_extension() -> String {
    "cshtml".to_string()
}

fn default_title() -> String {
    ExportOptions::default().title
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    /// Get absolute path to output directory, preferring `flag`
    pub fn get_out_dir(&self, cwd: &str, flag: Option<&str>) -> PathBuf {
        match flag.or(self.out_dir.as_deref()) {
            Some(out) => PathBuf::from(cwd).join(out),
            None => PathBuf::from(cwd),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: None,
            extension: default_extension(),
            title: default_title(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "srcDir": "pages",
            "outDir": "dist",
            "extension": "vbhtml",
            "title": "Intranet"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.src_dir, "pages");
        assert_eq!(config.out_dir, Some("dist".to_string()));
        assert_eq!(config.extension, "vbhtml");
        assert_eq!(config.title, "Intranet");
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.src_dir, ".");
        assert_eq!(config.out_dir, None);
        assert_eq!(config.extension, "cshtml");
        assert_eq!(config.title, "Generated Page");
    }

    #[test]
    fn test_out_dir_flag_wins() {
        let config = Config {
            out_dir: Some("dist".to_string()),
            ..Config::default()
        };

        assert_eq!(config.get_out_dir("/site", None), PathBuf::from("/site/dist"));
        assert_eq!(
            config.get_out_dir("/site", Some("build")),
            PathBuf::from("/site/build")
        );
        assert_eq!(Config::default().get_out_dir("/site", None), PathBuf::from("/site"));
    }
}
