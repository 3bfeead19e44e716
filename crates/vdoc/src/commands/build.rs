//! `vdoc build` command implementation.

use std::path::PathBuf;

use clap::Args;
use tracing::warn;
use vdoc_config::{CliSettings, Config};
use vdoc_pipeline::{BuildTag, Pipeline};
use vdoc_storage::{DocStorage, FsStorage, load_list};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover vdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Build tag selecting the variant to produce (overrides config).
    #[arg(short, long, env = "VDOC_TAG")]
    tag: Option<String>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the transformed tree (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose output (show per-document progress).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any document fails to
    /// transform; the run stops at the first failure.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            tag: self.tag,
            source_dir: self.source_dir,
            output_dir: self.output_dir,
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let tag = BuildTag::new(config.build_resolved.tag.clone());

        // Print startup info
        output.info(&format!("Building variant `{tag}`"));
        output.info(&format!(
            "Source directory: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!(
            "Output directory: {}",
            config.docs_resolved.output_dir.display()
        ));

        let storage = FsStorage::new(
            config.docs_resolved.source_dir.clone(),
            config.docs_resolved.output_dir.clone(),
        );

        let documents = load_list(&storage, &config.docs_resolved.manifest)?;
        if documents.is_empty() {
            return Err(CliError::Validation(format!(
                "Manifest {} lists no documents",
                config.docs_resolved.manifest.display()
            )));
        }

        Pipeline::new(&storage, tag).run(&documents)?;
        output.success(&format!("Transformed {} documents", documents.len()));

        // The copy list is optional; a missing file means no assets.
        if storage.exists(&config.docs_resolved.copy_list) {
            let patterns = load_list(&storage, &config.docs_resolved.copy_list)?;
            let mut copied = 0;
            for pattern in &patterns {
                let count = storage.copy_matching(pattern)?;
                if count == 0 {
                    warn!(pattern = pattern.as_str(), "copy-list pattern matched no files");
                    output.warning(&format!("No files match copy-list pattern `{pattern}`"));
                }
                copied += count;
            }
            output.success(&format!("Copied {copied} assets"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn build_args(config: &Path) -> BuildArgs {
        BuildArgs {
            config: Some(config.to_path_buf()),
            tag: None,
            source_dir: None,
            output_dir: None,
            verbose: false,
        }
    }

    #[test]
    fn test_build_end_to_end() {
        let temp = TempDir::new().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(docs.join("images")).unwrap();
        fs::write(docs.join("docs.list"), "intro.rst\n").unwrap();
        fs::write(
            docs.join("intro.rst"),
            "#ifdef freenas\n%brandplain% intro\n#endif freenas\n",
        )
        .unwrap();
        fs::write(docs.join("assets.list"), "images/*.png\n").unwrap();
        fs::write(docs.join("images/logo.png"), [137u8, 80, 78, 71]).unwrap();
        let config_path = temp.path().join("vdoc.toml");
        fs::write(&config_path, "[build]\ntag = \"freenas\"\n").unwrap();

        build_args(&config_path).execute().unwrap();

        let transformed = fs::read_to_string(temp.path().join("_build/intro.rst")).unwrap();
        assert_eq!(transformed, "FreeNAS intro\n");
        assert!(temp.path().join("_build/images/logo.png").exists());
    }

    #[test]
    fn test_build_fails_without_manifest() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("docs")).unwrap();
        let config_path = temp.path().join("vdoc.toml");
        fs::write(&config_path, "[build]\ntag = \"freenas\"\n").unwrap();

        let err = build_args(&config_path).execute().unwrap_err();
        assert!(matches!(err, CliError::Storage(_)));
    }

    #[test]
    fn test_cli_tag_overrides_config() {
        let temp = TempDir::new().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir(&docs).unwrap();
        fs::write(docs.join("docs.list"), "intro.rst\n").unwrap();
        fs::write(docs.join("intro.rst"), "%brandplain%\n").unwrap();
        let config_path = temp.path().join("vdoc.toml");
        fs::write(&config_path, "[build]\ntag = \"freenas\"\n").unwrap();

        let mut args = build_args(&config_path);
        args.tag = Some("truenas".to_owned());
        args.execute().unwrap();

        let transformed = fs::read_to_string(temp.path().join("_build/intro.rst")).unwrap();
        assert_eq!(transformed, "TrueNAS\n");
    }
}
