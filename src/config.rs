// src/config.rs

//! Conversion configuration

use std::path::{Path, PathBuf};

/// Name of the SCCS archive directory
pub const SOURCE_DIR: &str = "SCCS";

/// Name of the RCS archive directory
pub const TARGET_DIR: &str = "RCS";

/// Emacs VC mode snapshot table inside the SCCS directory
pub const TAG_TABLE: &str = "VC-names";

/// Where CSSC installs the SCCS tools on Debian-style systems
pub const DEFAULT_TOOL_DIR: &str = "/usr/lib/cssc";

/// Settings for one conversion run
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Directory containing ./SCCS; workfiles and ./RCS are created here
    pub work_dir: PathBuf,
    /// Source archive directory name, relative to `work_dir`
    pub source_dir: String,
    /// Target archive directory name, relative to `work_dir`
    pub target_dir: String,
    /// Tag table file name, relative to the source archive directory
    pub tag_table: String,
    /// Extra directory appended to PATH when looking for SCCS/RCS tools
    pub tool_dir: Option<PathBuf>,
    /// Optional `filename:description` table for initial check-ins
    pub descriptions: Option<PathBuf>,
}

impl ConversionConfig {
    /// Create a config with the standard directory names under `work_dir`
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            source_dir: SOURCE_DIR.to_string(),
            target_dir: TARGET_DIR.to_string(),
            tag_table: TAG_TABLE.to_string(),
            tool_dir: Some(PathBuf::from(DEFAULT_TOOL_DIR)),
            descriptions: None,
        }
    }

    /// Use a description table for initial check-ins
    pub fn with_descriptions(mut self, path: impl Into<PathBuf>) -> Self {
        self.descriptions = Some(path.into());
        self
    }

    /// Override the auxiliary tool directory
    pub fn with_tool_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.tool_dir = dir;
        self
    }

    /// Absolute-or-relative path of the source archive directory
    pub fn source_path(&self) -> PathBuf {
        self.work_dir.join(&self.source_dir)
    }

    /// Path of the target archive directory
    pub fn target_path(&self) -> PathBuf {
        self.work_dir.join(&self.target_dir)
    }

    /// Path of the tag table
    pub fn tag_table_path(&self) -> PathBuf {
        self.source_path().join(&self.tag_table)
    }

    /// Path of a workfile for `stem`
    pub fn workfile(&self, stem: &str) -> PathBuf {
        self.work_dir.join(stem)
    }

    /// SCCS master path relative to `work_dir`, as passed to the tools
    pub fn master(&self, stem: &str) -> PathBuf {
        Path::new(&self.source_dir).join(format!("s.{}", stem))
    }

    /// RCS archive path relative to `work_dir`, as passed to the tools
    pub fn archive(&self, stem: &str) -> PathBuf {
        Path::new(&self.target_dir).join(format!("{},v", stem))
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
