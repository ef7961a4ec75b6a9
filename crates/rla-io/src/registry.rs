//! Output format registry.
//!
//! Built-in writers are registered explicitly, gated by cargo features, in
//! [`OutputRegistry::global()`]. Writers are handed out as
//! `Box<dyn ImageOutput>` by format name or by file extension.
//!
//! # Example
//!
//! ```ignore
//! use rla_io::registry::OutputRegistry;
//!
//! let registry = OutputRegistry::global();
//! for name in registry.format_names() {
//!     println!("Format: {}", name);
//! }
//!
//! let mut out = registry.create_for_path("shot_010.0001.rla".as_ref())?;
//! assert_eq!(out.format_name(), "rla");
//! ```

use crate::{FormatCapability, ImageOutput, IoError, IoResult};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// Format information entry in the registry.
#[derive(Clone)]
pub struct FormatInfo {
    /// Short format name (e.g., "rla").
    pub name: &'static str,
    /// One-line description for listings.
    pub description: &'static str,
    /// File extensions without dots.
    pub extensions: &'static [&'static str],
    /// Creates a fresh, unopened writer.
    pub create: fn() -> Box<dyn ImageOutput>,
    /// Capabilities supported by this format.
    pub capabilities: &'static [FormatCapability],
}

impl std::fmt::Debug for FormatInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatInfo")
            .field("name", &self.name)
            .field("extensions", &self.extensions)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

#[cfg(feature = "rla")]
fn create_rla() -> Box<dyn ImageOutput> {
    Box::new(crate::rla::RlaOutput::new())
}

/// Central registry of image writers.
#[derive(Debug, Default)]
pub struct OutputRegistry {
    formats: HashMap<&'static str, FormatInfo>,
    by_extension: HashMap<&'static str, &'static str>,
}

impl OutputRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the global registry instance with built-in formats.
    pub fn global() -> &'static OutputRegistry {
        static INSTANCE: OnceLock<OutputRegistry> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let mut registry = OutputRegistry::new();
            registry.register_builtin_formats();
            registry
        })
    }

    fn register_builtin_formats(&mut self) {
        #[cfg(feature = "rla")]
        self.register(FormatInfo {
            name: "rla",
            description: "Wavefront RLA",
            extensions: &["rla"],
            create: create_rla,
            capabilities: &[],
        });
    }

    /// Registers a format, replacing any previous entry of the same name.
    pub fn register(&mut self, info: FormatInfo) {
        for &ext in info.extensions {
            self.by_extension.insert(ext, info.name);
        }
        self.formats.insert(info.name, info);
    }

    /// Registered format names, sorted.
    pub fn format_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.formats.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Returns format info by name.
    pub fn get(&self, name: &str) -> Option<&FormatInfo> {
        self.formats.get(name.to_lowercase().as_str())
    }

    /// Returns format info by file extension (case-insensitive).
    pub fn get_by_extension(&self, ext: &str) -> Option<&FormatInfo> {
        self.by_extension
            .get(ext.to_lowercase().as_str())
            .and_then(|name| self.formats.get(name))
    }

    /// Checks if an extension is supported.
    pub fn supports_extension(&self, ext: &str) -> bool {
        self.by_extension.contains_key(ext.to_lowercase().as_str())
    }

    /// Creates a writer by format name.
    pub fn create(&self, name: &str) -> IoResult<Box<dyn ImageOutput>> {
        self.get(name)
            .map(|info| (info.create)())
            .ok_or_else(|| IoError::UnsupportedFormat(name.to_string()))
    }

    /// Creates a writer for the extension of `path`.
    pub fn create_for_path(&self, path: &Path) -> IoResult<Box<dyn ImageOutput>> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("unknown");
        self.get_by_extension(ext)
            .map(|info| (info.create)())
            .ok_or_else(|| IoError::UnsupportedFormat(ext.to_string()))
    }
}
