//! Purchase order service
//!
//! Reads an order file through the filesystem boundary, loads it and renders it.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::report::{render_outline, render_report};
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain;
use crate::infrastructure::traits::FileSystem;

/// Outcome of an eager validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSummary {
    /// Number of line items in the order
    pub items: usize,
}

/// Service for loading and presenting purchase orders.
pub struct OrderService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl OrderService {
    /// Create a new order service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Read and decode the document, enforcing existence and the size limit.
    ///
    /// Undecodable bytes are a malformed document, not an I/O failure.
    pub fn read_source(&self, path: &Path) -> ApplicationResult<String> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::InputNotFound(path.to_path_buf()));
        }

        let size = self
            .fs
            .file_size(path)
            .with_path_context("stat order file", path)?;
        let limit = self.settings.max_input_bytes;
        if size > limit {
            return Err(ApplicationError::InputTooLarge {
                path: path.to_path_buf(),
                size,
                limit,
            });
        }

        debug!("read_source: {} ({} bytes)", path.display(), size);
        let bytes = self
            .fs
            .read(path)
            .with_path_context("read order file", path)?;
        Ok(domain::decode(&bytes)?)
    }

    /// Load the order and render the full report.
    pub fn report(&self, path: &Path) -> ApplicationResult<String> {
        let text = self.read_source(path)?;
        let doc = domain::parse(&text, self.settings.allow_dtd)?;
        let order = domain::load(&doc)?;
        Ok(render_report(&order, &self.settings)?)
    }

    /// Tag-name outline of the document; `depth` defaults to the configured one.
    pub fn outline(&self, path: &Path, depth: Option<usize>) -> ApplicationResult<String> {
        let depth = depth.unwrap_or(self.settings.outline_depth);
        let text = self.read_source(path)?;
        let doc = domain::parse(&text, self.settings.allow_dtd)?;
        Ok(render_outline(doc.root_element(), depth).to_string())
    }

    /// Load the order and read every numeric field up front.
    pub fn check(&self, path: &Path) -> ApplicationResult<CheckSummary> {
        let text = self.read_source(path)?;
        let doc = domain::parse(&text, self.settings.allow_dtd)?;
        let order = domain::load(&doc)?;
        order.validate()?;
        debug!("check: {} ok", path.display());
        Ok(CheckSummary {
            items: order.items.len(),
        })
    }
}
