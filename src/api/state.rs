//! Application state for the SRS export API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::export::TimesheetExporter;
use crate::transport::FileTransport;

/// Shared application state.
///
/// Holds the exporter, with its loaded template layout, and the transport
/// workbooks are downloaded from and uploaded to.
#[derive(Clone)]
pub struct AppState {
    exporter: Arc<TimesheetExporter>,
    transport: Arc<dyn FileTransport>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(exporter: TimesheetExporter, transport: Arc<dyn FileTransport>) -> Self {
        Self {
            exporter: Arc::new(exporter),
            transport,
        }
    }

    /// Returns the exporter.
    pub fn exporter(&self) -> &TimesheetExporter {
        &self.exporter
    }

    /// Returns the file transport.
    pub fn transport(&self) -> &dyn FileTransport {
        self.transport.as_ref()
    }
}
