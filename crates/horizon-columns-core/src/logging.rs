//! Logging facilities for Horizon Columns.
//!
//! Horizon Columns uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Every event is emitted under one of the [`targets`], so a directive such
//! as `RUST_LOG=horizon_columns::view=debug` isolates the controller.

/// Span names used throughout Horizon Columns for tracing.
pub mod span_names {
    /// A full reload of the row.
    pub const RELOAD: &str = "horizon_columns::reload";
    /// A render pass reported finished by the host surface.
    pub const RENDER_PASS: &str = "horizon_columns::render_pass";
    /// Signal emission span.
    pub const SIGNAL: &str = "horizon_columns::signal";
}

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_columns_core";
    /// Signal system target.
    pub const SIGNAL: &str = "horizon_columns_core::signal";
    /// Column controller target.
    pub const VIEW: &str = "horizon_columns::view";
    /// Renderer registry target.
    pub const REGISTRY: &str = "horizon_columns::registry";
    /// Headless list surface target.
    pub const SURFACE: &str = "horizon_columns::surface";
    /// Layout engine target.
    pub const LAYOUT: &str = "horizon_columns::layout";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_columns::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time reloads and render passes.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_columns::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        // Just ensure it compiles and doesn't panic
        let _span = PerfSpan::new(span_names::RELOAD);
        tracing::debug!(target: targets::CORE, operation = "test", "inside perf span");
    }

    #[test]
    fn test_targets_are_namespaced() {
        for target in [
            targets::VIEW,
            targets::REGISTRY,
            targets::SURFACE,
            targets::LAYOUT,
            targets::CONFIG,
        ] {
            assert!(target.starts_with("horizon_columns::"));
        }
        assert!(targets::SIGNAL.starts_with(targets::CORE));
    }
}
