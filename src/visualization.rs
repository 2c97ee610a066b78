//! Visualization hook.
//!
//! Planners report their incremental structure (tree edges or roadmap edges)
//! after each mutation through a [`VisualizationHook`]. It is a pure side
//! channel: nothing a sink does can influence the planner's result, and when
//! the hook is disabled no edge lists are built at all.
//!
//! ```rust,ignore
//! use marga_plan::visualization::{EdgeRecorder, VisualizationHook};
//!
//! let mut recorder = EdgeRecorder::new();
//! let mut hook = VisualizationHook::new(true, &mut recorder);
//! let result = planner.plan(&grid, start, goal, &mut rng, &mut hook);
//! println!("{} frames, {} edges in the last one", recorder.frames(), recorder.latest().len());
//! ```

use std::fmt;

use crate::core::Edge;

/// Sink for incremental edge lists, e.g. a renderer.
pub trait EdgeSink {
    /// Receive the full current edge list.
    fn on_edges(&mut self, edges: &[Edge]);
}

impl<F> EdgeSink for F
where
    F: FnMut(&[Edge]),
{
    fn on_edges(&mut self, edges: &[Edge]) {
        self(edges)
    }
}

/// Optional sink plus the animate flag, as handed to a planner.
#[derive(Default)]
pub struct VisualizationHook<'a> {
    sink: Option<&'a mut dyn EdgeSink>,
}

impl<'a> VisualizationHook<'a> {
    /// Hook that is enabled only when `animate` is set.
    pub fn new(animate: bool, sink: &'a mut dyn EdgeSink) -> Self {
        Self {
            sink: if animate { Some(sink) } else { None },
        }
    }

    /// Hook that never calls anything.
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    /// True if emitted edges reach a sink
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Send an edge list to the sink, if any.
    pub fn emit(&mut self, edges: &[Edge]) {
        if let Some(sink) = self.sink.as_mut() {
            sink.on_edges(edges);
        }
    }

    /// Build and send an edge list only when a sink is attached.
    pub fn emit_with<F>(&mut self, build: F)
    where
        F: FnOnce() -> Vec<Edge>,
    {
        if let Some(sink) = self.sink.as_mut() {
            let edges = build();
            sink.on_edges(&edges);
        }
    }
}

impl fmt::Debug for VisualizationHook<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisualizationHook")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// Sink that remembers how many frames it saw and the latest edge list.
#[derive(Clone, Debug, Default)]
pub struct EdgeRecorder {
    frames: usize,
    latest: Vec<Edge>,
    max_edges: usize,
}

impl EdgeRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the sink was invoked
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Edge list from the most recent frame
    pub fn latest(&self) -> &[Edge] {
        &self.latest
    }

    /// Largest edge list seen in any frame
    pub fn max_edges(&self) -> usize {
        self.max_edges
    }

    /// Take the latest edge list, leaving the recorder empty
    pub fn take_latest(&mut self) -> Vec<Edge> {
        std::mem::take(&mut self.latest)
    }
}

impl EdgeSink for EdgeRecorder {
    fn on_edges(&mut self, edges: &[Edge]) {
        self.frames += 1;
        self.max_edges = self.max_edges.max(edges.len());
        self.latest.clear();
        self.latest.extend_from_slice(edges);
    }
}
