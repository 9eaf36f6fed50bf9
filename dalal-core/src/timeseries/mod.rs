/// Raw upstream rows to canonical bars.
pub mod normalize;
/// Request-window normalization and per-step adjustment.
pub mod window;
