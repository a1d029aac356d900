//! Shared sizing constants.

/// Default cap on an incoming frame's declared payload size.
///
/// The wire format places no upper bound on the size field; left
/// unchecked, a malicious or buggy peer can drive unbounded allocation.
/// Channels apply this cap unless constructed with a different one.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 1024 * 1024;
