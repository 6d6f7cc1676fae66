use crate::stats::StatsAction;

/// Capability contract for a pluggable usage counter.
///
/// A plugin owns one counter gated by its own enabled flag and filters on the
/// action kinds it cares about. All methods take `&self`: implementations keep
/// their state in atomics so plugins can be shared across tasks without locks.
pub trait StatsPlugin: Send + Sync {
    /// Stable identifier used for registry lookup.
    fn name(&self) -> &str;

    /// Turns tracking on. Idempotent, no other side effects.
    fn enable_tracking(&self);

    /// Turns tracking off. Idempotent; the counter keeps its value.
    fn disable_tracking(&self);

    fn is_tracking_enabled(&self) -> bool;

    /// Records one occurrence of `action` if tracking is enabled and the kind
    /// matches this plugin's filter; any other kind is silently ignored.
    fn track(&self, action: StatsAction);

    /// Sets the counter back to zero. The enabled flag is untouched.
    fn reset(&self);

    /// Fixed label plus the current counter value, e.g. "Times waited: 3".
    fn represent(&self) -> String;
}
