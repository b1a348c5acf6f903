/// Classification for retry policy.
///
/// Used by the fetch pipeline to decide whether a failed provider call may
/// be attempted again within the same fetch.
///
/// # Behavior Summary
///
/// | Class | Retry Within Attempt Budget? |
/// |-------|------------------------------|
/// | `Transient` | Yes, with exponential backoff |
/// | `Terminal` | No, surfaces immediately |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// A transient fault - network hiccup or an upstream 5xx/4xx blip.
    /// Worth retrying with backoff while attempts remain.
    Transient,

    /// A terminal fault - rate limiting, a payload we cannot parse, or an
    /// open circuit. Retrying would only burn quota or delay the sweep.
    Terminal,
}
