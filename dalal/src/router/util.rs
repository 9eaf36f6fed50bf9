use dalal_core::{Capability, DalalError};

/// Collapse a set of provider errors into a uniform `DalalError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - If `what` is `Some` and all errors are `DataUnavailable` → `DataUnavailable(what)`.
/// - Else → `AllProvidersFailed(errors)`.
#[must_use]
pub fn collapse_errors(
    capability: Capability,
    attempted_any: bool,
    errors: Vec<DalalError>,
    what: Option<String>,
) -> DalalError {
    if !attempted_any {
        return DalalError::unsupported(capability.as_str());
    }
    if let Some(what) = what
        && !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, DalalError::DataUnavailable { .. }))
    {
        return DalalError::data_unavailable(what);
    }
    DalalError::AllProvidersFailed(errors)
}
