use crate::format::FormatDescriptor;

/// Picks the format to hand back to the client.
///
/// Provider order is authoritative: with no hint the first format wins, and
/// with a hint the first format whose quality label contains it verbatim
/// (case-sensitive) wins. When nothing matches the first format is used, so
/// the only way to get `None` is an empty list.
pub fn resolve<'a>(
    formats: &'a [FormatDescriptor],
    quality_hint: Option<&str>,
) -> Option<&'a FormatDescriptor> {
    let first = formats.first()?;

    let Some(hint) = quality_hint else {
        return Some(first);
    };

    formats
        .iter()
        .find(|format| {
            format
                .quality_label
                .as_deref()
                .is_some_and(|label| label.contains(hint))
        })
        .or(Some(first))
}
