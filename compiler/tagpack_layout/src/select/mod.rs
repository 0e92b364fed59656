//! Layout selection.
//!
//! Overlapping usually saves fields but not always: leaves that would
//! otherwise share same-type slots can end up costing more once moved
//! into a region. Both variants are allocated and the cheaper one kept.

use tracing::debug;

use tagpack_ir::UnionDescriptor;

use crate::alloc::allocate;
use crate::layout::UnionLayout;
use crate::LayoutError;

/// Pick the layout with the fewest total fields.
///
/// Ties go to the variant without an overlap region.
pub fn select(union: &UnionDescriptor) -> Result<UnionLayout<'_>, LayoutError> {
    let plain = allocate(union, false)?;
    if !union.options.overlap_structs() {
        return Ok(plain);
    }

    let overlapped = allocate(union, true)?;
    let keep_overlapped = overlapped.field_count() < plain.field_count();
    debug!(
        union = %union.name,
        plain = plain.field_count(),
        overlapped = overlapped.field_count(),
        keep_overlapped,
        "selected layout"
    );

    Ok(if keep_overlapped { overlapped } else { plain })
}
