use crate::core::models::structure::AtomicStructure;
use crate::engine::trace::DebugTrace;

/// Returns whether both structures have the same element symbol at every position.
///
/// Structures of different size never match. Symbols are compared exactly, without case
/// folding.
pub(crate) fn check(
    test: &AtomicStructure,
    reference: &AtomicStructure,
    trace: &mut DebugTrace,
) -> bool {
    if test.num_atoms() != reference.num_atoms() {
        trace.line(|| {
            format!(
                "wrong number of atoms: {} (test) vs. {} (ref)",
                test.num_atoms(),
                reference.num_atoms()
            )
        });
        return false;
    }

    match test
        .elements()
        .zip(reference.elements())
        .position(|(t, r)| t != r)
    {
        Some(index) => {
            trace.line(|| {
                format!(
                    "elements don't match at atom {index}: {} (test) vs. {} (ref)",
                    test.atoms()[index].element,
                    reference.atoms()[index].element
                )
            });
            false
        }
        None => true,
    }
}

/// Returns whether both structures have the same element symbol at every position.
pub fn elements_match(test: &AtomicStructure, reference: &AtomicStructure) -> bool {
    check(test, reference, &mut DebugTrace::new(false))
}
