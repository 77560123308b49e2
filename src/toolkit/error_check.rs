//! Translation of the toolkit's sticky error flag into per-call results.
//!
//! Every primitive call is paired with a flag check in [`guarded`]. When the
//! flag is raised, both messages are captured and the flag is reset before
//! returning, so a failure can never be attributed to a later call.
use super::{MessageKind, Toolkit, ToolkitFailure};

/// Read and clear the error flag.
///
/// Return
/// ----------
/// * `Ok(())` if no failure is pending, otherwise the captured [`ToolkitFailure`].
///   In both cases the flag is lowered on return.
pub fn check<T: Toolkit + ?Sized>(toolkit: &mut T) -> Result<(), ToolkitFailure> {
    if !toolkit.failed() {
        return Ok(());
    }
    let failure = ToolkitFailure {
        short: toolkit.message(MessageKind::Short),
        long: toolkit.message(MessageKind::Long),
    };
    toolkit.reset();
    Err(failure)
}

/// Run one toolkit primitive and translate the error flag it may raise.
///
/// Arguments
/// -----------------
/// * `toolkit`: The engine instance, borrowed for the whole call + check.
/// * `op`: The primitive invocation.
///
/// Return
/// ----------
/// * The primitive's output, or the failure it raised.
pub fn guarded<T, R, F>(toolkit: &mut T, op: F) -> Result<R, ToolkitFailure>
where
    T: Toolkit + ?Sized,
    F: FnOnce(&mut T) -> R,
{
    let out = op(toolkit);
    check(toolkit)?;
    Ok(out)
}
