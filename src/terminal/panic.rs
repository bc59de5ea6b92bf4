//! Panic hook for terminal restoration.

use super::setup::emergency_restore;
use std::panic;

/// Install a panic hook that leaves the alternate screen before the
/// previous hook prints the panic message.
///
/// Call before creating the [`super::TerminalManager`].
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        emergency_restore();
        original_hook(panic_info);
    }));
}
