//! Seams between screens and their host.

use crate::presenter::RowAction;

/// Receiver of selection intents.
///
/// Screen controllers only say where the user wants to go. Whatever
/// implements this trait performs the transition.
pub trait NavigationHost {
    fn navigate(&mut self, action: RowAction);
}
