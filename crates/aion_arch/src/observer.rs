//! Notification hook for binding changes.

use crate::ids::{PipId, SiteId, WireId};

/// Receives a notification after every successful bind or unbind.
///
/// Observers see only the handle that changed; they have no access to the
/// [`Arch`](crate::Arch) and therefore cannot mutate bindings from inside a
/// callback. All methods default to doing nothing.
pub trait BindObserver {
    /// A site was bound or unbound.
    fn site_changed(&mut self, _site: SiteId) {}

    /// A wire was bound or unbound.
    fn wire_changed(&mut self, _wire: WireId) {}

    /// A pip was bound or unbound.
    fn pip_changed(&mut self, _pip: PipId) {}
}

/// The observer used when none is supplied.
impl BindObserver for () {}

/// A resource whose binding changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Changed {
    /// A site.
    Site(SiteId),
    /// A wire.
    Wire(WireId),
    /// A pip.
    Pip(PipId),
}

/// An observer that records every notification in order.
///
/// Useful for UI refresh batching and for tests.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    /// Notifications received so far.
    pub changes: Vec<Changed>,
}

impl BindObserver for ChangeLog {
    fn site_changed(&mut self, site: SiteId) {
        self.changes.push(Changed::Site(site));
    }

    fn wire_changed(&mut self, wire: WireId) {
        self.changes.push(Changed::Wire(wire));
    }

    fn pip_changed(&mut self, pip: PipId) {
        self.changes.push(Changed::Pip(pip));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;
    impl BindObserver for Silent {}

    #[test]
    fn defaults_do_nothing() {
        let mut s = Silent;
        s.site_changed(SiteId::from_raw(0));
        s.wire_changed(WireId::from_raw(0));
        s.pip_changed(PipId::from_raw(0));
    }

    #[test]
    fn change_log_records_in_order() {
        let mut log = ChangeLog::default();
        log.wire_changed(WireId::from_raw(2));
        log.site_changed(SiteId::from_raw(1));
        assert_eq!(
            log.changes,
            vec![Changed::Wire(WireId::from_raw(2)), Changed::Site(SiteId::from_raw(1))]
        );
    }
}
