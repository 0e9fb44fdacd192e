//! Per-route scroll state.

use std::collections::HashMap;

use guestnest_core::Route;

/// Height of one terminal row in the pixel space the chrome controller uses.
pub const ROW_PX: i64 = 16;

/// Scroll offsets, in rows, keyed by route.
///
/// Each page keeps its own offset, so a page drawn under the auth form comes
/// back exactly where the visitor left it.
#[derive(Debug, Default)]
pub struct PageState {
    offsets: HashMap<Route, u16>,
}

impl PageState {
    pub fn offset(&self, route: &Route) -> u16 {
        self.offsets.get(route).copied().unwrap_or(0)
    }

    pub fn offset_px(&self, route: &Route) -> i64 {
        i64::from(self.offset(route)) * ROW_PX
    }

    /// Scrolls by `delta` rows, clamped to `[0, max]`. Returns the new offset.
    pub fn scroll_by(&mut self, route: &Route, delta: i32, max: u16) -> u16 {
        let current = i32::from(self.offset(route));
        let next = (current + delta).clamp(0, i32::from(max)) as u16;
        self.offsets.insert(route.clone(), next);
        next
    }
}
