/// Navbar state that is not derived from the session or history.
#[derive(Debug, Default)]
pub struct NavbarState {
    /// Non-blocking message under the navbar (e.g. a failed logout).
    pub notice: Option<String>,
}

impl NavbarState {
    pub fn show_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
