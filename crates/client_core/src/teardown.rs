use shared::protocol::SessionRequest;

/// Resignation armed for the current session. Firing disarms it, so closing
/// the view and dropping the controller never resign twice.
#[derive(Debug, Default)]
pub struct ResignOnTeardown {
    armed: Option<SessionRequest>,
}

impl ResignOnTeardown {
    pub fn arm(&mut self, request: SessionRequest) {
        self.armed = Some(request);
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn fire(&mut self) -> Option<SessionRequest> {
        self.armed.take()
    }
}
