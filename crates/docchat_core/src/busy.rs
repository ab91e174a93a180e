pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Upload,
    Query,
}

/// Observable controller state: either idle or waiting on one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting(RequestKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub request_id: RequestId,
    pub kind: RequestKind,
}

/// Gate shared by the upload and conversation controllers.
///
/// At most one request is in flight at a time. Acquiring hands out a fresh
/// [`RequestId`]; only the settlement carrying that id releases the flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BusyFlag {
    in_flight: Option<InFlight>,
    last_request_id: RequestId,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<InFlight> {
        self.in_flight
    }

    pub fn phase(&self) -> Phase {
        match self.in_flight {
            Some(in_flight) => Phase::Submitting(in_flight.kind),
            None => Phase::Idle,
        }
    }

    /// Check-and-set: returns `None` without touching the flag when a request
    /// is already outstanding.
    pub fn try_acquire(&mut self, kind: RequestKind) -> Option<RequestId> {
        if self.in_flight.is_some() {
            return None;
        }
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.in_flight = Some(InFlight { request_id, kind });
        Some(request_id)
    }

    /// Clears the flag if `request_id` of `kind` is the one in flight.
    /// Returns whether it was released.
    pub fn release(&mut self, request_id: RequestId, kind: RequestKind) -> bool {
        match self.in_flight {
            Some(in_flight) if in_flight.request_id == request_id && in_flight.kind == kind => {
                self.in_flight = None;
                true
            }
            _ => false,
        }
    }
}
