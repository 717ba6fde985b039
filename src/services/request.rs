use crate::foundation::error::{CardError, CardResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestStatus {
    Idle,
    Pending,
    Resolved,
    Failed,
}

/// Identifies one started request. Stale tickets are rejected on completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

/// At-most-one in-flight request of a single kind.
///
/// There is no cancellation: [`RequestGuard::invalidate`] only makes the outstanding ticket
/// stale, so a late result is dropped when it arrives.
#[derive(Clone, Debug)]
pub struct RequestGuard {
    kind: &'static str,
    status: RequestStatus,
    generation: u64,
}

impl RequestGuard {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            status: RequestStatus::Idle,
            generation: 0,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    pub fn begin(&mut self) -> CardResult<RequestTicket> {
        if self.is_pending() {
            return Err(CardError::RequestInFlight(self.kind));
        }
        self.generation += 1;
        self.status = RequestStatus::Pending;
        Ok(RequestTicket {
            generation: self.generation,
        })
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.is_pending() && ticket.generation == self.generation
    }

    /// Mark the request resolved. Returns `false` (and changes nothing) for a stale ticket.
    pub fn resolve(&mut self, ticket: RequestTicket) -> bool {
        self.finish(ticket, RequestStatus::Resolved)
    }

    /// Mark the request failed. Returns `false` (and changes nothing) for a stale ticket.
    pub fn fail(&mut self, ticket: RequestTicket) -> bool {
        self.finish(ticket, RequestStatus::Failed)
    }

    /// The caller moved on; any outstanding ticket becomes stale.
    pub fn invalidate(&mut self) {
        if self.is_pending() {
            tracing::debug!(kind = self.kind, "discarding pending request");
        }
        self.generation += 1;
        self.status = RequestStatus::Idle;
    }

    fn finish(&mut self, ticket: RequestTicket, status: RequestStatus) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(kind = self.kind, "dropping stale request result");
            return false;
        }
        self.status = status;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/request.rs"]
mod tests;
