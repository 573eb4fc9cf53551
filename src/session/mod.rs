pub mod controller;
pub mod result_set;

pub use controller::{
    LoadMoreControl, PendingRequest, RequestKind, Resolution, SearchSession, SessionState,
};
pub use result_set::{IngestError, ResultSet, SearchTicket};
