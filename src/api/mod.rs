pub mod classify;
pub mod page;
pub mod sessions;

pub use classify::{__path_handle_classify, __path_handle_model_status};
pub use classify::{
    handle_classify, handle_model_status, ClassifyRequest, ClassifyResponse, ErrorResponse,
    ModelStatusResponse,
};
pub use page::handle_index;
pub use sessions::{
    __path_handle_classify_session, __path_handle_clear_session, __path_handle_create_session,
    __path_handle_delete_session, __path_handle_session_events,
};
pub use sessions::{
    handle_classify_session, handle_clear_session, handle_create_session, handle_delete_session,
    handle_session_events, EventsRequest, SessionCreated,
};
