pub mod caller;
pub mod optional_json;
pub mod session;

pub use caller::Caller;
pub use optional_json::OptionalJson;
pub use session::SessionHandle;
