//! Directory engine: API client, effect execution and the async session driver.
mod client;
mod decode;
mod engine;
mod session;
mod types;

pub use client::{ApiSettings, DirectoryApi, ReqwestDirectoryApi, DEFAULT_BASE_URL, NB_RESULTS_KEY};
pub use decode::{decode_experiences, decode_page, error_message};
pub use engine::{execute_effect, EngineHandle};
pub use session::DirectorySession;
pub use types::{ApiError, EngineError, EngineEvent};
