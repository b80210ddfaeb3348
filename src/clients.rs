mod blocking;
mod docai;
#[cfg(any(test, feature = "mocks"))]
pub mod mock;
pub mod transport;

pub use blocking::BlockingClient;
pub use docai::DocAiClient;
pub use transport::{HttpResponse, HttpTransport, Method, ReqwestTransport, RequestBody};
