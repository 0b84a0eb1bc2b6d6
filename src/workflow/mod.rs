pub mod fetch_ctx;
pub mod result_flow;

pub use fetch_ctx::FetchCtx;
pub use result_flow::ResultFlow;
