pub mod pagination;
pub mod serde_helpers;
pub mod types;
pub mod utils;

pub use pagination::{PageInfo, Pagination};
pub use types::{ApiResponse, ErrorBody};
