pub mod writer;

pub use writer::{new_envelope, write_result_set};
