#![allow(dead_code)]

pub use actrun_test_utils::builders;
pub use actrun_test_utils::fake_executor;
pub use actrun_test_utils::{init_tracing, with_timeout};
