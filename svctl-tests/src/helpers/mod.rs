pub mod fake_supervisor;
pub mod service_tree;
pub mod wait_utils;
