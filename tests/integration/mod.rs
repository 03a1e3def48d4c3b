//! Integration tests for the copse execution context registry

mod events;
mod locking;
mod test_utils;
