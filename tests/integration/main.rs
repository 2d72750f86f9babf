//! Integration test harness — drives the full router over an in-memory store.

mod helpers;

mod admin_test;
mod room_test;
