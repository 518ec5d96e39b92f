//! Integration tests for tessera-decode

mod backend_tests;
