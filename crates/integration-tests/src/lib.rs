//! Cross-crate tests for Chirp. Everything interesting lives under
//! `tests/`; the shared in-memory store and app builder are in
//! `tests/fixtures.rs`, pulled in by each test target via `mod fixtures`.
