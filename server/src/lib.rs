// server/src/lib.rs
// Library half of `cardioguard-cli`, kept separate so the handlers are testable.

pub mod cli;
