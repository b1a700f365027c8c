//! Silent message deletion for Discord user accounts.
//!
//! A message is first masked by a placeholder sent with the original
//! message's id as nonce, so loggers that correlate by nonce record the
//! placeholder instead of the original content. Both are then deleted.

pub mod config;
pub mod discord;
pub mod platform;
pub mod purge;
pub mod silent;

#[cfg(test)]
mod testing;
