//! Token builders for the two product scenarios.
//!
//! - [`rtc`] - real-time communication sessions: join a channel, and publish
//!   when the role allows it
//! - [`rtm`] - real-time messaging login
//!
//! Both only choose which privileges to request and hand off to
//! [`dynkey_token::TokenRequest`].

mod role;
pub mod rtc;
pub mod rtm;

pub use role::Role;
pub use rtc::{build_session_token, build_session_token_with_uid};
pub use rtm::build_messaging_token;

pub use dynkey_token::{Result, TokenError};
