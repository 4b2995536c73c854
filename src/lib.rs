//! A Discord bot that tells you where the International Space Station is and
//! when it will next pass over a place.

pub mod commands;
pub mod config;
pub mod error;
pub mod passes;
pub mod services;

pub use commands::{Command, Handler, Responder};
pub use config::Config;
pub use error::{ConfigError, FormatError, GenericError, IssBotError, ParseError};
