use std::sync::{Arc, OnceLock};

use crate::{
    config::Config,
    services::{
        geocoding::{GeocodingService, GoogleMapsService},
        position::{OpenNotifyService, PositionService},
        predictor::{AstroViewerService, PassPredictionService},
    },
};

use log::*;
use regex::Regex;
use serenity::{
    async_trait,
    model::{channel::Message, gateway::Ready},
    prelude::*,
};

pub mod flyover;
pub mod position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// "where is the iss now?"
    Position,
    /// "when does the iss pass over <location>"
    Flyover { location: String },
}

fn position_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // `\b` rather than a leading space, so "ISS now?" opening a message counts too.
        Regex::new(r"(?i)(?:where is the\s+)?\biss now\b\??").expect("valid position pattern")
    })
}

fn flyover_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Longer alternatives first, so "pass over Sydney" captures "Sydney".
        // As above, the phrase may open the message.
        Regex::new(r"(?i)(?:when does the\s+)?\biss\s+(?:flyover|fly over|pass over|pass)\s+(.+)")
            .expect("valid flyover pattern")
    })
}

impl Command {
    /// Finds a command anywhere in a chat message.
    pub fn parse(text: &str) -> Option<Command> {
        if position_pattern().is_match(text) {
            return Some(Command::Position);
        }
        flyover_pattern().captures(text).map(|captures| Command::Flyover {
            location: captures[1].trim().to_string(),
        })
    }
}

/// Runs commands against the injected services and always produces reply text.
#[derive(Clone)]
pub struct Responder {
    position: Arc<dyn PositionService>,
    geocoder: Arc<dyn GeocodingService>,
    predictor: Arc<dyn PassPredictionService>,
    static_map_key: Option<String>,
}

impl Responder {
    pub fn new(
        position: Arc<dyn PositionService>,
        geocoder: Arc<dyn GeocodingService>,
        predictor: Arc<dyn PassPredictionService>,
        static_map_key: Option<String>,
    ) -> Self {
        Responder {
            position,
            geocoder,
            predictor,
            static_map_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(OpenNotifyService::new(config)),
            Arc::new(GoogleMapsService::new(config)),
            Arc::new(AstroViewerService::new(config)),
            config.static_map_key.clone(),
        )
    }

    /// Reply for a chat message, or `None` when it holds no command.
    pub async fn respond(&self, text: &str) -> Option<String> {
        let command = Command::parse(text)?;
        info!("Received {:?} command.", command);

        let result = match &command {
            Command::Position => {
                position::where_is_the_iss(
                    self.position.as_ref(),
                    self.geocoder.as_ref(),
                    self.static_map_key.as_deref(),
                )
                .await
            }
            Command::Flyover { location } => {
                flyover::when_does_the_iss_pass(
                    self.geocoder.as_ref(),
                    self.predictor.as_ref(),
                    location,
                )
                .await
            }
        };

        Some(result.unwrap_or_else(|why| {
            error!("{:?} command failed: {}", command, why);
            why.user_message().to_string()
        }))
    }
}

pub struct Handler {
    responder: Responder,
}

impl Handler {
    pub fn new(responder: Responder) -> Self {
        Handler { responder }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        if let Some(reply) = self.responder.respond(&msg.content).await {
            if let Err(why) = msg.channel_id.say(&ctx.http, reply).await {
                warn!("Error sending message: {:?}", why);
            }
        }
    }
}
