use iss_bot::{Config, GenericError, Handler, Responder};

use log::*;
use serenity::prelude::{Client, GatewayIntents};

#[tokio::main]
async fn main() -> Result<(), GenericError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("iss_bot=info"))
        .init();
    trace!("Logger init.");

    let config = Config::from_env()?;
    trace!("Read tokens from env.");

    let handler = Handler::new(Responder::from_config(&config));

    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;
    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await?;

    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
        return Err(why.into());
    }

    Ok(())
}
