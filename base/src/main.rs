use gob_shared::{
    anyhow::{anyhow, Result},
    log, BotState, DataStore,
};
use serenity::{model::gateway::GatewayIntents, Client};

mod handler;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let token = std::env::var("DISCORD_TOKEN").map_err(|_| anyhow!("DISCORD_TOKEN must be set"))?;

    let dev_server = std::env::var("GOB_DEV_SERVER").ok().and_then(|f| f.parse::<serenity::model::id::GuildId>().ok());

    let data_file = std::env::var("GOB_DATA_FILE").unwrap_or_else(|_| String::from("gob.json"));
    let state = BotState::load(DataStore::new(data_file.as_str()))?;
    log::info!("loaded {} game(s) from {}", state.registry.len(), data_file);

    // voice states ride along with the non privileged set
    let intents = GatewayIntents::non_privileged();

    let handler = handler::Handler::new(dev_server, state);
    let mut client = Client::builder(&token, intents).event_handler(handler).await.map_err(|e| anyhow!(e))?;

    client.start().await.map_err(|e| anyhow!(e))?;
    Ok(())
}
