use gob_shared::{
    anyhow::{anyhow, Result},
    colored::*,
    log, BotState,
};
use serenity::{all::*, futures::lock::Mutex};
use std::{collections::HashMap, sync::Arc};

pub struct Handler {
    commands: Arc<Mutex<CommandHolder>>,
    state: Arc<Mutex<BotState>>,
}

impl Handler {
    pub fn new(dev_server: Option<GuildId>, state: BotState) -> Self {
        Self {
            commands: Arc::new(Mutex::new(CommandHolder::new(dev_server))),
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub async fn register_commands(&self, http: &Arc<serenity::http::Http>) -> Result<()> {
        let mut commands = self.commands.lock().await;
        commands.register(http, Arc::new(Mutex::new(gob_games::command()))).await?;
        commands.register(http, Arc::new(Mutex::new(gob_properties::command()))).await?;
        commands.register(http, Arc::new(Mutex::new(gob_preferences::command()))).await?;
        commands.register(http, Arc::new(Mutex::new(gob_askprefs::command()))).await?;
        commands.register(http, Arc::new(Mutex::new(gob_suggest::suggest_command()))).await?;
        commands.register(http, Arc::new(Mutex::new(gob_suggest::suggest_for_command()))).await?;
        commands.finalize_registration(http).await?;
        Ok(())
    }
}

#[gob_shared::async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: serenity::client::Context, ready: serenity::model::gateway::Ready) {
        if let Err(e) = self.register_commands(&ctx.http).await {
            log::error!("Error registering commands: {}", e);
        }
        log::info!("{} is connected!", ready.user.name);
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Ping(p) => {
                log::info!("Ping interaction {}", format!("{:?}", p).blue());
            }
            Interaction::Command(mut cmd) => {
                let name = cmd.data.name.clone();
                if let Some(command) = {
                    let commands = self.commands.lock().await;
                    commands.find(|c| c == name)
                } {
                    // one lock around the whole event, commands read and
                    // write the maps non atomically
                    let mut state = self.state.lock().await;
                    if let Err(e) = command.lock().await.application_command(&ctx, &mut cmd, &mut state).await {
                        log::trace!("Error handling interaction for command {}: {}", name.blue(), e.to_string().red());
                        if let Err(e) = cmd
                            .create_response(&ctx.http, {
                                CreateInteractionResponse::Message(CreateInteractionResponseMessage::default().content(e.to_string()).ephemeral(true))
                            })
                            .await
                        {
                            log::error!("Error creating interaction response: {}", e);
                        }
                    } else {
                        log::trace!("Handled interaction for command {}", name.blue());
                    }
                } else {
                    log::warn!("Command {} not found", name.red());
                    if let Err(e) = cmd
                        .create_response(&ctx.http, {
                            CreateInteractionResponse::Message(CreateInteractionResponseMessage::default().content(format!("Command `{}` not found", name)).ephemeral(true))
                        })
                        .await
                    {
                        log::error!("Error creating interaction response: {}", e);
                    }
                }
            }
            Interaction::Component(mut cmp) => {
                let name = cmp.data.custom_id.clone();
                log::trace!("Message component interaction {}", name.blue());
                if let Some(command) = {
                    let commands = self.commands.lock().await;
                    commands.find(|c| name.starts_with(c))
                } {
                    let mut state = self.state.lock().await;
                    if let Err(e) = command.lock().await.message_component(&ctx, &mut cmp, &mut state).await {
                        log::trace!("Error handling interaction for command {}: {}", name.blue(), e.to_string().red());
                        if let Err(e) = cmp
                            .create_response(&ctx.http, {
                                CreateInteractionResponse::Message(CreateInteractionResponseMessage::default().content(e.to_string()).ephemeral(true))
                            })
                            .await
                        {
                            log::error!("Error creating interaction response: {}", e);
                        }
                    } else {
                        log::trace!("Handled interaction for command {}", name.blue());
                    }
                } else {
                    log::warn!("Command {} not found", name.red());
                    if let Err(e) = cmp
                        .create_response(&ctx.http, {
                            CreateInteractionResponse::Message(CreateInteractionResponseMessage::default().content(format!("Command `{}` not found", name)).ephemeral(true))
                        })
                        .await
                    {
                        log::error!("Error creating interaction response: {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

pub struct CommandHolder {
    cached_commands: Option<Vec<(CommandId, gob_shared::CommandInfo)>>,
    commands: HashMap<String, Arc<Mutex<dyn gob_shared::Command>>>,
    dev_server: Option<GuildId>,
}

impl CommandHolder {
    pub fn new(dev_server: Option<GuildId>) -> Self {
        Self {
            commands: HashMap::new(),
            cached_commands: None,
            dev_server,
        }
    }

    pub fn find(&self, predicate: impl Fn(&str) -> bool) -> Option<Arc<Mutex<dyn gob_shared::Command>>> {
        self.commands.iter().find(|(name, _)| predicate(name)).map(|(_, command)| command.clone())
    }

    /// Registers the command with Discord only when it is new or its info
    /// changed since the cached snapshot.
    pub async fn register(&mut self, http: &Arc<serenity::http::Http>, raw_command: Arc<Mutex<dyn gob_shared::Command>>) -> Result<()> {
        let cached_commands = match &self.cached_commands {
            Some(cached_commands) => cached_commands,
            None => {
                self.cache_commands(http).await?;
                self.cached_commands.as_ref().ok_or(anyhow!("self.cached_commands was None after calling self.cache_commands"))?
            }
        };

        let name = {
            let command = raw_command.lock().await;
            let command_info = command.get_command_info();
            let name = command_info.name.clone();
            if self.commands.contains_key(&name) {
                return Err(anyhow!("Command with name {} already registered", name.red()));
            }
            if cached_commands
                .iter()
                .find(|(_, cached_command)| cached_command.name == command_info.name)
                .map(|(_, cached_command)| cached_command != &command_info)
                .unwrap_or(true)
            {
                if let Some(dev_server) = self.dev_server {
                    log::info!("Registering command {} to {}", command_info.name.blue(), "DEV SERVER".red().bold());
                    let guild = http.get_guild(dev_server).await?;
                    guild.create_command(http, command.register()).await?;
                } else {
                    log::info!("Registering command {} {}", command_info.name.blue(), "GLOBALLY".green().bold());
                    serenity::model::application::Command::create_global_command(http, command.register()).await?;
                }
            }
            name
        };

        self.commands.insert(name, raw_command);
        Ok(())
    }

    async fn cache_commands(&mut self, http: &Arc<serenity::http::Http>) -> Result<()> {
        self.cached_commands = Some(match self.dev_server {
            Some(dev_server) => {
                log::info!("Caching dev commands");
                http.get_guild(dev_server)
                    .await?
                    .get_commands(http)
                    .await?
                    .into_iter()
                    .map(|command| (command.id, command.into()))
                    .collect()
            }
            None => {
                log::info!("Caching global commands");
                http.get_global_commands().await?.into_iter().map(|command| (command.id, command.into())).collect()
            }
        });
        Ok(())
    }

    /// Unregisters whatever Discord still carries that no longer exists here.
    pub async fn finalize_registration(&mut self, http: &Arc<serenity::http::Http>) -> Result<()> {
        let cached_commands = match &self.cached_commands {
            Some(cached_commands) => cached_commands,
            None => {
                self.cache_commands(http).await?;
                self.cached_commands.as_ref().ok_or(anyhow!("self.cached_commands was None after calling self.cache_commands"))?
            }
        };

        let dev_guild = match self.dev_server {
            Some(dev_guild) => Some(http.get_guild(dev_guild).await?),
            None => None,
        };

        for (id, cached_command) in cached_commands {
            if !self.commands.keys().any(|name| name == &cached_command.name) {
                match dev_guild.as_ref() {
                    Some(dev_guild) => {
                        log::info!("Unregistering command {} from {}", cached_command.name.blue(), "DEV SERVER".red().bold());
                        dev_guild.delete_command(http, *id).await?;
                    }
                    None => {
                        log::info!("Unregistering command {} {}", cached_command.name.blue(), "GLOBALLY".green().bold());
                        serenity::model::application::Command::delete_global_command(http, *id).await?;
                    }
                }
            }
        }

        Ok(())
    }
}
