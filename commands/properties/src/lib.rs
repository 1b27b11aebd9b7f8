use gob_shared::{
    anyhow::{anyhow, Result},
    integer_option,
    serenity::all::*,
    string_option, subcommand_options, BotState, PlayerRange, PropertyKey, UnorderedVec,
};

pub fn command() -> PropertiesCommand {
    PropertiesCommand
}

pub struct PropertiesCommand;

fn range_subcommand(name: &'static str, description: &'static str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::SubCommand, name, description)
        .add_sub_option(CreateCommandOption::new(CommandOptionType::Integer, "min", "The smallest workable player count").required(true))
        .add_sub_option(CreateCommandOption::new(CommandOptionType::Integer, "max", "The largest workable player count").required(true))
        .add_sub_option(CreateCommandOption::new(CommandOptionType::String, "game", "The game to set the property on").required(true))
}

fn range_subcommand_info(name: &str, description: &str) -> gob_shared::CommandOption {
    gob_shared::CommandOption {
        name: String::from(name),
        description: String::from(description),
        option_type: gob_shared::CommandOptionType::SubCommand(UnorderedVec::from(vec![
            gob_shared::CommandOption {
                name: String::from("min"),
                description: String::from("The smallest workable player count"),
                option_type: gob_shared::CommandOptionType::Integer,
                choices: UnorderedVec::from(vec![]),
                required: true,
            },
            gob_shared::CommandOption {
                name: String::from("max"),
                description: String::from("The largest workable player count"),
                option_type: gob_shared::CommandOptionType::Integer,
                choices: UnorderedVec::from(vec![]),
                required: true,
            },
            gob_shared::CommandOption {
                name: String::from("game"),
                description: String::from("The game to set the property on"),
                option_type: gob_shared::CommandOptionType::String,
                choices: UnorderedVec::from(vec![]),
                required: true,
            },
        ])),
        choices: UnorderedVec::from(vec![]),
        required: false,
    }
}

#[gob_shared::async_trait]
impl gob_shared::Command for PropertiesCommand {
    fn register(&self) -> CreateCommand {
        let info = self.get_command_info();
        CreateCommand::new(info.name).description(info.description).set_options(vec![
            range_subcommand("playercount", "Set the supported player count for a game"),
            range_subcommand("idealplayercount", "Set the ideal player count for a game"),
            CreateCommandOption::new(CommandOptionType::SubCommand, "list", "List the properties set for a game")
                .add_sub_option(CreateCommandOption::new(CommandOptionType::String, "game", "The game to look up").required(true)),
        ])
    }

    fn get_command_info(&self) -> gob_shared::CommandInfo {
        gob_shared::CommandInfo {
            name: String::from("properties"),
            description: String::from("Set or list per-game properties"),
            options: UnorderedVec::from(vec![
                range_subcommand_info("playercount", "Set the supported player count for a game"),
                range_subcommand_info("idealplayercount", "Set the ideal player count for a game"),
                gob_shared::CommandOption {
                    name: String::from("list"),
                    description: String::from("List the properties set for a game"),
                    option_type: gob_shared::CommandOptionType::SubCommand(UnorderedVec::from(vec![gob_shared::CommandOption {
                        name: String::from("game"),
                        description: String::from("The game to look up"),
                        option_type: gob_shared::CommandOptionType::String,
                        choices: UnorderedVec::from(vec![]),
                        required: true,
                    }])),
                    choices: UnorderedVec::from(vec![]),
                    required: false,
                },
            ]),
        }
    }

    async fn application_command(&mut self, ctx: &Context, interaction: &mut CommandInteraction, state: &mut BotState) -> Result<()> {
        let option = interaction.data.options.first().ok_or(anyhow!("No subcommand found"))?;
        let content = match option.name.as_str() {
            name @ ("playercount" | "idealplayercount") => {
                let options = subcommand_options(option)?;
                let min = integer_option(options, "min")?.ok_or(anyhow!("Missing option `min`"))?;
                let max = integer_option(options, "max")?.ok_or(anyhow!("Missing option `max`"))?;
                let game = string_option(options, "game")?;

                let range = PlayerRange::new(min, max)?;
                let key = if name == "playercount" { PropertyKey::PlayerCount } else { PropertyKey::IdealPlayerCount };
                state.registry.set_property(&game, key, range)?;
                state.save()?;
                match key {
                    PropertyKey::PlayerCount => format!("player count set to {}", range),
                    PropertyKey::IdealPlayerCount => format!("ideal player count set to {}", range),
                }
            }
            "list" => {
                let game = state.registry.validate(&string_option(subcommand_options(option)?, "game")?)?;
                match state.registry.properties(&game) {
                    Some(properties) if !properties.is_empty() => {
                        let mut lines = Vec::new();
                        if let Some(range) = properties.player_count {
                            lines.push(format!("{}: {}", PropertyKey::PlayerCount.as_str(), range));
                        }
                        if let Some(range) = properties.ideal_player_count {
                            lines.push(format!("{}: {}", PropertyKey::IdealPlayerCount.as_str(), range));
                        }
                        lines.join("\n")
                    }
                    _ => format!("{} does not have any properties set", game),
                }
            }
            other => return Err(anyhow!("Unhandled subcommand `{}`", other)),
        };

        interaction
            .create_response(&ctx.http, {
                CreateInteractionResponse::Message(CreateInteractionResponseMessage::default().content(content))
            })
            .await?;
        Ok(())
    }
}
