use gob_shared::{
    anyhow::{anyhow, Result},
    serenity::all::*,
    subcommand_options, string_option, BotState, UnorderedVec,
};

pub fn command() -> GamesCommand {
    GamesCommand
}

pub struct GamesCommand;

#[gob_shared::async_trait]
impl gob_shared::Command for GamesCommand {
    fn register(&self) -> CreateCommand {
        let info = self.get_command_info();
        CreateCommand::new(info.name).description(info.description).set_options(vec![
            CreateCommandOption::new(CommandOptionType::SubCommand, "add", "Add a game to Gob's list")
                .add_sub_option(CreateCommandOption::new(CommandOptionType::String, "name", "The name of the game").required(true)),
            CreateCommandOption::new(CommandOptionType::SubCommand, "remove", "Remove a game from Gob's list (preferences unaffected)")
                .add_sub_option(CreateCommandOption::new(CommandOptionType::String, "name", "The name of the game").required(true)),
            CreateCommandOption::new(CommandOptionType::SubCommand, "list", "List all of the games that Gob knows about"),
        ])
    }

    fn get_command_info(&self) -> gob_shared::CommandInfo {
        gob_shared::CommandInfo {
            name: String::from("games"),
            description: String::from("Manage Gob's game list"),
            options: UnorderedVec::from(vec![
                gob_shared::CommandOption {
                    name: String::from("add"),
                    description: String::from("Add a game to Gob's list"),
                    option_type: gob_shared::CommandOptionType::SubCommand(UnorderedVec::from(vec![gob_shared::CommandOption {
                        name: String::from("name"),
                        description: String::from("The name of the game"),
                        option_type: gob_shared::CommandOptionType::String,
                        choices: UnorderedVec::from(vec![]),
                        required: true,
                    }])),
                    choices: UnorderedVec::from(vec![]),
                    required: false,
                },
                gob_shared::CommandOption {
                    name: String::from("remove"),
                    description: String::from("Remove a game from Gob's list (preferences unaffected)"),
                    option_type: gob_shared::CommandOptionType::SubCommand(UnorderedVec::from(vec![gob_shared::CommandOption {
                        name: String::from("name"),
                        description: String::from("The name of the game"),
                        option_type: gob_shared::CommandOptionType::String,
                        choices: UnorderedVec::from(vec![]),
                        required: true,
                    }])),
                    choices: UnorderedVec::from(vec![]),
                    required: false,
                },
                gob_shared::CommandOption {
                    name: String::from("list"),
                    description: String::from("List all of the games that Gob knows about"),
                    option_type: gob_shared::CommandOptionType::SubCommand(UnorderedVec::from(vec![])),
                    choices: UnorderedVec::from(vec![]),
                    required: false,
                },
            ]),
        }
    }

    async fn application_command(&mut self, ctx: &Context, interaction: &mut CommandInteraction, state: &mut BotState) -> Result<()> {
        let option = interaction.data.options.first().ok_or(anyhow!("No subcommand found"))?;
        let content = match option.name.as_str() {
            "add" => {
                let name = string_option(subcommand_options(option)?, "name")?;
                let name = state.registry.add(&name)?;
                state.save()?;
                format!("{} added to the list", name)
            }
            "remove" => {
                let name = string_option(subcommand_options(option)?, "name")?;
                let name = state.registry.remove(&name)?;
                state.save()?;
                format!("{} has been removed (note that this does not remove preferences set for it)", name)
            }
            "list" => {
                if state.registry.is_empty() {
                    String::from("no games have been added yet")
                } else {
                    state.registry.games().collect::<Vec<_>>().join("\n")
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
