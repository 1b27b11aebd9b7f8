use gob_shared::{
    anyhow::{anyhow, Result},
    serenity::all::*,
    string_option, subcommand_options, BotState, GobError, Preference, UnorderedVec,
};

pub fn command() -> PreferencesCommand {
    PreferencesCommand
}

pub struct PreferencesCommand;

#[gob_shared::async_trait]
impl gob_shared::Command for PreferencesCommand {
    fn register(&self) -> CreateCommand {
        let info = self.get_command_info();
        CreateCommand::new(info.name).description(info.description).set_options(vec![
            CreateCommandOption::new(CommandOptionType::SubCommand, "set", "Set your preference for a specific game")
                .add_sub_option({
                    let mut preference = CreateCommandOption::new(CommandOptionType::String, "preference", "How you feel about the game").required(true);
                    for choice in Preference::rateable() {
                        preference = preference.add_string_choice(choice.display_name(), choice.canonical_token());
                    }
                    preference.add_string_choice(Preference::Unrated.display_name(), Preference::Unrated.canonical_token())
                })
                .add_sub_option(CreateCommandOption::new(CommandOptionType::String, "game", "The game to rate").required(true)),
            CreateCommandOption::new(CommandOptionType::SubCommand, "list", "List all of the preferences you have set"),
            CreateCommandOption::new(CommandOptionType::SubCommand, "unrated", "List all of the games you haven't rated yet"),
        ])
    }

    fn get_command_info(&self) -> gob_shared::CommandInfo {
        gob_shared::CommandInfo {
            name: String::from("preferences"),
            description: String::from("Manage your game preferences"),
            options: UnorderedVec::from(vec![
                gob_shared::CommandOption {
                    name: String::from("set"),
                    description: String::from("Set your preference for a specific game"),
                    option_type: gob_shared::CommandOptionType::SubCommand(UnorderedVec::from(vec![
                        gob_shared::CommandOption {
                            name: String::from("preference"),
                            description: String::from("How you feel about the game"),
                            option_type: gob_shared::CommandOptionType::String,
                            choices: UnorderedVec::from(
                                Preference::rateable()
                                    .chain(std::iter::once(Preference::Unrated))
                                    .map(|preference| gob_shared::CommandOptionChoice {
                                        name: String::from(preference.display_name()),
                                        value: String::from(preference.canonical_token()),
                                    })
                                    .collect::<Vec<_>>(),
                            ),
                            required: true,
                        },
                        gob_shared::CommandOption {
                            name: String::from("game"),
                            description: String::from("The game to rate"),
                            option_type: gob_shared::CommandOptionType::String,
                            choices: UnorderedVec::from(vec![]),
                            required: true,
                        },
                    ])),
                    choices: UnorderedVec::from(vec![]),
                    required: false,
                },
                gob_shared::CommandOption {
                    name: String::from("list"),
                    description: String::from("List all of the preferences you have set"),
                    option_type: gob_shared::CommandOptionType::SubCommand(UnorderedVec::from(vec![])),
                    choices: UnorderedVec::from(vec![]),
                    required: false,
                },
                gob_shared::CommandOption {
                    name: String::from("unrated"),
                    description: String::from("List all of the games you haven't rated yet"),
                    option_type: gob_shared::CommandOptionType::SubCommand(UnorderedVec::from(vec![])),
                    choices: UnorderedVec::from(vec![]),
                    required: false,
                },
            ]),
        }
    }

    async fn application_command(&mut self, ctx: &Context, interaction: &mut CommandInteraction, state: &mut BotState) -> Result<()> {
        let user = interaction.user.id;
        let option = interaction.data.options.first().ok_or(anyhow!("No subcommand found"))?;
        let content = match option.name.as_str() {
            "set" => {
                let options = subcommand_options(option)?;
                let token = string_option(options, "preference")?;
                let preference = Preference::from_token(&token).ok_or(GobError::PreferenceNotRecognized(token))?;
                let game = state.registry.validate(&string_option(options, "game")?)?;

                state.preferences.set(user, &game, preference);
                state.save()?;
                format!("preference for {} set to {}", game, preference)
            }
            "list" => match state.preferences.ratings(user) {
                None => String::from("you have not rated any games"),
                Some(ratings) => {
                    let mut sections = Vec::new();
                    for preference in Preference::all() {
                        let games: Vec<&str> = ratings
                            .iter()
                            .filter(|(_, rating)| **rating == preference)
                            .map(|(game, _)| game.as_str())
                            .collect();
                        if games.is_empty() {
                            continue;
                        }
                        sections.push(format!("**{}**\n{}", preference.display_name(), games.join("\n")));
                    }
                    if sections.is_empty() {
                        String::from("no games have been rated")
                    } else {
                        sections.join("\n")
                    }
                }
            },
            "unrated" => {
                if !state.preferences.has_any(user) {
                    // never interacted, same answer as a full game list
                    if state.registry.is_empty() {
                        String::from("no games have been added yet")
                    } else {
                        state.registry.games().collect::<Vec<_>>().join("\n")
                    }
                } else {
                    let unrated: Vec<&str> = state
                        .registry
                        .games()
                        .filter(|game| state.preferences.get(user, game) == Preference::Unrated)
                        .collect();
                    if unrated.is_empty() {
                        String::from("all games have been rated")
                    } else {
                        unrated.join("\n")
                    }
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
