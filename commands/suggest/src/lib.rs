use gob_shared::{
    anyhow::{anyhow, Result},
    integer_option,
    serenity::all::*,
    string_option, suggest, BotState, GameScore, Participant, SuggestionWeights, UnorderedVec,
};

pub fn suggest_command() -> SuggestCommand {
    SuggestCommand
}

pub fn suggest_for_command() -> SuggestForCommand {
    SuggestForCommand
}

const DEFAULT_COUNT: usize = 5;

fn requested_count(options: &[CommandDataOption]) -> Result<usize> {
    Ok(integer_option(options, "count")?.unwrap_or(DEFAULT_COUNT as i64).max(1) as usize)
}

fn format_suggestions(scores: &[GameScore]) -> String {
    if scores.is_empty() {
        return String::from("no games have been added yet");
    }
    scores
        .iter()
        .map(|entry| {
            let mut line = format!("`{:<4}`| {}", entry.score, entry.game);
            if !entry.missing.is_empty() {
                line.push_str(&format!(" (note: {} has/have not rated)", entry.missing.join(", ")));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

async fn resolve_participants(ctx: &Context, ids: Vec<UserId>, skip_bots: bool) -> Result<Vec<Participant>> {
    let mut participants = Vec::new();
    for id in ids {
        let user = ctx.http.get_user(id).await?;
        if user.bot {
            if skip_bots {
                continue;
            }
            return Err(anyhow!("{} is a bot, bots do not get a vote", user.name));
        }
        participants.push(Participant::new(id, user.name));
    }
    Ok(participants)
}

fn parse_user_list(raw: &str) -> Result<Vec<UserId>> {
    let mut ids = Vec::new();
    for token in raw.split_whitespace() {
        let trimmed = token.trim_start_matches("<@!").trim_start_matches("<@").trim_end_matches('>');
        let id: u64 = trimmed.parse().map_err(|_| anyhow!("`{}` does not look like a user mention", token))?;
        if id == 0 {
            return Err(anyhow!("`{}` does not look like a user mention", token));
        }
        ids.push(UserId::new(id));
    }
    if ids.is_empty() {
        return Err(anyhow!("list at least one user to suggest for"));
    }
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

pub struct SuggestCommand;

#[gob_shared::async_trait]
impl gob_shared::Command for SuggestCommand {
    fn register(&self) -> CreateCommand {
        let info = self.get_command_info();
        CreateCommand::new(info.name)
            .description(info.description)
            .set_options(vec![CreateCommandOption::new(CommandOptionType::Integer, "count", "How many suggestions to show (default 5)").required(false)])
    }

    fn get_command_info(&self) -> gob_shared::CommandInfo {
        gob_shared::CommandInfo {
            name: String::from("suggest"),
            description: String::from("Suggest a game to play based off of who is in your voice chat"),
            options: UnorderedVec::from(vec![gob_shared::CommandOption {
                name: String::from("count"),
                description: String::from("How many suggestions to show (default 5)"),
                option_type: gob_shared::CommandOptionType::Integer,
                choices: UnorderedVec::from(vec![]),
                required: false,
            }]),
        }
    }

    async fn application_command(&mut self, ctx: &Context, interaction: &mut CommandInteraction, state: &mut BotState) -> Result<()> {
        let count = requested_count(&interaction.data.options)?;
        let guild_id = interaction.guild_id.ok_or(anyhow!("this command only works in a server"))?;

        // collect ids inside the block, the cache reference cannot be held
        // across an await
        let member_ids: Vec<UserId> = {
            let guild = ctx.cache.guild(guild_id).ok_or(anyhow!("server not cached yet, try again in a moment"))?;
            let channel = guild
                .voice_states
                .get(&interaction.user.id)
                .and_then(|voice| voice.channel_id)
                .ok_or(anyhow!("you must be in a vc to use this command"))?;
            guild
                .voice_states
                .iter()
                .filter(|(_, voice)| voice.channel_id == Some(channel))
                .map(|(id, _)| *id)
                .collect()
        };

        let participants = resolve_participants(ctx, member_ids, true).await?;
        let scores = suggest(&state.registry, &state.preferences, &participants, count, &SuggestionWeights::default())?;

        interaction
            .create_response(&ctx.http, {
                CreateInteractionResponse::Message(CreateInteractionResponseMessage::default().content(format_suggestions(&scores)))
            })
            .await?;
        Ok(())
    }
}

pub struct SuggestForCommand;

#[gob_shared::async_trait]
impl gob_shared::Command for SuggestForCommand {
    fn register(&self) -> CreateCommand {
        let info = self.get_command_info();
        CreateCommand::new(info.name).description(info.description).set_options(vec![
            CreateCommandOption::new(CommandOptionType::String, "users", "The users to suggest for, as mentions or ids").required(true),
            CreateCommandOption::new(CommandOptionType::Integer, "count", "How many suggestions to show (default 5)").required(false),
        ])
    }

    fn get_command_info(&self) -> gob_shared::CommandInfo {
        gob_shared::CommandInfo {
            name: String::from("suggestfor"),
            description: String::from("Suggest a game for the users you list"),
            options: UnorderedVec::from(vec![
                gob_shared::CommandOption {
                    name: String::from("users"),
                    description: String::from("The users to suggest for, as mentions or ids"),
                    option_type: gob_shared::CommandOptionType::String,
                    choices: UnorderedVec::from(vec![]),
                    required: true,
                },
                gob_shared::CommandOption {
                    name: String::from("count"),
                    description: String::from("How many suggestions to show (default 5)"),
                    option_type: gob_shared::CommandOptionType::Integer,
                    choices: UnorderedVec::from(vec![]),
                    required: false,
                },
            ]),
        }
    }

    async fn application_command(&mut self, ctx: &Context, interaction: &mut CommandInteraction, state: &mut BotState) -> Result<()> {
        let count = requested_count(&interaction.data.options)?;
        let ids = parse_user_list(&string_option(&interaction.data.options, "users")?)?;

        let participants = resolve_participants(ctx, ids, false).await?;
        let scores = suggest(&state.registry, &state.preferences, &participants, count, &SuggestionWeights::default())?;

        interaction
            .create_response(&ctx.http, {
                CreateInteractionResponse::Message(CreateInteractionResponseMessage::default().content(format_suggestions(&scores)))
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_lists_accept_mentions_and_raw_ids() {
        let ids = parse_user_list("<@123> <@!456> 789").unwrap();
        assert_eq!(ids, vec![UserId::new(123), UserId::new(456), UserId::new(789)]);
    }

    #[test]
    fn user_lists_dedupe() {
        let ids = parse_user_list("<@123> 123").unwrap();
        assert_eq!(ids, vec![UserId::new(123)]);
    }

    #[test]
    fn garbage_user_lists_are_rejected() {
        assert!(parse_user_list("").is_err());
        assert!(parse_user_list("everyone").is_err());
        assert!(parse_user_list("<@>").is_err());
    }

    #[test]
    fn suggestion_lines_carry_score_game_and_missing_note() {
        let scores = vec![
            GameScore {
                game: String::from("catan"),
                score: 3,
                missing: vec![],
            },
            GameScore {
                game: String::from("azul"),
                score: -5,
                missing: vec![String::from("alice"), String::from("bob")],
            },
        ];
        let rendered = format_suggestions(&scores);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "`3   `| catan");
        assert_eq!(lines[1], "`-5  `| azul (note: alice, bob has/have not rated)");
    }

    #[test]
    fn empty_suggestions_get_a_placeholder() {
        assert_eq!(format_suggestions(&[]), "no games have been added yet");
    }
}
