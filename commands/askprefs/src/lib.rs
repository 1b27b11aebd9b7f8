use gob_shared::{
    anyhow::{anyhow, Result},
    serenity::all::*,
    unrated_queue, BotState, GobError, Preference, RatingMenu, UnorderedVec,
};

pub fn command() -> AskPrefsCommand {
    AskPrefsCommand
}

pub struct AskPrefsCommand;

fn prompt_text(game: &str) -> String {
    format!("what do you think of **{}**?", game)
}

fn rating_buttons() -> Vec<CreateActionRow> {
    let buttons = Preference::rateable()
        .map(|preference| {
            CreateButton::new(format!("askprefs:{}", preference.canonical_token()))
                .style(ButtonStyle::Secondary)
                .emoji(ReactionType::Unicode(preference.symbol().to_string()))
                .label(preference.display_name())
        })
        .collect();
    vec![CreateActionRow::Buttons(buttons)]
}

#[gob_shared::async_trait]
impl gob_shared::Command for AskPrefsCommand {
    fn register(&self) -> CreateCommand {
        let info = self.get_command_info();
        CreateCommand::new(info.name).description(info.description)
    }

    fn get_command_info(&self) -> gob_shared::CommandInfo {
        gob_shared::CommandInfo {
            name: String::from("askprefs"),
            description: String::from("Walk through your unrated games and set a preference for each"),
            options: UnorderedVec::from(vec![]),
        }
    }

    async fn application_command(&mut self, ctx: &Context, interaction: &mut CommandInteraction, state: &mut BotState) -> Result<()> {
        let user = interaction.user.id;
        if state.menus.contains_key(&user) {
            return Err(GobError::MenuAlreadyActive.into());
        }

        // checked up front so a fully rated list never opens a menu
        let first = match unrated_queue(&state.registry, &state.preferences, user).into_iter().next() {
            Some(game) => game,
            None => {
                interaction
                    .create_response(&ctx.http, {
                        CreateInteractionResponse::Message(CreateInteractionResponseMessage::default().content("All games rated").ephemeral(true))
                    })
                    .await?;
                return Ok(());
            }
        };

        interaction
            .create_response(&ctx.http, {
                CreateInteractionResponse::Message(CreateInteractionResponseMessage::default().content(prompt_text(&first)).components(rating_buttons()))
            })
            .await?;
        let message = interaction.get_response(&ctx.http).await?;

        let mut menu = RatingMenu::new(user, message.id);
        menu.advance(&state.registry, &state.preferences);
        state.begin_menu(menu)?;
        Ok(())
    }

    async fn message_component(&mut self, ctx: &Context, interaction: &mut ComponentInteraction, state: &mut BotState) -> Result<()> {
        let user = interaction.user.id;
        let token = interaction.data.custom_id.split(':').nth(1).ok_or(anyhow!("Invalid action id"))?.to_owned();

        let menu = state.menus.get(&user).ok_or(anyhow!("you do not have a rating menu open, start one with /askprefs"))?;
        if menu.message() != interaction.message.id {
            return Err(anyhow!("that rating menu is not yours or is no longer active"));
        }

        // a token the table doesn't know is ignored rather than rejected, a
        // stray click must not wreck the menu
        let preference = match Preference::from_token(&token) {
            Some(preference) => preference,
            None => {
                interaction.defer(&ctx.http).await?;
                return Ok(());
            }
        };

        if let Some(game) = menu.current_game().map(str::to_owned) {
            state.preferences.set(user, &game, preference);
            state.save()?;
        }

        let next = {
            let menu = state.menus.get_mut(&user).ok_or(anyhow!("rating menu disappeared mid answer"))?;
            menu.advance(&state.registry, &state.preferences).map(str::to_owned)
        };

        interaction.defer(&ctx.http).await?;
        match next {
            Some(game) => {
                interaction.edit_response(&ctx.http, EditInteractionResponse::default().content(prompt_text(&game))).await?;
            }
            None => {
                state.end_menu(user);
                interaction.edit_response(&ctx.http, EditInteractionResponse::default().content("All games rated").components(vec![])).await?;
            }
        }
        Ok(())
    }
}
