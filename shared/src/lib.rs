use serenity::all::{
    CommandDataOption, CommandDataOptionValue, CommandInteraction, ComponentInteraction, Context, CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage,
};

pub use anyhow;
pub use async_trait::async_trait;
pub use colored;
pub use log;
pub use serde;
pub use serde_json;
pub use serenity;

mod error;
mod menu;
mod preference;
mod prefstore;
mod registry;
mod scoring;
mod state;
mod store;

pub use error::GobError;
pub use menu::{unrated_queue, RatingMenu};
pub use preference::Preference;
pub use prefstore::PreferenceStore;
pub use registry::{normalize_game_name, GameProperties, GameRegistry, PlayerRange, PropertyKey};
pub use scoring::{suggest, GameScore, Participant, SuggestionWeights};
pub use state::BotState;
pub use store::DataStore;

use colored::*;

use anyhow::{anyhow, Result};

#[async_trait::async_trait]
pub trait Command
where
    Self: Send + Sync,
{
    fn get_name(&self) -> String {
        self.get_command_info().name
    }
    fn register(&self) -> CreateCommand;
    fn get_command_info(&self) -> CommandInfo;
    async fn application_command(&mut self, ctx: &Context, interaction: &mut CommandInteraction, _state: &mut BotState) -> Result<()> {
        log::error!("Interaction handler not implemented for {}", self.get_name().blue());
        if let Err(e) = interaction
            .create_response(&ctx.http, {
                CreateInteractionResponse::Message(CreateInteractionResponseMessage::default().content(format!("Interaction handler not implemented for `{}`", self.get_name())).ephemeral(true))
            })
            .await
        {
            log::error!("Error creating interaction response: {}", e);
        }
        Ok(())
    }
    async fn message_component(&mut self, ctx: &Context, interaction: &mut ComponentInteraction, _state: &mut BotState) -> Result<()> {
        log::error!("Message component handler not implemented for {}", self.get_name().blue());
        if let Err(e) = interaction
            .create_response(&ctx.http, {
                CreateInteractionResponse::Message(CreateInteractionResponseMessage::default().content(format!("Message component handler not implemented for `{}`", self.get_name())).ephemeral(true))
            })
            .await
        {
            log::error!("Error creating interaction response: {}", e);
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq)]
pub struct CommandInfo {
    pub name: String,
    pub description: String,
    pub options: UnorderedVec<CommandOption>,
}

impl From<serenity::model::application::Command> for CommandInfo {
    fn from(command: serenity::model::application::Command) -> Self {
        Self {
            name: command.name,
            description: command.description,
            options: command.options.into_iter().map(CommandOption::from).collect::<Vec<_>>().into(),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct CommandOption {
    pub name: String,
    pub description: String,
    pub option_type: CommandOptionType,
    pub choices: UnorderedVec<CommandOptionChoice>,
    pub required: bool,
}

impl From<serenity::model::application::CommandOption> for CommandOption {
    fn from(option: serenity::model::application::CommandOption) -> Self {
        let sub_options: UnorderedVec<CommandOption> = option.options.into_iter().map(CommandOption::from).collect::<Vec<_>>().into();
        let option_type = match option.kind {
            serenity::model::application::CommandOptionType::SubCommand => CommandOptionType::SubCommand(sub_options),
            serenity::model::application::CommandOptionType::SubCommandGroup => CommandOptionType::SubCommandGroup(sub_options),
            serenity::model::application::CommandOptionType::Integer => CommandOptionType::Integer,
            serenity::model::application::CommandOptionType::User => CommandOptionType::User,
            _ => CommandOptionType::String,
        };
        Self {
            name: option.name,
            description: option.description,
            option_type,
            choices: option
                .choices
                .into_iter()
                .map(|choice| CommandOptionChoice {
                    name: choice.name,
                    value: choice.value.as_str().map(String::from).unwrap_or_else(|| choice.value.to_string()),
                })
                .collect::<Vec<_>>()
                .into(),
            required: option.required,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum CommandOptionType {
    String,
    Integer,
    User,
    SubCommand(UnorderedVec<CommandOption>),
    SubCommandGroup(UnorderedVec<CommandOption>),
}

#[derive(Debug, PartialEq)]
pub struct CommandOptionChoice {
    pub name: String,
    pub value: String,
}

/// Discord returns command options in whatever order it likes, comparing for
/// re-registration has to ignore ordering.
#[derive(Debug, Clone, Default)]
pub struct UnorderedVec<T>(Vec<T>);

impl<T: PartialEq> PartialEq for UnorderedVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().all(|item| other.0.contains(item))
    }
}

impl<T> From<Vec<T>> for UnorderedVec<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T> UnorderedVec<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
}

pub fn subcommand_options(option: &CommandDataOption) -> Result<&[CommandDataOption]> {
    match &option.value {
        CommandDataOptionValue::SubCommand(options) | CommandDataOptionValue::SubCommandGroup(options) => Ok(options),
        other => Err(anyhow!("Expected SubCommand, got {:?}", other)),
    }
}

pub fn string_option(options: &[CommandDataOption], name: &str) -> Result<String> {
    match &options.iter().find(|option| option.name == name).ok_or_else(|| anyhow!("Missing option `{}`", name))?.value {
        CommandDataOptionValue::String(value) => Ok(value.clone()),
        other => Err(anyhow!("Expected String for `{}`, got {:?}", name, other)),
    }
}

pub fn integer_option(options: &[CommandDataOption], name: &str) -> Result<Option<i64>> {
    match options.iter().find(|option| option.name == name) {
        None => Ok(None),
        Some(option) => match option.value {
            CommandDataOptionValue::Integer(value) => Ok(Some(value)),
            ref other => Err(anyhow!("Expected Integer for `{}`, got {:?}", name, other)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::UnorderedVec;

    #[test]
    fn unordered_vec_ignores_ordering() {
        let a = UnorderedVec::from(vec![1, 2, 3]);
        let b = UnorderedVec::from(vec![3, 1, 2]);
        assert_eq!(a, b);
    }

    #[test]
    fn unordered_vec_compares_length() {
        let a = UnorderedVec::from(vec![1, 2]);
        let b = UnorderedVec::from(vec![1, 2, 2]);
        assert_ne!(a, b);
    }
}
