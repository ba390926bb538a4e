use sea_orm::DatabaseConnection;
use serenity::all::{
    Colour, CommandInteraction, ComponentInteraction, Context, CreateActionRow, CreateEmbed,
    CreateInputText, CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage,
    CreateModal, CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption, InputTextStyle,
    ModalInteraction,
};

use crate::{
    bot::{
        custom_id::{self, input},
        interaction::{ephemeral, modal_value, selected_value},
    },
    error::AppError,
    model::faq::{FaqEntry, MAX_QUESTION_LENGTH},
    service::faq::{format_answer, option_label, FaqService, EMPTY_OPTION_VALUE},
};

const VANISHED_ENTRY: &str = "❌ This FAQ entry no longer exists.";

/// Select menu over the entries, or a disabled placeholder when there are none.
fn entry_select(custom_id: &str, entries: &[FaqEntry], placeholder: &str) -> CreateActionRow {
    let menu = if entries.is_empty() {
        CreateSelectMenu::new(
            custom_id,
            CreateSelectMenuKind::String {
                options: vec![CreateSelectMenuOption::new(
                    "No entries available",
                    EMPTY_OPTION_VALUE,
                )],
            },
        )
        .placeholder("No entries available")
        .disabled(true)
    } else {
        let options = entries
            .iter()
            .map(|entry| CreateSelectMenuOption::new(option_label(entry), entry.id.to_string()))
            .collect();

        CreateSelectMenu::new(custom_id, CreateSelectMenuKind::String { options })
            .placeholder(placeholder)
    };

    CreateActionRow::SelectMenu(menu)
}

/// Builds the public FAQ panel from the current entries.
pub async fn panel_message(db: &DatabaseConnection) -> Result<CreateMessage, AppError> {
    let entries = FaqService::new(db).selectable().await?;

    let embed = CreateEmbed::new()
        .title("❓ Frequently asked questions")
        .description("Pick a question below to see its answer.")
        .colour(Colour::BLUE);

    Ok(CreateMessage::new().embed(embed).components(vec![entry_select(
        custom_id::FAQ_SELECT,
        &entries,
        "Choose a question",
    )]))
}

/// `/add-faq`: opens the entry modal.
pub async fn open_add_modal(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let modal = CreateModal::new(custom_id::FAQ_ADD_MODAL, "Add FAQ entry").components(vec![
        CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Short, "Question", input::FAQ_QUESTION)
                .max_length(MAX_QUESTION_LENGTH as u16)
                .required(true),
        ),
        CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Paragraph, "Answer", input::FAQ_ANSWER)
                .required(true),
        ),
    ]);

    command
        .create_response(&ctx.http, CreateInteractionResponse::Modal(modal))
        .await?;

    Ok(())
}

pub async fn submit(
    db: &DatabaseConnection,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let entry = FaqService::new(db)
        .add(
            &modal_value(modal, input::FAQ_QUESTION),
            &modal_value(modal, input::FAQ_ANSWER),
            modal.user.id.get(),
        )
        .await?;

    tracing::info!("FAQ entry {} added by {}", entry.id, modal.user.id);

    modal
        .create_response(
            &ctx.http,
            ephemeral(format!("✅ FAQ entry **{}** was added.", entry.question)),
        )
        .await?;

    Ok(())
}

/// `/delete-faq`: ephemeral select of the entries to delete.
pub async fn show_delete_select(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let entries = FaqService::new(db).selectable().await?;

    if entries.is_empty() {
        command
            .create_response(&ctx.http, ephemeral("There are no FAQ entries to delete."))
            .await?;
        return Ok(());
    }

    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content("Choose the entry to delete:")
                    .components(vec![entry_select(
                        custom_id::FAQ_DELETE_SELECT,
                        &entries,
                        "Entry to delete",
                    )])
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

pub async fn delete(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let value = selected_value(component).unwrap_or(EMPTY_OPTION_VALUE);

    let content = match FaqService::new(db).remove(value).await? {
        Some(entry) => {
            tracing::info!("FAQ entry {} deleted by {}", entry.id, component.user.id);
            format!("🗑️ FAQ entry **{}** was deleted.", entry.question)
        }
        None => VANISHED_ENTRY.to_string(),
    };

    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content(content)
                    .components(vec![]),
            ),
        )
        .await?;

    Ok(())
}

/// Shows the selected entry to the member.
pub async fn show_answer(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let value = selected_value(component).unwrap_or(EMPTY_OPTION_VALUE);

    let content = match FaqService::new(db).get(value).await? {
        Some(entry) => format_answer(&entry),
        None => VANISHED_ENTRY.to_string(),
    };

    component.create_response(&ctx.http, ephemeral(content)).await?;

    Ok(())
}
