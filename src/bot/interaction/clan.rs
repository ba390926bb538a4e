//! Clan panels, the review buttons and the join browser.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::all::{
    ButtonStyle, ChannelId, ChannelType, Colour, ComponentInteraction, Context, CreateActionRow,
    CreateButton, CreateChannel, CreateEmbed, CreateInputText, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, CreateMessage,
    CreateModal, EditInteractionResponse, EditRole, GuildId, InputTextStyle, ModalInteraction,
    Permissions, RoleId, UserId,
};

use crate::{
    bot::{
        custom_id::{self, input},
        interaction::{
            ephemeral, has_permission, member_permissions, modal_value, rules::grant_role,
            NO_PERMISSION,
        },
    },
    config::Config,
    error::AppError,
    model::clan::{Clan, ClanField, ClanResources},
    service::clan::{
        admin_news_channel_name, admin_role_name, category_name, chat_channel_name,
        clan_overwrites, color_value, member_role_name, request_title, stage_channel_name,
        tag_from_title, voice_channel_name, ClanRequestInput, ClanService, JoinOutcome,
    },
};

const ROLE_REASON: &str = "Clan accepted";

pub fn main_panel() -> CreateMessage {
    let embed = CreateEmbed::new()
        .title("⚔️ Create or join a clan")
        .description("Choose an action to create a clan or join an existing one!")
        .colour(Colour::BLUE);

    let buttons = CreateActionRow::Buttons(vec![
        CreateButton::new(custom_id::CLAN_CREATE)
            .label("Create clan")
            .style(ButtonStyle::Primary)
            .emoji('✏'),
        CreateButton::new(custom_id::CLAN_JOIN_LIST)
            .label("Join clan")
            .style(ButtonStyle::Secondary)
            .emoji('🤝'),
    ]);

    CreateMessage::new().embed(embed).components(vec![buttons])
}

/// Edit menu sent by `clan edit`, one button per editable field.
pub fn edit_panel(clan: &Clan) -> CreateMessage {
    let embed = CreateEmbed::new()
        .title(format!("🛠️ Edit clan: {} [{}]", clan.name, clan.tag))
        .description("Choose which value you want to change.")
        .colour(Colour::GOLD);

    let buttons = ClanField::ALL
        .iter()
        .map(|field| {
            CreateButton::new(custom_id::with_arg(custom_id::CLAN_EDIT, field.key()))
                .label(format!("Change {}", field.label()))
                .style(ButtonStyle::Secondary)
        })
        .collect();

    CreateMessage::new()
        .embed(embed)
        .components(vec![CreateActionRow::Buttons(buttons)])
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn request_embed(clan: &Clan) -> CreateEmbed {
    CreateEmbed::new()
        .title(request_title(clan))
        .colour(Colour::RED)
        .field("Owner", format!("<@{}>", clan.owner_id), false)
        .field("Tag", &clan.tag, true)
        .field("Color", &clan.color, true)
        .field("Short description", &clan.short_desc, false)
        .field("Approval required", yes_no(clan.approval_required), true)
        .field("Full description", &clan.full_desc, false)
}

fn review_buttons(tag: &str) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(custom_id::with_arg(custom_id::CLAN_APPROVE, tag))
            .label("Accept")
            .style(ButtonStyle::Success)
            .emoji('✅'),
        CreateButton::new(custom_id::with_arg(custom_id::CLAN_REJECT, tag))
            .label("Reject")
            .style(ButtonStyle::Danger)
            .emoji('❌'),
    ])
}

/// Whether the back and next buttons of the browser are usable on page `index`.
pub fn page_navigation(index: u64, total: u64) -> (bool, bool) {
    (index > 0, index + 1 < total)
}

fn browse_embed(clan: &Clan, index: u64, total: u64) -> CreateEmbed {
    let colour = color_value(&clan.color).map(Colour::new).unwrap_or(Colour::BLUE);

    CreateEmbed::new()
        .title(format!(
            "**[{}]** {} (clan {} of {})",
            clan.tag,
            clan.name,
            index + 1,
            total
        ))
        .description(format!("*{}*", clan.short_desc))
        .colour(colour)
        .field("Approval required", yes_no(clan.approval_required), true)
        .field("Full description", &clan.full_desc, false)
}

fn browse_buttons(clan: &Clan, index: u64, total: u64) -> CreateActionRow {
    let (has_back, has_next) = page_navigation(index, total);

    CreateActionRow::Buttons(vec![
        CreateButton::new(custom_id::with_arg(
            custom_id::CLAN_BROWSE,
            index.saturating_sub(1),
        ))
        .emoji('◀')
        .style(ButtonStyle::Secondary)
        .disabled(!has_back),
        CreateButton::new(custom_id::with_arg(custom_id::CLAN_BROWSE_JOIN, &clan.tag))
            .label("Join")
            .style(ButtonStyle::Success)
            .emoji('🤝'),
        CreateButton::new(custom_id::with_arg(custom_id::CLAN_BROWSE, index + 1))
            .emoji('▶')
            .style(ButtonStyle::Secondary)
            .disabled(!has_next),
    ])
}

/// Create button: refuses existing owners, otherwise opens the request modal.
pub async fn open_request_modal(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    ClanService::new(db)
        .ensure_can_request(component.user.id.get())
        .await?;

    let modal = CreateModal::new(custom_id::CLAN_CREATE_MODAL, "✏️ Create clan").components(vec![
        CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Short, "Clan name", input::CLAN_NAME)
                .placeholder("e.g. The Miners")
                .required(true),
        ),
        CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Short, "Clan tag (max. 5 characters)", input::CLAN_TAG)
                .placeholder("e.g. MC_R")
                .max_length(5)
                .required(true),
        ),
        CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Short, "Color (HEX code)", input::CLAN_COLOR)
                .placeholder("#RRGGBB")
                .max_length(7)
                .required(true),
        ),
        CreateActionRow::InputText(
            CreateInputText::new(
                InputTextStyle::Paragraph,
                "Description (goals, plans etc.)",
                input::CLAN_DESCRIPTION,
            )
            .required(true),
        ),
        CreateActionRow::InputText(
            CreateInputText::new(
                InputTextStyle::Short,
                "Approval required? (yes/no)",
                input::CLAN_APPROVAL,
            )
            .placeholder("yes or no")
            .max_length(4)
            .required(true),
        ),
    ]);

    component
        .create_response(&ctx.http, CreateInteractionResponse::Modal(modal))
        .await?;

    Ok(())
}

pub async fn submit_request(
    db: &DatabaseConnection,
    config: &Config,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let request = ClanRequestInput {
        name: modal_value(modal, input::CLAN_NAME),
        tag: modal_value(modal, input::CLAN_TAG),
        color: modal_value(modal, input::CLAN_COLOR),
        description: modal_value(modal, input::CLAN_DESCRIPTION),
        approval: modal_value(modal, input::CLAN_APPROVAL),
    };

    let clan = ClanService::new(db)
        .request(request, modal.user.id.get(), Utc::now())
        .await?;

    match config.clan.admin_channel_id {
        Some(channel_id) => {
            ChannelId::new(channel_id)
                .send_message(
                    &ctx.http,
                    CreateMessage::new()
                        .embed(request_embed(&clan))
                        .components(vec![review_buttons(&clan.tag)]),
                )
                .await?;
        }
        None => tracing::warn!(
            "CLAN_ADMIN_CHANNEL_ID is not set, clan request {} has no review message",
            clan.tag
        ),
    }

    tracing::info!("Clan {} requested by {}", clan.tag, clan.owner_id);

    modal
        .create_response(
            &ctx.http,
            ephemeral(format!(
                "✅ Your clan **{}** was submitted for review! You will be notified.",
                clan.name
            )),
        )
        .await?;

    Ok(())
}

/// Resolves the tag of a review message from the button or, for older messages,
/// from the embed title.
fn review_tag(component: &ComponentInteraction, arg: Option<&str>) -> Option<String> {
    arg.map(str::to_string).or_else(|| {
        component
            .message
            .embeds
            .first()
            .and_then(|embed| embed.title.as_deref())
            .and_then(tag_from_title)
    })
}

/// Replaces the review message with a plain notice.
async fn finish_review(
    ctx: &Context,
    component: &ComponentInteraction,
    content: String,
) -> Result<(), AppError> {
    component
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new()
                .content(content)
                .embeds(vec![])
                .components(vec![]),
        )
        .await?;

    Ok(())
}

/// Rewrites the review embed with the decision.
fn decided_embed(
    component: &ComponentInteraction,
    title: String,
    colour: Colour,
    field: &str,
) -> CreateEmbed {
    let embed = component
        .message
        .embeds
        .first()
        .cloned()
        .map(CreateEmbed::from)
        .unwrap_or_default();

    embed
        .title(title)
        .colour(colour)
        .field(field, format!("<@{}>", component.user.id), false)
}

async fn notify_owner(ctx: &Context, owner_id: u64, content: String) {
    if let Err(e) = UserId::new(owner_id)
        .direct_message(&ctx.http, CreateMessage::new().content(content))
        .await
    {
        tracing::warn!("Failed to DM clan owner {}: {:?}", owner_id, e);
    }
}

/// Creates roles, category and channels of an accepted clan.
async fn create_structure(
    ctx: &Context,
    guild_id: GuildId,
    clan: &Clan,
) -> Result<ClanResources, AppError> {
    let roles = guild_id.roles(&ctx.http).await?;
    let find_role = |name: &str| {
        roles
            .values()
            .find(|role| role.name == name)
            .map(|role| role.id)
    };

    let admin_role = match find_role(&admin_role_name(&clan.tag)) {
        Some(id) => id,
        None => {
            let mut builder = EditRole::new().name(admin_role_name(&clan.tag));
            if let Some(colour) = color_value(&clan.color) {
                builder = builder.colour(colour);
            }
            guild_id.create_role(&ctx.http, builder).await?.id
        }
    };
    let member_role = match find_role(&member_role_name(&clan.tag)) {
        Some(id) => id,
        None => {
            guild_id
                .create_role(&ctx.http, EditRole::new().name(member_role_name(&clan.tag)))
                .await?
                .id
        }
    };

    let owner = UserId::new(clan.owner_id);
    grant_role(ctx, guild_id, owner, admin_role, ROLE_REASON).await?;
    grant_role(ctx, guild_id, owner, member_role, ROLE_REASON).await?;

    let overwrites = clan_overwrites(guild_id.get(), admin_role.get(), member_role.get());

    let category = guild_id
        .create_channel(
            &ctx.http,
            CreateChannel::new(category_name(&clan.tag))
                .kind(ChannelType::Category)
                .permissions(overwrites.base.clone()),
        )
        .await?;

    let chat = guild_id
        .create_channel(
            &ctx.http,
            CreateChannel::new(chat_channel_name(&clan.tag))
                .kind(ChannelType::Text)
                .category(category.id)
                .topic(format!("General chat of clan {}", clan.name))
                .permissions(overwrites.chat),
        )
        .await?;

    let admin_news = guild_id
        .create_channel(
            &ctx.http,
            CreateChannel::new(admin_news_channel_name(&clan.tag))
                .kind(ChannelType::Text)
                .category(category.id)
                .topic(format!(
                    "Important news and announcements for clan {} (admins/owner)",
                    clan.name
                ))
                .permissions(overwrites.admin_news),
        )
        .await?;

    guild_id
        .create_channel(
            &ctx.http,
            CreateChannel::new(stage_channel_name(&clan.tag))
                .kind(ChannelType::Stage)
                .category(category.id)
                .permissions(overwrites.stage),
        )
        .await?;

    let mut voice_channel_ids = Vec::new();
    for number in 1..=2 {
        let voice = guild_id
            .create_channel(
                &ctx.http,
                CreateChannel::new(voice_channel_name(&clan.tag, number))
                    .kind(ChannelType::Voice)
                    .category(category.id)
                    .permissions(overwrites.base.clone()),
            )
            .await?;
        voice_channel_ids.push(voice.id.get());
    }

    Ok(ClanResources {
        category_id: category.id.get(),
        admin_role_id: admin_role.get(),
        member_role_id: member_role.get(),
        general_text_id: chat.id.get(),
        admin_text_id: admin_news.id.get(),
        voice_channel_ids,
    })
}

async fn ensure_reviewer(ctx: &Context, component: &ComponentInteraction) -> Result<bool, AppError> {
    if has_permission(member_permissions(component), Permissions::MANAGE_ROLES) {
        return Ok(true);
    }

    component
        .create_response(&ctx.http, ephemeral(NO_PERMISSION))
        .await?;

    Ok(false)
}

/// Accept button of a review message.
///
/// Builds the clan structure; if that fails the request is discarded and the error
/// reported to the reviewer.
pub async fn approve(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
    arg: Option<&str>,
) -> Result<(), AppError> {
    if !ensure_reviewer(ctx, component).await? {
        return Ok(());
    }

    component
        .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
        .await?;

    let (Some(tag), Some(guild_id)) = (review_tag(component, arg), component.guild_id) else {
        return finish_review(
            ctx,
            component,
            "❌ Could not read the clan tag from the embed.".to_string(),
        )
        .await;
    };

    let service = ClanService::new(db);
    let clan = match service.pending(&tag).await {
        Ok(clan) => clan,
        Err(AppError::ClanErr(e)) => return finish_review(ctx, component, e.to_string()).await,
        Err(e) => return Err(e),
    };

    let resources = match create_structure(ctx, guild_id, &clan).await {
        Ok(resources) => resources,
        Err(e) => {
            tracing::error!("Failed to create structure of clan {}: {}", clan.tag, e);
            service.discard(&clan.tag).await?;
            component
                .create_followup(
                    &ctx.http,
                    CreateInteractionResponseFollowup::new()
                        .content(format!("❌ Failed to create the clan structure: `{}`", e))
                        .ephemeral(true),
                )
                .await?;
            return Ok(());
        }
    };

    let clan = service.accept(&clan.tag, &resources).await?;

    notify_owner(
        ctx,
        clan.owner_id,
        format!(
            "🎉 Your clan **{} [{}]** was accepted by the team! Your clan structure has been created.",
            clan.name, clan.tag
        ),
    )
    .await;

    let embed = decided_embed(
        component,
        format!("✅ Accepted: {} [{}]", clan.name, clan.tag),
        Colour::DARK_GREEN,
        "Accepted by",
    );
    component
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new()
                .embed(embed)
                .components(vec![]),
        )
        .await?;

    tracing::info!("Clan {} accepted by {}", clan.tag, component.user.id);

    Ok(())
}

pub async fn reject(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
    arg: Option<&str>,
) -> Result<(), AppError> {
    if !ensure_reviewer(ctx, component).await? {
        return Ok(());
    }

    component
        .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
        .await?;

    let Some(tag) = review_tag(component, arg) else {
        return finish_review(
            ctx,
            component,
            "❌ Could not read the clan tag from the embed.".to_string(),
        )
        .await;
    };

    let Some(clan) = ClanService::new(db).discard(&tag).await? else {
        return finish_review(ctx, component, format!("❌ Clan **{}** was not found.", tag)).await;
    };

    notify_owner(
        ctx,
        clan.owner_id,
        format!(
            "🚫 Your clan **{} [{}]** was rejected by the team.",
            clan.name, clan.tag
        ),
    )
    .await;

    let embed = decided_embed(
        component,
        format!("❌ Rejected: {} [{}]", clan.name, clan.tag),
        Colour::RED,
        "Rejected by",
    );
    component
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new()
                .embed(embed)
                .components(vec![]),
        )
        .await?;

    tracing::info!("Clan {} rejected by {}", clan.tag, component.user.id);

    Ok(())
}

/// Shows page `index` of the join browser, as a new ephemeral message or in place.
pub async fn browse(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
    index: u64,
    in_place: bool,
) -> Result<(), AppError> {
    let service = ClanService::new(db);
    let (mut clan, total) = service.browse(index).await?;
    let mut index = index;

    // Clans may have been removed since the page was rendered
    if clan.is_none() && total > 0 {
        index = total - 1;
        clan = service.browse(index).await?.0;
    }

    let Some(clan) = clan else {
        component
            .create_response(
                &ctx.http,
                ephemeral("❌ There are currently no clans you could join."),
            )
            .await?;
        return Ok(());
    };

    let message = CreateInteractionResponseMessage::new()
        .embed(browse_embed(&clan, index, total))
        .components(vec![browse_buttons(&clan, index, total)]);

    let response = if in_place {
        CreateInteractionResponse::UpdateMessage(message)
    } else {
        CreateInteractionResponse::Message(message.ephemeral(true))
    };

    component.create_response(&ctx.http, response).await?;

    Ok(())
}

pub async fn join(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
    arg: Option<&str>,
) -> Result<(), AppError> {
    let Some(tag) = arg else {
        return Ok(());
    };
    let user_id = component.user.id;

    let reply = match ClanService::new(db).join(tag, user_id.get()).await? {
        JoinOutcome::AlreadyMember => {
            format!("⚠️ You are already a member of clan **{}**.", tag)
        }
        JoinOutcome::RequestSent { owner_id } => {
            notify_owner(
                ctx,
                owner_id,
                format!("📨 <@{}> would like to join your clan **{}**.", user_id, tag),
            )
            .await;
            format!(
                "✅ Your join request for **{}** was sent to the owner (<@{}>).",
                tag, owner_id
            )
        }
        JoinOutcome::Joined { member_role_id } => {
            if let (Some(guild_id), Some(role_id)) = (component.guild_id, member_role_id) {
                grant_role(ctx, guild_id, user_id, RoleId::new(role_id), "Joined clan").await?;
            }
            tracing::info!("User {} joined clan {}", user_id, tag);
            format!("🎉 You joined clan **[{}]**!", tag)
        }
    };

    component.create_response(&ctx.http, ephemeral(reply)).await?;

    Ok(())
}

/// Field button of the edit menu: opens a modal prefilled with the current value.
pub async fn open_edit_modal(
    db: &DatabaseConnection,
    ctx: &Context,
    component: &ComponentInteraction,
    arg: Option<&str>,
) -> Result<(), AppError> {
    let Some(field) = arg.and_then(ClanField::from_key) else {
        return Ok(());
    };

    let clan = ClanService::new(db)
        .editable_clan(component.user.id.get(), Utc::now())
        .await?;

    let style = match field {
        ClanField::Description => InputTextStyle::Paragraph,
        _ => InputTextStyle::Short,
    };

    let modal = CreateModal::new(
        custom_id::with_arg(custom_id::CLAN_EDIT_MODAL, field.key()),
        "Edit clan value",
    )
    .components(vec![CreateActionRow::InputText(
        CreateInputText::new(style, format!("New value for {}", field.label()), input::VALUE)
            .value(field.current_value(&clan))
            .required(true),
    )]);

    component
        .create_response(&ctx.http, CreateInteractionResponse::Modal(modal))
        .await?;

    Ok(())
}

pub async fn submit_edit(
    db: &DatabaseConnection,
    ctx: &Context,
    modal: &ModalInteraction,
    arg: Option<&str>,
) -> Result<(), AppError> {
    let Some(field) = arg.and_then(ClanField::from_key) else {
        return Ok(());
    };

    let value = modal_value(modal, input::VALUE);
    let clan = ClanService::new(db)
        .edit(modal.user.id.get(), field, &value, Utc::now())
        .await?;

    if let (ClanField::Color, Some(guild_id), Some(role_id), Some(colour)) = (
        field,
        modal.guild_id,
        clan.admin_role_id,
        color_value(&clan.color),
    ) {
        if let Err(e) = guild_id
            .edit_role(&ctx.http, RoleId::new(role_id), EditRole::new().colour(colour))
            .await
        {
            tracing::warn!("Failed to recolor admin role of clan {}: {:?}", clan.tag, e);
        }
    }

    tracing::info!("Clan {} edited {} by {}", clan.tag, field.key(), modal.user.id);

    modal
        .create_response(
            &ctx.http,
            ephemeral(format!(
                "✅ **{}** of clan **{}** was updated to `{}`.",
                field.label(),
                clan.tag,
                field.current_value(&clan)
            )),
        )
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_is_disabled_at_the_ends() {
        assert_eq!(page_navigation(0, 1), (false, false));
        assert_eq!(page_navigation(0, 3), (false, true));
        assert_eq!(page_navigation(1, 3), (true, true));
        assert_eq!(page_navigation(2, 3), (true, false));
    }
}
