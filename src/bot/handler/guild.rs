use chrono::Utc;
use serenity::all::{ChannelId, Context, Guild, PartialGuild};

use crate::{
    config::Config,
    service::greeting::{boost_increased, boost_message, find_todays_booster},
};

/// Handles the guild_update event
///
/// When the boost count went up, thanks the member whose boost started today. The
/// previous count comes from the cache; without it no boost can be detected.
pub async fn handle_guild_update(
    config: &Config,
    ctx: Context,
    old_data_if_available: Option<Guild>,
    new_data: PartialGuild,
) {
    let Some(channel_id) = config.greeting.boost_channel_id else {
        return;
    };
    let Some(old) = old_data_if_available else {
        return;
    };

    if !boost_increased(
        old.premium_subscription_count,
        new_data.premium_subscription_count,
    ) {
        return;
    }

    let members = match new_data.id.members(&ctx.http, None, None).await {
        Ok(members) => members,
        Err(e) => {
            tracing::error!("Failed to fetch members of {} for boost detection: {:?}", new_data.id, e);
            return;
        }
    };

    let today = Utc::now().date_naive();
    let booster = find_todays_booster(
        members.iter().map(|member| {
            (
                member.user.id.get(),
                member
                    .premium_since
                    .and_then(|since| chrono::DateTime::from_timestamp(since.unix_timestamp(), 0)),
            )
        }),
        today,
    );

    let Some(user_id) = booster else {
        tracing::debug!("Boost count of {} increased but no booster from today found", new_data.id);
        return;
    };

    if let Err(e) = ChannelId::new(channel_id)
        .send_message(&ctx.http, boost_message(user_id))
        .await
    {
        tracing::error!("Failed to send boost message for {}: {:?}", user_id, e);
    } else {
        tracing::info!("Thanked {} for boosting {}", user_id, new_data.id);
    }
}
