//! Server rules embeds and the accept panels.

use serenity::all::{Colour, CreateEmbed};

/// Language of the rules embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesLanguage {
    German,
    English,
}

impl RulesLanguage {
    pub const ALL: [RulesLanguage; 2] = [RulesLanguage::German, RulesLanguage::English];

    pub fn code(&self) -> &'static str {
        match self {
            Self::German => "de",
            Self::English => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|language| language.code() == code.trim().to_lowercase())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::German => "Deutsch",
            Self::English => "English",
        }
    }
}

/// Which accept panel a button belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptPanel {
    ServerRules,
    ClanRules,
}

impl AcceptPanel {
    pub fn embed(&self) -> CreateEmbed {
        match self {
            Self::ServerRules => CreateEmbed::new()
                .title("Regeln akzeptieren | Accept rules")
                .description(
                    "Wenn du die Regeln gelesen hast, akzeptiere sie bitte.\n\nIf you have read the rules, please accept them.",
                ),
            Self::ClanRules => CreateEmbed::new()
                .title("📚 Accept the clan rules")
                .description(
                    "Confirm here that you accept the clan rules in order to join or create a clan.",
                ),
        }
        .colour(Colour::DARK_GREEN)
    }

    pub fn already_accepted(&self) -> &'static str {
        match self {
            Self::ServerRules => "🤔 You cannot accept the rules because you already did.",
            Self::ClanRules => "🤔 You cannot accept the clan rules because you already did.",
        }
    }

    /// Reply after the role was granted, linking the clan channel when one is configured.
    pub fn accepted(&self, guild_id: u64, clan_channel_id: Option<u64>) -> String {
        match (self, clan_channel_id) {
            (Self::ServerRules, _) => "✅ You accepted the rules! Thank you.".to_string(),
            (Self::ClanRules, Some(channel_id)) => format!(
                "✅ You accepted the clan rules! Now create or join a clan in https://discord.com/channels/{}/{}",
                guild_id, channel_id
            ),
            (Self::ClanRules, None) => {
                "✅ You accepted the clan rules! You can now create or join a clan.".to_string()
            }
        }
    }
}

pub fn rules_embed(language: RulesLanguage) -> CreateEmbed {
    let embed = CreateEmbed::new().colour(Colour::DARK_BLUE);

    match language {
        RulesLanguage::German => embed
            .description("# 🇩🇪 Regeln (German)")
            .field(
                "📜 Willkommen in der TradiaSMP Community! | SERVER REGELN",
                "Wir erwarten, dass jeder die **Discord Nutzungsbedingungen** und die **Minecraft Server Regeln** einhält.",
                false,
            )
            .field(
                "⭐ Textkanäle",
                "**1. Sei respektvoll.** Keine Beleidigungen, rassistischen, sexistischen oder anderweitig diskriminierenden Äußerungen.\n\
                 **2. Kein Spam & keine Werbung.** Wiederholte Nachrichten, exzessive Nutzung von Caps Lock oder Fremdwerbung (Server-Invites, Links, etc.) sind untersagt.\n\
                 **3. Nutze die richtigen Kanäle.** Halte dich an das Thema des jeweiligen Channels.\n\
                 **4. NSFW ist verboten.** Inhalte für Erwachsene sind auf diesem Server nicht gestattet.",
                false,
            )
            .field(
                "🎙 Sprachkanäle",
                "**1. Qualität und Rücksicht.** Vermeide laute, störende Geräusche oder übermäßige Hintergrundgeräusche. Nutze **Push-to-Talk**, falls nötig.\n\
                 **2. Keine Channel-Hopping-Spams.** Das schnelle, wiederholte Wechseln zwischen Voice Channels ist untersagt.\n\
                 **3. Mitschnitte.** Aufnahmen von Gesprächen sind nur mit der **ausdrücklichen Zustimmung** aller Anwesenden erlaubt.",
                false,
            )
            .field(
                "🛡️ Sonstige",
                "**1. Avatar & Nickname.** Dein Profilbild und dein Nickname dürfen nicht anstößig, beleidigend oder irreführend sein (z.B. Teammitglieder imitieren).\n\
                 **2. Anweisungen des Teams.** Befolge immer die Anweisungen der Teammitglieder (Moderatoren/Admins). Ihre Entscheidungen sind endgültig.\n\
                 **3. Melde Regelverstöße.** Wenn du einen Verstoß siehst, nutze die Meldefunktion oder kontaktiere das Team per Ticket/PN. Treibe keine \"Mini-Moderation\".",
                false,
            ),
        RulesLanguage::English => embed
            .description("# 🇬🇧 Rules (English)")
            .field(
                "📜 Welcome to the TradiaSMP Community! | SERVER RULES",
                "We expect everyone to adhere to the **Discord Terms of Service** and the **Minecraft Server Rules** at all times.",
                false,
            )
            .field(
                "⭐ Text Channels",
                "**1. Be Respectful.** No insults, racial, sexist, or otherwise discriminatory remarks.\n\
                 **2. No Spam & No Advertising.** Repeated messages, excessive use of Caps Lock, or unapproved self/external advertising (server invites, links, etc.) are prohibited.\n\
                 **3. Use the Correct Channels.** Stick to the topic of the respective channel.\n\
                 **4. NSFW is Prohibited.** Adult content is not allowed on this server.",
                false,
            )
            .field(
                "🎙️ Voice Channels",
                "**1. Quality and Consideration.** Avoid loud, disruptive, or excessive background noise. Use **Push-to-Talk** if necessary.\n\
                 **2. No Channel Hopping Spam.** Rapid, repeated switching between voice channels is prohibited.\n\
                 **3. Recordings.** Recording conversations is only allowed with the **explicit consent** of all present participants.",
                false,
            )
            .field(
                "🛡️ Others",
                "**1. Avatar & Nickname.** Your profile picture and nickname must not be offensive, insulting, or misleading (e.g., impersonating staff).\n\
                 **2. Staff Instructions.** Always follow the instructions of staff members (Moderators/Admins). Their decisions are final.\n\
                 **3. Report Violations.** If you witness a rule-break, use the reporting tools or contact staff via ticket/DM. Do not engage in \"mini-moderation.\"",
                false,
            ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language_codes() {
        assert_eq!(RulesLanguage::from_code("DE"), Some(RulesLanguage::German));
        assert_eq!(RulesLanguage::from_code("en"), Some(RulesLanguage::English));
        assert_eq!(RulesLanguage::from_code("fr"), None);
    }

    #[test]
    fn clan_rules_reply_links_channel() {
        let reply = AcceptPanel::ClanRules.accepted(1, Some(2));

        assert!(reply.ends_with("https://discord.com/channels/1/2"));
        assert!(!AcceptPanel::ClanRules.accepted(1, None).contains("https://"));
    }
}
