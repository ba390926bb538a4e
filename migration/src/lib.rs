pub use sea_orm_migration::prelude::*;

mod m20251220_000001_create_ticket_table;
mod m20251220_000002_create_temp_voice_hub_table;
mod m20251220_000003_create_temp_voice_session_table;
mod m20251221_000004_create_clan_table;
mod m20251221_000005_create_clan_member_table;
mod m20251222_000006_create_modmail_case_table;
mod m20251222_000007_create_faq_entry_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251220_000001_create_ticket_table::Migration),
            Box::new(m20251220_000002_create_temp_voice_hub_table::Migration),
            Box::new(m20251220_000003_create_temp_voice_session_table::Migration),
            Box::new(m20251221_000004_create_clan_table::Migration),
            Box::new(m20251221_000005_create_clan_member_table::Migration),
            Box::new(m20251222_000006_create_modmail_case_table::Migration),
            Box::new(m20251222_000007_create_faq_entry_table::Migration),
        ]
    }
}
