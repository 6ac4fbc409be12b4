//! Item spells engine - demo entry point.
//!
//! Runs a wand of fireballs through its whole lifecycle against the
//! in-memory adapters and logs every outcome.

use std::sync::Arc;

use itemspells_domain::{
    Character, CharacterKind, Item, ItemId, ItemType, ItemUses, SpellOverrides, SpellTemplate,
    UserId,
};
use itemspells_engine::infrastructure::{
    formula::DeterministicEvaluator,
    in_memory::{InMemoryCompendium, InMemoryItemStore, StaticConfirm},
    settings::ModuleSettings,
    telemetry::init_tracing,
};
use itemspells_engine::use_cases::item_spells::{
    DeleteOptions, ItemLifecycleEvent, LifecycleOutcome,
};
use itemspells_engine::{App, Ports};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();
    init_tracing();

    tracing::info!("Starting item spells engine demo");

    let settings = ModuleSettings::from_env()?;
    let user = UserId::new(std::env::var("IWS_USER").unwrap_or_else(|_| "gamemaster".into()))?;

    let store = Arc::new(InMemoryItemStore::new());
    let compendium = Arc::new(InMemoryCompendium::new());

    let app = App::new(
        Ports {
            character_repo: store.clone(),
            item_repo: store.clone(),
            spell_source: compendium.clone(),
            confirm: Arc::new(StaticConfirm::new(true)),
            evaluator: Arc::new(DeterministicEvaluator::new()),
        },
        settings,
        user.clone(),
    );

    // Character with one spell of their own
    let character = Character::new("Ayla", CharacterKind::Character)
        .with_level(5)
        .with_ability("int", 16);
    let character_id = character.id;
    store.insert_character(character).await;

    let mut missile = Item::new("Magic Missile", ItemType::Spell).with_owner(character_id);
    missile.system.level = Some(1);
    store.insert_item(missile).await;

    let mut fireball = Item::new("Fireball", ItemType::Spell);
    fireball.system.level = Some(3);
    let fireball_uuid = compendium.insert("dnd5e.spells", fireball).await;

    // World item authoring: a wand granting Fireball with three charges
    let mut wand = Item::new("Wand of Fireballs", ItemType::Equipment);
    wand.flags.spell_templates = vec![SpellTemplate::new(fireball_uuid).with_overrides(
        SpellOverrides {
            uses: Some(ItemUses {
                value: None,
                max: Some("3".into()),
                per: Some("day".into()),
            }),
            ..SpellOverrides::default()
        },
    )];

    // The wand lands on the character
    let owned = Item::from_data(ItemId::new(), Some(character_id), wand.to_data());
    let owned = store.insert_item(owned).await;
    let outcome = app
        .use_cases
        .item_spells
        .handle(ItemLifecycleEvent::Created {
            item: owned.clone(),
            user: user.clone(),
        })
        .await?;
    log_outcome(&outcome);

    for section in app.use_cases.spellbook.execute(character_id).await? {
        let spells: Vec<&str> = section.spells.iter().map(|s| s.name.as_str()).collect();
        tracing::info!(
            order = section.order,
            label = %section.label,
            uses = %section.uses,
            slots = %section.slots,
            spells = ?spells,
            "Spellbook section"
        );
    }

    // The wand is removed again, taking its spells with it
    let deleted = store
        .remove_item(owned.id)
        .await
        .ok_or_else(|| anyhow::anyhow!("wand vanished from the store"))?;
    let outcome = app
        .use_cases
        .item_spells
        .handle(ItemLifecycleEvent::Deleted {
            item: deleted,
            options: DeleteOptions::also_delete(true),
            user,
        })
        .await?;
    log_outcome(&outcome);

    let remaining = app.use_cases.spellbook.execute(character_id).await?;
    tracing::info!(sections = remaining.len(), "Demo finished");

    Ok(())
}

fn log_outcome(outcome: &LifecycleOutcome) {
    tracing::info!(outcome = ?outcome, "Lifecycle event handled");
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
