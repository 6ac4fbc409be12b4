//! Item lifecycle scenarios.
//!
//! Tests verify:
//! - Creating an item on a character materializes its spells and links both ways
//! - Deleting it cascades to the spells, with or without a prompt
//! - Declining the prompt leaves the spells orphaned
//! - Guards keep foreign events and disabled item types untouched

use itemspells_domain::{
    Character, CharacterKind, ConsumeType, Consumption, Item, ItemId, ItemType, ParentRef,
    SpellOverrides, SpellTemplate, UserId,
};

use super::{names, E2ETestContext};
use crate::infrastructure::settings::ModuleSettings;
use crate::use_cases::item_spells::{
    CreateOutcome, DeleteOptions, DeleteOutcome, ItemLifecycleEvent, LifecycleOutcome, SkipReason,
};

#[tokio::test]
async fn test_wand_creation_materializes_fireball() {
    let ctx = E2ETestContext::setup().await;

    let (wand, outcome) = ctx.give_and_notify(&ctx.wand()).await;

    let CreateOutcome::Materialized { created, .. } = outcome else {
        panic!("wand should materialize its spells");
    };
    assert_eq!(created.len(), 1);

    let fireball = ctx.item(created[0].id).await.expect("Fireball should exist");
    assert_eq!(fireball.name, "Fireball");
    assert_eq!(fireball.owner, Some(ctx.character_id));
    let uses = fireball.system.uses.as_ref().expect("uses should be set");
    assert_eq!(uses.value, Some(3));
    assert_eq!(uses.max.as_deref(), Some("3"));
    assert_eq!(fireball.parent_ref(), Some(&ParentRef::new(wand.id.to_string())));

    assert_eq!(wand.flags.item_spells, vec![fireball.instance_ref()]);
}

#[tokio::test]
async fn test_every_created_spell_links_back() {
    let ctx = E2ETestContext::setup().await;
    let mut staff = Item::new("Staff of Power", ItemType::Weapon);
    staff.flags.spell_templates = vec![
        SpellTemplate::new(ctx.fireball_uuid.clone()),
        SpellTemplate::new(ctx.shield_uuid.clone()),
    ];

    let (staff, outcome) = ctx.give_and_notify(&staff).await;
    assert!(matches!(outcome, CreateOutcome::Materialized { ref created, .. } if created.len() == 2));

    let linked: Vec<Item> = ctx
        .character_items()
        .await
        .into_iter()
        .filter(|i| i.is_linked_to(&staff))
        .collect();
    assert_eq!(linked.len(), 2);

    let mut refs = staff.flags.item_spells.clone();
    let mut expected: Vec<_> = linked.iter().map(Item::instance_ref).collect();
    refs.sort_by_key(|r| r.id);
    expected.sort_by_key(|r| r.id);
    assert_eq!(refs, expected);
}

#[tokio::test]
async fn test_attack_bonus_and_charges_are_derived() {
    let ctx = E2ETestContext::setup().await;
    let mut wand = Item::new("Wand of the War Mage", ItemType::Equipment);
    wand.flags.spell_templates = vec![SpellTemplate::new(ctx.fireball_uuid.clone())
        .with_overrides(SpellOverrides {
            attack_bonus: Some("7".into()),
            consume: Some(Consumption {
                kind: None,
                target: None,
                amount: Some(1),
            }),
            ..SpellOverrides::default()
        })];

    let (wand, outcome) = ctx.give_and_notify(&wand).await;
    let CreateOutcome::Materialized { created, .. } = outcome else {
        panic!("wand should materialize its spells");
    };

    let system = &created[0].system;
    assert_eq!(system.ability.as_deref(), Some("none"));
    assert_eq!(system.attack_bonus.as_deref(), Some("7 - @prof"));
    let consume = system.consume.as_ref().unwrap();
    assert_eq!(consume.kind, Some(ConsumeType::Charges));
    assert_eq!(consume.target, Some(wand.id.to_string()));
}

#[tokio::test]
async fn test_deleting_with_presupplied_decision_skips_prompt() {
    let ctx = E2ETestContext::setup().await;
    let (wand, _) = ctx.give_and_notify(&ctx.wand()).await;

    let outcome = ctx.delete(wand.id, DeleteOptions::also_delete(true)).await;

    assert!(matches!(outcome, DeleteOutcome::Deleted(ref ids) if ids.len() == 1));
    assert_eq!(ctx.confirm.times_asked(), 0);
    assert!(ctx
        .character_items()
        .await
        .iter()
        .all(|i| !i.is_linked_to(&wand)));
}

#[tokio::test]
async fn test_deleting_prompts_when_undecided() {
    let ctx = E2ETestContext::setup().await;
    let (wand, _) = ctx.give_and_notify(&ctx.wand()).await;

    let outcome = ctx.delete(wand.id, DeleteOptions::default()).await;

    assert!(matches!(outcome, DeleteOutcome::Deleted(_)));
    assert_eq!(ctx.confirm.times_asked(), 1);
    assert!(ctx.character_items().await.is_empty());
}

#[tokio::test]
async fn test_declining_orphans_spells_out_of_item_sections() {
    let ctx = E2ETestContext::setup_with(ModuleSettings::default(), false).await;
    let (wand, _) = ctx.give_and_notify(&ctx.wand()).await;

    let outcome = ctx.delete(wand.id, DeleteOptions::default()).await;

    let DeleteOutcome::Declined { orphaned } = outcome else {
        panic!("declining should keep the spells");
    };
    assert_eq!(orphaned.len(), 1);
    assert!(ctx.item(orphaned[0]).await.is_some());

    let sections = ctx.spellbook().await;
    assert_eq!(sections.len(), 1);
    assert!(sections[0].item_id().is_none());
    assert_eq!(names(&sections[0]), vec!["Fireball"]);
}

#[tokio::test]
async fn test_other_users_events_are_ignored() {
    let ctx = E2ETestContext::setup().await;
    let wand = ctx.give(&ctx.wand()).await;

    let outcome = ctx
        .app
        .use_cases
        .item_spells
        .handle(ItemLifecycleEvent::Created {
            item: wand,
            user: UserId::new("player-two").unwrap(),
        })
        .await
        .unwrap();

    assert_eq!(
        outcome,
        LifecycleOutcome::Created(CreateOutcome::Skipped(SkipReason::ForeignUser))
    );
    assert_eq!(ctx.character_items().await.len(), 1);
}

#[tokio::test]
async fn test_disabled_item_type_creates_nothing() {
    let settings = ModuleSettings::default().with_item_type(ItemType::Equipment, false);
    let ctx = E2ETestContext::setup_with(settings, true).await;

    let (wand, outcome) = ctx.give_and_notify(&ctx.wand()).await;

    assert_eq!(
        outcome,
        CreateOutcome::Skipped(SkipReason::ItemTypeDisabled(ItemType::Equipment))
    );
    assert!(wand.flags.item_spells.is_empty());
    assert_eq!(ctx.character_items().await.len(), 1);
}

#[tokio::test]
async fn test_group_actor_creates_nothing() {
    let ctx = E2ETestContext::setup().await;
    let party = Character::new("The Party", CharacterKind::Group);
    let party_id = party.id;
    ctx.store.insert_character(party).await;

    let wand = Item::from_data(ItemId::new(), Some(party_id), ctx.wand().to_data());
    let wand = ctx.store.insert_item(wand).await;

    let outcome = ctx.notify_created(&wand).await;
    assert_eq!(
        outcome,
        CreateOutcome::Skipped(SkipReason::ExcludedCharacterKind(CharacterKind::Group))
    );
}

#[tokio::test]
async fn test_missing_source_spell_is_skipped() {
    let ctx = E2ETestContext::setup().await;
    let mut wand = ctx.wand();
    wand.flags
        .spell_templates
        .push(SpellTemplate::new("Compendium.dnd5e.spells.Item.missing"));

    let (wand, outcome) = ctx.give_and_notify(&wand).await;

    let CreateOutcome::Materialized { created, dropped, .. } = outcome else {
        panic!("the resolvable template should still materialize");
    };
    assert_eq!(created.len(), 1);
    assert_eq!(dropped.len(), 1);
    assert_eq!(wand.flags.item_spells.len(), 1);
}
