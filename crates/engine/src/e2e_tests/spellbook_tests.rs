//! Spellbook scenarios.
//!
//! Tests verify:
//! - Spells granted by an item render under that item, not under their level
//! - Unattuned items hide their spells entirely
//! - Every spell on the character lands in exactly one section
//! - Spell items grant spells once their type is enabled

use itemspells_domain::{AttunementState, Item, ItemType, SpellTemplate};

use super::{labels, names, spell, E2ETestContext};
use crate::infrastructure::settings::ModuleSettings;
use crate::use_cases::item_spells::CreateOutcome;

#[tokio::test]
async fn test_item_spells_get_their_own_section() {
    let ctx = E2ETestContext::setup().await;
    ctx.learn("Magic Missile", 1).await;
    let (wand, _) = ctx.give_and_notify(&ctx.wand()).await;

    let sections = ctx.spellbook().await;

    assert_eq!(sections.len(), 2);
    let wand_section = sections
        .iter()
        .find(|s| s.item_id() == Some(wand.id))
        .expect("Wand should have a section");
    assert_eq!(names(wand_section), vec!["Fireball"]);
    assert!(!wand_section.uses_slots && !wand_section.can_create && !wand_section.can_prepare);

    let standard = sections
        .iter()
        .find(|s| s.item_id().is_none())
        .expect("standard section should remain");
    assert_eq!(names(standard), vec!["Magic Missile"]);
}

#[tokio::test]
async fn test_sort_order_setting_places_item_sections() {
    let ctx = E2ETestContext::setup().await;
    ctx.learn("Magic Missile", 1).await;
    ctx.give_and_notify(&ctx.wand()).await;
    assert_eq!(labels(&ctx.spellbook().await), vec!["Wand", "1st Level"]);

    let late = E2ETestContext::setup_with(ModuleSettings::default().with_sort_order(true), true).await;
    late.learn("Magic Missile", 1).await;
    late.give_and_notify(&late.wand()).await;
    assert_eq!(labels(&late.spellbook().await), vec!["1st Level", "Wand"]);
}

#[tokio::test]
async fn test_unattuned_item_contributes_no_section() {
    let ctx = E2ETestContext::setup().await;
    let mut ring = ctx.wand();
    ring.name = "Ring of Spell Storing".into();
    ring.system.attunement = AttunementState::Required;

    let (ring, _) = ctx.give_and_notify(&ring).await;
    assert_eq!(ring.flags.item_spells.len(), 1);

    let sections = ctx.spellbook().await;
    assert!(sections.is_empty());

    // Attuning brings the section back
    let mut attuned = ring.clone();
    attuned.system.attunement = AttunementState::Attuned;
    ctx.store.insert_item(attuned).await;

    let sections = ctx.spellbook().await;
    assert_eq!(labels(&sections), vec!["Ring of Spell Storing"]);
}

#[tokio::test]
async fn test_each_spell_appears_exactly_once() {
    let ctx = E2ETestContext::setup().await;
    ctx.learn("Fire Bolt", 0).await;
    ctx.learn("Magic Missile", 1).await;
    ctx.give_and_notify(&ctx.wand()).await;

    let mut staff = Item::new("Staff", ItemType::Weapon);
    staff.flags.spell_templates = vec![
        SpellTemplate::new(ctx.shield_uuid.clone()),
        SpellTemplate::new(ctx.fireball_uuid.clone()),
    ];
    ctx.give_and_notify(&staff).await;

    let sections = ctx.spellbook().await;
    let spells: Vec<_> = ctx
        .character_items()
        .await
        .into_iter()
        .filter(|i| i.is_spell())
        .collect();
    assert_eq!(spells.len(), 5);

    for spell in &spells {
        let count = sections.iter().filter(|s| s.contains(spell.id)).count();
        assert_eq!(count, 1, "{} should appear once", spell.name);
    }
    assert_eq!(
        labels(&sections),
        vec!["Staff", "Wand", "Cantrips", "1st Level"]
    );
}

#[tokio::test]
async fn test_enabled_spell_type_grants_its_own_section() {
    let settings = ModuleSettings::default().with_item_type(ItemType::Spell, true);
    let ctx = E2ETestContext::setup_with(settings, true).await;
    let mut glyph = spell("Glyph of Warding", 3);
    glyph.flags.spell_templates = vec![SpellTemplate::new(ctx.shield_uuid.clone())];

    let (glyph, outcome) = ctx.give_and_notify(&glyph).await;
    assert!(matches!(outcome, CreateOutcome::Materialized { .. }));

    let sections = ctx.spellbook().await;
    assert_eq!(labels(&sections), vec!["Glyph of Warding", "3rd Level"]);
    assert_eq!(sections[0].item_id(), Some(glyph.id));
    assert_eq!(names(&sections[0]), vec!["Shield"]);
    assert_eq!(names(&sections[1]), vec!["Glyph of Warding"]);
}
