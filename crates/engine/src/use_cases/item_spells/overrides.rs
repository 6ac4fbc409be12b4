//! Override resolution for materialized spells.
//!
//! Pure functions: no store access and no randomness, so resolving the same
//! template against the same stat context always yields the same fields.

use itemspells_domain::{
    ConsumeType, Item, ItemData, ItemFlag, ParentRef, SpellOverrides, SpellTemplate, StatContext,
};

use crate::infrastructure::ports::FormulaEvaluator;

/// Proficiency term subtracted from flat attack bonuses.
pub const PROFICIENCY_TERM: &str = "@prof";

/// Ability value that disables the ability modifier on attack rolls.
pub const NO_ABILITY: &str = "none";

/// Compute the concrete override fields of one instance.
///
/// - a non-zero attack bonus replaces ability + proficiency: the ability is
///   set to "none" and the bonus rewritten to `"<bonus> - @prof"`
/// - `uses.max` is evaluated into `uses.value`; a formula the evaluator
///   rejects leaves the value unset
/// - a consumption amount makes the spell consume the parent's charges
pub fn resolve_overrides(
    parent: &Item,
    template: &SpellTemplate,
    ctx: &StatContext,
    evaluator: &dyn FormulaEvaluator,
) -> SpellOverrides {
    let mut resolved = template.overrides.clone();

    if let Some(bonus) = template.overrides.attack_bonus.as_deref() {
        let bonus = bonus.trim();
        if bonus.is_empty() {
            resolved.attack_bonus = None;
        } else if !is_zero(bonus) {
            resolved.ability = Some(NO_ABILITY.to_string());
            resolved.attack_bonus = Some(format!("{} - {}", bonus, PROFICIENCY_TERM));
        }
    }

    if let Some(uses) = resolved.uses.as_mut() {
        if let Some(max) = uses.max.as_deref().filter(|m| !m.trim().is_empty()) {
            match evaluator.evaluate(max, ctx) {
                Ok(value) => uses.value = Some(value),
                Err(e) => {
                    tracing::debug!(
                        source = %template.source_uuid,
                        formula = %max,
                        error = %e,
                        "Uses formula not resolvable, leaving value unset"
                    );
                    uses.value = None;
                }
            }
        }
    }

    if let Some(consume) = resolved.consume.as_mut() {
        if consume.amount.is_some_and(|a| a != 0) {
            consume.kind = Some(ConsumeType::Charges);
            consume.target = Some(parent.id.to_string());
        }
    }

    resolved
}

/// Creation payload of an instance: the source spell with overrides merged
/// into its `system` subtree and a back-reference to the parent.
pub fn instance_data(parent: &Item, source: &Item, overrides: &SpellOverrides) -> ItemData {
    let mut data = source.to_data();
    overrides.apply_to(&mut data.system);
    data.flags.set(ItemFlag::ParentItem(ParentRef::for_item(parent)));
    data
}

fn is_zero(bonus: &str) -> bool {
    bonus.parse::<f64>().is_ok_and(|v| v == 0.0)
}
