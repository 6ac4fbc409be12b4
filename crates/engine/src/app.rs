//! Application state and composition.

use std::sync::Arc;

use itemspells_domain::UserId;

use crate::infrastructure::{
    ports::{CharacterRepo, ConfirmPort, FormulaEvaluator, ItemRepo, SpellSource},
    settings::ModuleSettings,
};
use crate::use_cases::{
    editor::{ItemSpellsEditor, SurfaceRegistry},
    item_spells::{CascadeItemSpells, EventGuard, ItemSpellsUseCases, MaterializeItemSpells},
    spellbook::{ItemSpellbookHook, PrepareSpellbook, SpellLevelGrouping, SpellbookPipeline},
};

/// Host collaborators the engine runs against.
pub struct Ports {
    pub character_repo: Arc<dyn CharacterRepo>,
    pub item_repo: Arc<dyn ItemRepo>,
    pub spell_source: Arc<dyn SpellSource>,
    pub confirm: Arc<dyn ConfirmPort>,
    pub evaluator: Arc<dyn FormulaEvaluator>,
}

/// Main application state.
pub struct App {
    pub settings: Arc<ModuleSettings>,
    pub current_user: UserId,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub item_spells: ItemSpellsUseCases,
    pub spellbook: Arc<PrepareSpellbook>,
    pub editor: Arc<ItemSpellsEditor>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(ports: Ports, settings: ModuleSettings, current_user: UserId) -> Self {
        let settings = Arc::new(settings);

        let guard = Arc::new(EventGuard::new(
            ports.character_repo.clone(),
            settings.clone(),
            current_user.clone(),
        ));

        let materialize = Arc::new(MaterializeItemSpells::new(
            ports.item_repo.clone(),
            ports.spell_source.clone(),
            ports.evaluator.clone(),
            guard.clone(),
        ));
        let cascade = Arc::new(CascadeItemSpells::new(
            ports.item_repo.clone(),
            ports.confirm.clone(),
            guard,
        ));

        let pipeline = Arc::new(
            SpellbookPipeline::new(Arc::new(SpellLevelGrouping::new()))
                .with_hook(Arc::new(ItemSpellbookHook::new(settings.clone()))),
        );
        let spellbook = Arc::new(PrepareSpellbook::new(
            ports.character_repo.clone(),
            ports.item_repo.clone(),
            pipeline,
        ));

        let editor = Arc::new(ItemSpellsEditor::new(
            ports.item_repo.clone(),
            ports.spell_source.clone(),
            Arc::new(SurfaceRegistry::new()),
            settings.clone(),
        ));

        Self {
            settings,
            current_user,
            use_cases: UseCases {
                item_spells: ItemSpellsUseCases::new(materialize, cascade),
                spellbook,
                editor,
            },
        }
    }
}
