pub mod hook;
mod logging;

pub use logging::init_tracing;

use crate::config::HookSettings;
use crate::policy::PolicyRules;
use crate::tagger::TaggerConfig;
use crate::validator::ValidatorConfig;

/// The hooks this binary implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    CommitValidator,
    GitTagger,
    VersionPolicy,
}

impl HookKind {
    pub const ALL: [HookKind; 3] = [
        HookKind::CommitValidator,
        HookKind::GitTagger,
        HookKind::VersionPolicy,
    ];

    /// Defaults-file section holding this hook's options.
    pub fn section(self) -> &'static str {
        match self {
            HookKind::CommitValidator => ValidatorConfig::SECTION,
            HookKind::GitTagger => TaggerConfig::SECTION,
            HookKind::VersionPolicy => PolicyRules::SECTION,
        }
    }
}
