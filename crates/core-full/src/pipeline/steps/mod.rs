// Concrete pipeline steps

pub mod fixes;
pub mod index;
pub mod output;
pub mod pokeapi;
pub mod render;
pub mod source;
pub mod tcg;
pub mod transform;

pub use fixes::ApplyFixesStep;
pub use index::BuildIndexStep;
pub use output::SaveOutputStep;
pub use pokeapi::FetchPokemonStep;
pub use render::RenderBinderStep;
pub use source::LoadSourceStep;
pub use tcg::EnrichTcgStep;
pub use transform::TransformSectionsStep;

use binder_core::config::constants;
use binder_core::error::Result;
use binder_core::pipeline::StepParams;

/// `languages` param, defaulting to every supported language
pub(crate) fn languages_param(params: &StepParams) -> Result<Vec<String>> {
    Ok(params
        .string_list("languages")?
        .filter(|langs| !langs.is_empty())
        .unwrap_or_else(|| constants::LANGUAGES.iter().map(|s| s.to_string()).collect()))
}
