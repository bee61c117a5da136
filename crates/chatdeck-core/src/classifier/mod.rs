mod features;
mod linear;
mod species;

pub use features::FeatureSpec;
pub use linear::LinearModel;
pub use species::Species;

use crate::constants::classifier::NUM_FEATURES;
use crate::error::{DeckError, Result};

/// A pre-trained model mapping four measurements to a class index.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &[f32; NUM_FEATURES]) -> Result<usize>;
}

/// Run `classifier` and map its class index onto a [`Species`].
pub fn predict_species(classifier: &dyn Classifier, features: &[f32; NUM_FEATURES]) -> Result<Species> {
    if let Some(bad) = features.iter().find(|v| !v.is_finite()) {
        return Err(DeckError::Classifier(format!("feature value {bad} is not finite")));
    }
    let index = classifier.predict(features)?;
    let species = Species::from_index(index)?;
    tracing::debug!(?features, %species, "prediction");
    Ok(species)
}
