//! Search filter flags shared by `search` and `locate`.

use clap::Args;
use storefinder_core::{
    parse_min_rating, Category, DistanceOption, PriceTier, Session, SessionAction,
    StatusRequirement,
};

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Search radius: 500m, 1km, 3km or 5km
    #[arg(long)]
    pub distance: Option<DistanceOption>,

    /// Restrict to categories (repeatable or comma-separated)
    #[arg(long = "category", value_delimiter = ',')]
    pub categories: Vec<Category>,

    /// Minimum rating, e.g. 4.0 or 4.5+ ("any" disables)
    #[arg(long)]
    pub rating: Option<String>,

    /// Operating status: any, open or 24h
    #[arg(long)]
    pub status: Option<StatusRequirement>,

    /// Price tier: budget, moderate, expensive or luxury
    #[arg(long)]
    pub price: Option<PriceTier>,

    /// Require at least one of these features (repeatable or comma-separated)
    #[arg(long = "feature", value_delimiter = ',')]
    pub features: Vec<String>,
}

impl FilterArgs {
    /// Translate the flags into session actions, in the order they apply.
    ///
    /// # Errors
    ///
    /// Returns an error if `--rating` is not `any` or a number in 0–5.
    pub fn actions(&self) -> anyhow::Result<Vec<SessionAction>> {
        let mut actions = Vec::new();

        if let Some(distance) = self.distance {
            actions.push(SessionAction::SetDistance(distance));
        }
        for &category in &self.categories {
            actions.push(SessionAction::ToggleCategory {
                category,
                selected: true,
            });
        }
        if let Some(rating) = &self.rating {
            let min = parse_min_rating(rating).map_err(|e| anyhow::anyhow!(e))?;
            actions.push(SessionAction::SetMinRating(min));
        }
        if let Some(status) = self.status {
            actions.push(SessionAction::SetStatus(status));
        }
        if let Some(price) = self.price {
            actions.push(SessionAction::SetPriceTier(Some(price)));
        }
        for feature in &self.features {
            actions.push(SessionAction::ToggleFeature {
                feature: feature.trim().to_string(),
                selected: true,
            });
        }

        Ok(actions)
    }

    /// Dispatch every filter action into `session`.
    ///
    /// # Errors
    ///
    /// See [`FilterArgs::actions`].
    pub fn apply(&self, session: &mut Session) -> anyhow::Result<()> {
        for action in self.actions()? {
            session.dispatch(action);
        }
        Ok(())
    }
}
