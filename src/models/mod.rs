pub mod original_edition;
pub mod review;
pub mod site;
pub mod translation;

pub use original_edition::OriginalEdition;
pub use review::{ReviewHit, ReviewSearchOutcome};
pub use site::{PublicationSite, SiteBook};
pub use translation::TranslationRecord;
