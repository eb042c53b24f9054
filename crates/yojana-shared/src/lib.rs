//! Shared advisory logic for Yojana.
//!
//! Two independent, stateless resolvers invoked once per conversational turn:
//! - [`IncomeResolver`]: stated income -> LPA -> bracket -> recommendation bundle
//! - [`SchemeResolver`]: entity or keyword -> scheme details document
//!
//! Content (bundles, scheme documents, aliases) is static data loaded once and
//! injected; the host runtime owns session state and message delivery.

pub mod bracket;
pub mod bundle;
pub mod catalog;
pub mod config;
pub mod error;
pub mod income;
pub mod income_resolver;
pub mod scheme_resolver;
pub mod turn;

pub use bracket::IncomeBracket;
pub use bundle::{format_bundle_text, BundleSection, BundleSet, RecommendationBundle};
pub use catalog::{KeywordAlias, SchemeCatalog, SchemeRecord};
pub use config::AdvisorConfig;
pub use error::YojanaError;
pub use income::{Income, IncomeUnit, UnitPolicy};
pub use income_resolver::{IncomeResolution, IncomeResolver, IncomeSource};
pub use scheme_resolver::{SchemeResolution, SchemeResolver, SchemeSource};
pub use turn::{
    CollectingEmitter, Entity, MessageEmitter, SlotReader, SlotUpdate, SlotValue, TurnInput,
    TurnOutcome,
};

/// Package version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
