mod definition;
mod repository;

pub use definition::{SeasonalEventDefinition, SeasonalRule, SeasonalRuleType};
pub use repository::{
    SeasonAnnouncementRepository, SeasonCounterRepository, SeasonDefinitionRepository,
};
