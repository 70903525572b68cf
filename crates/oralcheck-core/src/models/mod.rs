pub mod directive;
pub mod general_condition;
pub mod item;
pub mod live_assessment;
pub mod management_plan;
pub mod patient;
pub mod progress_record;
