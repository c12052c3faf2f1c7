pub mod audits;
pub mod fields;
pub mod goals;
pub mod input;

pub use audits::AuditCommands;
pub use fields::FieldCommands;
pub use goals::GoalCommands;
pub use input::JsonInput;
