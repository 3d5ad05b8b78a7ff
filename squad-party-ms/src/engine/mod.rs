pub mod registry;

pub use self::registry::RunRegistry;
pub use self::registry::RunGuard;

pub mod runner;

pub use self::runner::run_category;
pub use self::runner::run_categories;

pub mod report;
