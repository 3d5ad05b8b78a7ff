pub mod score;

pub use self::score::score;

pub mod constraint;

pub use self::constraint::{can_add, can_replace, can_swap};

pub mod group;

pub use self::group::Group;

pub mod partition;

pub use self::partition::Partition;

pub mod builder;
pub mod reconciler;
pub mod optimizer;

pub use self::optimizer::OptimizeOutcome;

pub mod assignment;

pub use self::assignment::{assign, Assignment, Warning};
