pub mod model;

pub use self::model::Role;
pub use self::model::Member;
pub use self::model::MemberId;
pub use self::model::Roster;
pub use self::model::RosterEntry;
pub use self::model::validate;

pub mod category;

pub use self::category::Category;

pub mod placement;

pub use self::placement::auto_place;
pub use self::placement::category_summary;
pub use self::placement::CategoryCount;
