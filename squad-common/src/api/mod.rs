pub mod party_table;

pub use self::party_table::Slot;
pub use self::party_table::PartyRow;
pub use self::party_table::LeftoverRow;
pub use self::party_table::CategoryResult;
