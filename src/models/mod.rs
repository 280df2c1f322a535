pub mod field_value;
pub mod record;
pub mod record_kind;

pub use field_value::FieldValue;
pub use record::{Record, Table};
pub use record_kind::RecordKind;
