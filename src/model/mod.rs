mod field;
mod lookup;
mod record;
mod session;
mod validation;

pub use field::{Field, FieldKind, FieldValue, UgcPolicy};
pub use lookup::{Institution, LookupRecord, LookupTable, ProgramShare};
pub use record::FormRecord;
pub use session::{RESET_DELAY, RegistrationSession, SubmitOutcome};
pub use validation::{ValidationError, ValidationErrors, validate_record};
