use crate::errors::AppResult;
use crate::models::RecordKind;
use crate::store::RecordStore;
use crate::store::log::ttlog_quiet;

pub struct WipeLogic;

impl WipeLogic {
    /// Delete the stores of `kinds`. Returns the kinds that had data.
    pub fn wipe(store: &RecordStore, kinds: &[RecordKind]) -> AppResult<Vec<RecordKind>> {
        let mut wiped = Vec::new();

        for &kind in kinds {
            let had_data = store.exists(kind);
            store.wipe(kind)?;
            if had_data {
                wiped.push(kind);
                ttlog_quiet(store, "wipe", kind.storage_name(), "store deleted");
            }
        }

        Ok(wiped)
    }
}
