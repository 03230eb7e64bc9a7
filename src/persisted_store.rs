use std::cell::RefCell;
use std::collections::HashSet;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use wasm_bindgen::JsValue;
use web_sys::Storage;

use wayfinder_core::{completion_key, decode_record, encode_record, CompletionRecord, StoreError};

thread_local! {
    static COMPLETED_CACHE: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

pub(crate) fn has_completed(user_id: &str) -> Result<bool, StoreError> {
    let user_id = user_id.trim();
    if COMPLETED_CACHE.with(|slot| slot.borrow().contains(user_id)) {
        return Ok(true);
    }
    let storage = local_storage()?;
    let raw = storage
        .get_item(&completion_key(user_id))
        .map_err(|err| StoreError::Read(js_err(err)))?;
    let Some(raw) = raw else {
        return Ok(false);
    };
    let completed = STANDARD
        .decode(raw.trim())
        .ok()
        .and_then(|bytes| decode_record(&bytes))
        .is_some_and(|record| record.belongs_to(user_id));
    if completed {
        remember(user_id);
    }
    Ok(completed)
}

pub(crate) fn mark_completed(user_id: &str, now_ms: f64) -> Result<(), StoreError> {
    let user_id = user_id.trim();
    // The session keeps the flag even when storage refuses the write.
    remember(user_id);
    let record = CompletionRecord::new(user_id, now_ms);
    let bytes = encode_record(&record)
        .ok_or_else(|| StoreError::Write("completion record encode failed".to_string()))?;
    let storage = local_storage()?;
    storage
        .set_item(&completion_key(user_id), &STANDARD.encode(bytes))
        .map_err(|err| StoreError::Write(js_err(err)))
}

pub(crate) fn clear_completed(user_id: &str) -> Result<(), StoreError> {
    let user_id = user_id.trim();
    COMPLETED_CACHE.with(|slot| {
        slot.borrow_mut().remove(user_id);
    });
    let storage = local_storage()?;
    storage
        .remove_item(&completion_key(user_id))
        .map_err(|err| StoreError::Write(js_err(err)))
}

fn remember(user_id: &str) {
    COMPLETED_CACHE.with(|slot| {
        slot.borrow_mut().insert(user_id.to_string());
    });
}

fn local_storage() -> Result<Storage, StoreError> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .ok_or(StoreError::Unavailable)
}

pub(crate) fn js_err(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
