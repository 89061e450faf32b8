//! Key/value persistence
//!
//! Browser builds use `window.localStorage`. Native builds keep values in a
//! per-thread map for the lifetime of the process.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("storage call failed: {0}")]
    Js(String),
    #[error("stored data could not be encoded or decoded: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or(StorageError::Unavailable)?
        .local_storage()
        .map_err(|e| StorageError::Js(format!("{:?}", e)))?
        .ok_or(StorageError::Unavailable)
}

/// Raw string stored under `key`
#[cfg(target_arch = "wasm32")]
pub fn get_item(key: &str) -> Result<Option<String>, StorageError> {
    local_storage()?
        .get_item(key)
        .map_err(|e| StorageError::Js(format!("{:?}", e)))
}

#[cfg(target_arch = "wasm32")]
pub fn set_item(key: &str, value: &str) -> Result<(), StorageError> {
    local_storage()?
        .set_item(key, value)
        .map_err(|e| StorageError::Js(format!("{:?}", e)))
}

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static MEMORY: std::cell::RefCell<std::collections::HashMap<String, String>> =
        std::cell::RefCell::new(std::collections::HashMap::new());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn get_item(key: &str) -> Result<Option<String>, StorageError> {
    Ok(MEMORY.with(|m| m.borrow().get(key).cloned()))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_item(key: &str, value: &str) -> Result<(), StorageError> {
    MEMORY.with(|m| m.borrow_mut().insert(key.to_string(), value.to_string()));
    Ok(())
}

/// Decode the JSON value under `key`; `Ok(None)` when nothing is stored
pub fn load_json<T: DeserializeOwned>(key: &str) -> Result<Option<T>, StorageError> {
    match get_item(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

pub fn save_json<T: Serialize>(key: &str, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    set_item(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip_in_memory() {
        save_json("storage_test_numbers", &vec![3u32, 1, 2]).unwrap();
        let back: Option<Vec<u32>> = load_json("storage_test_numbers").unwrap();
        assert_eq!(back, Some(vec![3, 1, 2]));
    }

    #[test]
    fn test_missing_key_is_none() {
        let value: Option<String> = load_json("storage_test_missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        set_item("storage_test_bad", "{not json").unwrap();
        let result: Result<Option<Vec<u32>>, _> = load_json("storage_test_bad");
        assert!(matches!(result, Err(StorageError::Json(_))));
    }
}
