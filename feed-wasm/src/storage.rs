use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::models::Comment;

pub const USERNAME_KEY: &str = "codeleap_username";
pub const LIKES_KEY: &str = "codeleap_likes";
pub const COMMENTS_KEY: &str = "codeleap_comments";

/// Строковое key-value хранилище. В браузере это localStorage, в тестах —
/// обычная map в памяти.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str) -> Result<(), String>;
}

/// Читает значение по ключу. Отсутствующее или непарсящееся значение молча
/// заменяется на `default`.
pub fn get_json<T, S>(store: &S, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.read(key) {
        Some(raw) => serde_json::from_str(&raw).unwrap_or(default),
        None => default,
    }
}

/// Сериализует значение и сразу пишет его по ключу.
pub fn set_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), String>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw =
        serde_json::to_string(value).map_err(|_| format!("failed to serialize {key}"))?;
    store.write(key, &raw)
}

fn parse_username(raw: &str) -> Option<String> {
    let username = raw.trim().to_string();
    if username.is_empty() {
        return None;
    }
    Some(username)
}

pub fn load_username<S: KeyValueStore + ?Sized>(store: &S) -> Option<String> {
    let raw = store.read(USERNAME_KEY)?;
    parse_username(&raw)
}

pub fn save_username<S: KeyValueStore + ?Sized>(store: &S, username: &str) -> Result<(), String> {
    store.write(USERNAME_KEY, username)
}

pub fn clear_username<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), String> {
    store.remove(USERNAME_KEY)
}

pub fn load_likes<S: KeyValueStore + ?Sized>(store: &S) -> HashMap<i64, Vec<String>> {
    get_json(store, LIKES_KEY, HashMap::new())
}

pub fn save_likes<S: KeyValueStore + ?Sized>(
    store: &S,
    likes: &HashMap<i64, Vec<String>>,
) -> Result<(), String> {
    set_json(store, LIKES_KEY, likes)
}

pub fn load_comments<S: KeyValueStore + ?Sized>(store: &S) -> HashMap<i64, Vec<Comment>> {
    get_json(store, COMMENTS_KEY, HashMap::new())
}

pub fn save_comments<S: KeyValueStore + ?Sized>(
    store: &S,
    comments: &HashMap<i64, Vec<Comment>>,
) -> Result<(), String> {
    set_json(store, COMMENTS_KEY, comments)
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    let window = web_sys::window().ok_or_else(|| "window is not available".to_string())?;
    window
        .local_storage()
        .map_err(|_| "failed to access localStorage".to_string())?
        .ok_or_else(|| "localStorage is not available".to_string())
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        let storage = local_storage().ok()?;
        storage.get_item(key).ok()?
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| format!("failed to save {key}"))
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        local_storage()?
            .remove_item(key)
            .map_err(|_| format!("failed to clear {key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryStore {
        entries: RefCell<HashMap<String, String>>,
    }

    impl KeyValueStore for MemoryStore {
        fn read(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn write(&self, key: &str, value: &str) -> Result<(), String> {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), String> {
            self.entries.borrow_mut().remove(key);
            Ok(())
        }
    }

    fn sample_comment(id: i64) -> Comment {
        Comment {
            id,
            username: "alice".to_string(),
            text: "hello".to_string(),
            created_at: "2025-03-20T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn get_json_returns_default_for_missing_key() {
        let store = MemoryStore::default();
        let likes: HashMap<i64, Vec<String>> = get_json(&store, LIKES_KEY, HashMap::new());
        assert!(likes.is_empty());
    }

    #[test]
    fn get_json_returns_default_for_corrupt_value() {
        let store = MemoryStore::default();
        store.write(LIKES_KEY, "{not-json}").expect("write must succeed");

        let likes: HashMap<i64, Vec<String>> = get_json(&store, LIKES_KEY, HashMap::new());
        assert!(likes.is_empty());
    }

    #[test]
    fn likes_round_trip() {
        let store = MemoryStore::default();
        let mut likes = HashMap::new();
        likes.insert(3, vec!["alice".to_string(), "bob".to_string()]);

        save_likes(&store, &likes).expect("save must succeed");
        assert_eq!(load_likes(&store), likes);
    }

    #[test]
    fn comments_round_trip_preserves_order() {
        let store = MemoryStore::default();
        let mut comments = HashMap::new();
        comments.insert(3, vec![sample_comment(1), sample_comment(2)]);

        save_comments(&store, &comments).expect("save must succeed");

        let loaded = load_comments(&store);
        let ids: Vec<i64> = loaded[&3].iter().map(|comment| comment.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn load_username_trims_stored_value() {
        let store = MemoryStore::default();
        save_username(&store, "  Alice  ").expect("save must succeed");

        assert_eq!(load_username(&store).as_deref(), Some("Alice"));
    }

    #[test]
    fn load_username_treats_blank_as_unset() {
        let store = MemoryStore::default();
        save_username(&store, "   ").expect("save must succeed");

        assert!(load_username(&store).is_none());
    }

    #[test]
    fn clear_username_removes_value() {
        let store = MemoryStore::default();
        save_username(&store, "alice").expect("save must succeed");
        clear_username(&store).expect("clear must succeed");

        assert!(load_username(&store).is_none());
    }
}
