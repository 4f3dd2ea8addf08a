//! In-memory stand-ins for the external services, used by unit tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::identity::{AuthOutcome, IdentityError, IdentityProvider, UserAttribute};
use crate::objects::ObjectStore;
use crate::store::{DocumentStore, Filter, Key, StoreError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Document store keeping JSON items per collection. Items are keyed by `id`.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    writes: Mutex<usize>,
    reads: Mutex<usize>,
    failure: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self { failure: Some(message.to_string()), ..Self::default() }
    }

    /// Insert items directly, without counting them as writes.
    pub fn seed(&self, collection: &str, items: impl IntoIterator<Item = Value>) {
        lock(&self.collections).entry(collection.to_string()).or_default().extend(items);
    }

    pub fn items(&self, collection: &str) -> Vec<Value> {
        lock(&self.collections).get(collection).cloned().unwrap_or_default()
    }

    pub fn writes(&self) -> usize {
        *lock(&self.writes)
    }

    pub fn reads(&self) -> usize {
        *lock(&self.reads)
    }

    fn check(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(message) => Err(StoreError::Request(message.clone())),
            None => Ok(()),
        }
    }
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(|e| StoreError::Conversion(e.to_string()))
}

impl DocumentStore for MemoryStore {
    async fn put<T: Serialize>(&self, collection: &str, item: &T) -> Result<(), StoreError> {
        self.check()?;
        let item = serde_json::to_value(item).map_err(|e| StoreError::Conversion(e.to_string()))?;

        let mut collections = lock(&self.collections);
        let items = collections.entry(collection.to_string()).or_default();
        let existing = item
            .get("id")
            .and_then(|id| items.iter().position(|other| other.get("id") == Some(id)));
        match existing {
            Some(index) => items[index] = item,
            None => items.push(item),
        }
        *lock(&self.writes) += 1;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, collection: &str, key: &Key) -> Result<Option<T>, StoreError> {
        self.check()?;
        *lock(&self.reads) += 1;
        let found = lock(&self.collections)
            .get(collection)
            .and_then(|items| items.iter().find(|item| item.get(&key.name) == Some(&key.value)).cloned());
        found.map(from_value).transpose()
    }

    async fn scan<T: DeserializeOwned>(&self, collection: &str, filter: &Filter) -> Result<Vec<T>, StoreError> {
        self.check()?;
        *lock(&self.reads) += 1;
        let matching: Vec<Value> = lock(&self.collections)
            .get(collection)
            .map(|items| items.iter().filter(|item| filter.matches(item)).cloned().collect())
            .unwrap_or_default();
        matching.into_iter().map(from_value).collect()
    }
}

struct FakeUser {
    password: String,
    temporary: bool,
    attributes: Vec<UserAttribute>,
}

/// Identity provider that keeps users in memory and hands out predictable tokens.
#[derive(Default)]
pub struct FakeIdentity {
    users: Mutex<HashMap<String, FakeUser>>,
    unresolvable: bool,
}

impl FakeIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose pool handle can never be resolved.
    pub fn unresolvable() -> Self {
        Self { unresolvable: true, ..Self::default() }
    }

    /// Register a user that already has a permanent password.
    pub fn with_user(self, username: &str, password: &str) -> Self {
        lock(&self.users).insert(
            username.to_string(),
            FakeUser { password: password.to_string(), temporary: false, attributes: Vec::new() },
        );
        self
    }

    pub fn attributes(&self, username: &str) -> Option<Vec<UserAttribute>> {
        lock(&self.users).get(username).map(|user| user.attributes.clone())
    }

    pub fn has_permanent_password(&self, username: &str, password: &str) -> bool {
        lock(&self.users)
            .get(username)
            .is_some_and(|user| !user.temporary && user.password == password)
    }

    fn check(&self) -> Result<(), IdentityError> {
        if self.unresolvable {
            return Err(IdentityError::Resolution("User pool booking-userpool not found".to_string()));
        }
        Ok(())
    }
}

impl IdentityProvider for FakeIdentity {
    async fn create_user(
        &self,
        username: &str,
        attributes: &[UserAttribute],
        temporary_password: &str,
    ) -> Result<(), IdentityError> {
        self.check()?;
        let mut users = lock(&self.users);
        if users.contains_key(username) {
            return Err(IdentityError::Provider("User account already exists".to_string()));
        }
        users.insert(
            username.to_string(),
            FakeUser { password: temporary_password.to_string(), temporary: true, attributes: attributes.to_vec() },
        );
        Ok(())
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<AuthOutcome, IdentityError> {
        self.check()?;
        let users = lock(&self.users);
        match users.get(username) {
            Some(user) if user.password == password && user.temporary => {
                Ok(AuthOutcome::NewPasswordRequired { session: format!("session-{}", username) })
            }
            Some(user) if user.password == password => Ok(AuthOutcome::Token(format!("token-{}", username))),
            _ => Err(IdentityError::Provider("Incorrect username or password.".to_string())),
        }
    }

    async fn complete_new_password(
        &self,
        username: &str,
        session: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        self.check()?;
        let mut users = lock(&self.users);
        match users.get_mut(username) {
            Some(user) if session == format!("session-{}", username) => {
                user.password = new_password.to_string();
                user.temporary = false;
                Ok(())
            }
            _ => Err(IdentityError::Provider("Invalid session for the user".to_string())),
        }
    }
}

/// An uploaded object as seen by [`MemoryObjects`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
pub struct MemoryObjects {
    objects: Mutex<Vec<StoredObject>>,
}

impl MemoryObjects {
    pub fn objects(&self) -> Vec<StoredObject> {
        lock(&self.objects).clone()
    }
}

impl ObjectStore for MemoryObjects {
    async fn put_object(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StoreError> {
        lock(&self.objects).push(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            bytes,
            content_type: content_type.to_string(),
        });
        Ok(())
    }
}
