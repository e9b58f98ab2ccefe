use std::sync::Mutex;
use taskbell_domain::{Entity, ID};

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn save<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    if let Some(existing) = collection.iter_mut().find(|item| item.id() == val.id()) {
        *existing = val.clone();
    }
}

pub fn update<T: Entity, F: FnOnce(&mut T)>(val_id: &ID, collection: &Mutex<Vec<T>>, change: F) {
    let mut collection = collection.lock().unwrap();
    if let Some(existing) = collection.iter_mut().find(|item| item.id() == val_id) {
        change(existing);
    }
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    collection.iter().filter(|item| compare(item)).cloned().collect()
}

pub fn delete<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    let index = collection.iter().position(|item| item.id() == val_id)?;
    Some(collection.remove(index))
}
