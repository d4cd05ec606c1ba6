use std::collections::BTreeMap;
use std::rc::Rc;

use crate::world::Item;

/// The player's inventory. Items are keyed by name, so iteration order is
/// stable (alphabetical) for the dispatcher's item-action pass.
#[derive(Default)]
pub struct Character {
    inventory: BTreeMap<String, Rc<Item>>,
}

impl Character {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, name: &str) -> bool {
        self.inventory.contains_key(name)
    }

    pub fn take(&mut self, item: Rc<Item>) {
        self.inventory.insert(item.name.clone(), item);
    }

    pub fn drop(&mut self, name: &str) -> Option<Rc<Item>> {
        self.inventory.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Rc<Item>> {
        self.inventory.get(name)
    }

    pub fn items(&self) -> impl Iterator<Item = &Rc<Item>> {
        self.inventory.values()
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }
}
