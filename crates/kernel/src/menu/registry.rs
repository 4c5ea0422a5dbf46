//! Menu registry collecting entries from plugins.

use kiosk_sdk::menu::MenuItem;
use kiosk_sdk::privileges::UserContext;

/// All menu entries registered by plugins, sorted by order hint once
/// registration finishes.
#[derive(Debug, Default)]
pub struct MenuRegistry {
    items: Vec<MenuItem>,
}

impl MenuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, items: Vec<MenuItem>) {
        self.items.extend(items);
    }

    /// Sort by order hint. Called once after all plugins registered.
    pub fn finish(&mut self) {
        self.items.sort_by(|a, b| a.order.cmp(&b.order));
    }

    pub fn all(&self) -> &[MenuItem] {
        &self.items
    }

    /// The entries visible for the given user context.
    pub fn visible_for(&self, user: Option<&UserContext>) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| item.visible_for(user))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
