//! Client side of the shared key-value telemetry table.
//!
//! The table itself lives elsewhere (on the network, owned by the robot's
//! infrastructure). Everything in this crate only reads and writes numeric
//! entries through `TelemetryStore`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub trait TelemetryStore {
    /// Reads one numeric entry. `None` means the entry was never published.
    fn get_number(&self, table: &str, key: &str) -> Option<f64>;
    fn set_number(&self, table: &str, key: &str, value: f64);
}

/// One named partition of a store, e.g. the table a single camera publishes to.
#[derive(Clone)]
pub struct TablePartition {
    store: Rc<dyn TelemetryStore>,
    name: String,
}

impl TablePartition {
    pub fn new(store: Rc<dyn TelemetryStore>, name: &str) -> TablePartition {
        TablePartition {
            store: store,
            name: String::from(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.store.get_number(&self.name, key)
    }

    pub fn get_number(&self, key: &str, default: f64) -> f64 {
        self.get(key).unwrap_or(default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn set_number(&self, key: &str, value: f64) {
        self.store.set_number(&self.name, key, value)
    }
}

/// In-process store, standing in for the networked table.
#[derive(Default)]
pub struct MemoryStore {
    tables: RefCell<HashMap<String, HashMap<String, f64>>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn clear(&self, table: &str, key: &str) {
        if let Some(entries) = self.tables.borrow_mut().get_mut(table) {
            entries.remove(key);
        }
    }
}

impl TelemetryStore for MemoryStore {
    fn get_number(&self, table: &str, key: &str) -> Option<f64> {
        self.tables.borrow().get(table).and_then(|entries| entries.get(key).cloned())
    }

    fn set_number(&self, table: &str, key: &str, value: f64) {
        self.tables
            .borrow_mut()
            .entry(String::from(table))
            .or_insert_with(HashMap::new)
            .insert(String::from(key), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitions_do_not_share_entries() {
        let store = Rc::new(MemoryStore::new());
        let front = TablePartition::new(store.clone(), "limelight-front");
        let back = TablePartition::new(store.clone(), "limelight-back");

        front.set_number("tx", 4.5);

        assert_eq!(front.get("tx"), Some(4.5));
        assert_eq!(back.get("tx"), None);
        assert_eq!(store.get_number("limelight-front", "tx"), Some(4.5));
    }

    #[test]
    fn absent_entry_reads_as_default() {
        let store = Rc::new(MemoryStore::new());
        let table = TablePartition::new(store.clone(), "limelight");

        assert!(!table.contains("ta"));
        assert_eq!(table.get_number("ta", 0.0), 0.0);

        table.set_number("ta", 12.0);
        store.clear("limelight", "ta");
        assert_eq!(table.get_number("ta", -1.0), -1.0);
    }
}
