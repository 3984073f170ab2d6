use crate::runtime::data_structures::value::Value;

/// The variable store, a growable list of cells addressed by index.  Allocation only ever appends,
/// an index stays valid for the life of the interpreter once it has been handed out.
#[derive(Default)]
pub struct VariableList {
    items: Vec<Value>,
}

impl VariableList {
    /// Create a new, empty variable list.
    pub fn new() -> VariableList {
        VariableList { items: Vec::new() }
    }

    /// Allocate a fresh zero initialized cell, returning the new cell's index.
    pub fn allocate(&mut self) -> usize {
        self.items.push(Value::default());
        self.items.len() - 1
    }

    /// Read a cell, or None if the index was never allocated.
    pub fn fetch(&self, index: usize) -> Option<Value> {
        self.items.get(index).copied()
    }

    /// Write a cell in place.  Returns false if the index was never allocated.
    pub fn store(&mut self, index: usize, value: Value) -> bool {
        match self.items.get_mut(index) {
            Some(cell) => {
                *cell = value;
                true
            }

            None => false,
        }
    }

    /// Get the length of the list.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
