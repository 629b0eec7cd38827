use std::fmt;

use super::value::Value;

/// Handle to an instance in the heap. Only `Heap::alloc` mints these and
/// instances are never freed, so a handle stays valid for the whole run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef(usize);

impl ObjectRef {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

#[derive(Debug)]
pub struct Instance {
    class: usize,
    slots: Vec<Value>,
}

impl Instance {
    pub fn class(&self) -> usize {
        self.class
    }

    pub fn slots(&self) -> &[Value] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [Value] {
        &mut self.slots
    }
}

/// Arena of every instance created during a run. Nothing is reclaimed:
/// an instance lives as long as the heap, however many references to it
/// have been dropped.
#[derive(Debug, Default)]
pub struct Heap {
    instances: Vec<Instance>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an instance with one empty slot per name id.
    pub fn alloc(&mut self, class: usize, slot_count: usize) -> ObjectRef {
        let obj = ObjectRef(self.instances.len());

        self.instances.push(Instance {
            class,
            slots: vec![Value::None; slot_count],
        });

        obj
    }

    pub fn get(&self, obj: ObjectRef) -> &Instance {
        &self.instances[obj.0]
    }

    pub fn get_mut(&mut self, obj: ObjectRef) -> &mut Instance {
        &mut self.instances[obj.0]
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
