use crate::schema::TypeRef;
use crate::value::Value;
use std::slice;

/// A homogeneous sequence. Every element is expected to conform to `component`.
#[derive(Clone, PartialEq, Debug)]
pub struct Array {
    component: TypeRef,
    elements: Vec<Value>,
}

impl Array {
    pub fn new(component: TypeRef, elements: Vec<Value>) -> Self {
        Self {
            component,
            elements,
        }
    }

    pub fn empty(component: TypeRef) -> Self {
        Self::new(component, vec![])
    }

    /// Collects anything convertible into [`Value`] under the given component type.
    pub fn of<T: Into<Value>>(component: TypeRef, items: impl IntoIterator<Item = T>) -> Self {
        Self::new(component, items.into_iter().map(Into::into).collect())
    }

    pub fn component(&self) -> &TypeRef {
        &self.component
    }

    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
